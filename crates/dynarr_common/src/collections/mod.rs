
mod imp;

mod dynarr;

use core::{alloc::Layout, fmt};

pub use dynarr::*;

/// Alias for the dynamic array using the default growth strategy.
pub type DynamicArray<T> = DynArr<T>;

//--------------------------------------------------------------

macro_rules! impl_slice_partial_eq_generic {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty $(where $ty:ty: $bound:ident)?) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs  where
            T : PartialEq<U>,
            $($ty: $bound)?
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
            #[inline]
            fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
        }
    };
}
use impl_slice_partial_eq_generic;

//--------------------------------------------------------------

/// Reason a container could not reserve the memory it needed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TryReserveError {
    /// The requested capacity is larger than the maximum number of elements the container can hold.
    CapacityOverflow {
        /// Requested number of elements, `usize::MAX` if the request itself overflowed.
        requested: usize,
        /// Maximum number of elements, see [`DynArr::max_size`].
        max:       usize,
    },
    /// The global allocator could not provide a buffer with the given layout.
    AllocError(Layout),
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryReserveError::CapacityOverflow { requested, max } => write!(f, "requested capacity of {requested} elements exceeds the maximum of {max}"),
            TryReserveError::AllocError(layout)                  => write!(f, "failed to allocate {} bytes with an alignment of {}", layout.size(), layout.align()),
        }
    }
}

impl std::error::Error for TryReserveError {}

/// Error returned by fallible [`DynArr`] operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DynArrError {
    /// `index` does not refer to a live element.
    OutOfRange {
        index: usize,
        len:   usize,
    },
    /// The operation needs at least one element, but the container is empty.
    EmptyContainer,
    /// The container could not get a large enough buffer.
    CapacityExceeded(TryReserveError),
}

impl fmt::Display for DynArrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynArrError::OutOfRange { index, len } => write!(f, "index {index} is out of range for a dynamic array of length {len}"),
            DynArrError::EmptyContainer            => f.write_str("the dynamic array is empty"),
            DynArrError::CapacityExceeded(err)     => write!(f, "capacity exceeded: {err}"),
        }
    }
}

impl std::error::Error for DynArrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DynArrError::CapacityExceeded(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for DynArrError {
    fn from(err: TryReserveError) -> Self {
        DynArrError::CapacityExceeded(err)
    }
}

//--------------------------------------------------------------

/// A trait used to define a strategy to reserve additional memory for containers.
pub trait ReserveStrategy {
    /// Calculate the new capacity for a container.
    ///
    /// `cur_capacity` represents the current capacity of the container.
    ///
    /// `min_capacity` represents the minimum required capacity to be able to resize.
    ///
    /// The result must be at least `min_capacity`.
    /// Returns `None` if the capacity were to overflow.
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize>;
}

/// The default reserve strategy, which grows the capacity by `capacity * GROWTH_FACTOR + 1`.
///
/// The resulting capacity is `capacity + floor(capacity * 1.2) + 1`, so an empty container gets a single slot on its first growth,
/// or the minimum required capacity, whichever is bigger.
pub struct GrowthFactorReserveStrategy;

impl GrowthFactorReserveStrategy {
    /// Multiplier applied to the current capacity when growing.
    pub const GROWTH_FACTOR: f32 = 1.2;

    // GROWTH_FACTOR as an exact fraction, so growth doesn't depend on float rounding
    const GROWTH_NUMERATOR:   usize = 6;
    const GROWTH_DENOMINATOR: usize = 5;

    /// `floor(capacity * GROWTH_FACTOR)`, without overflowing the intermediate product.
    fn scaled(capacity: usize) -> Option<usize> {
        let whole = capacity / Self::GROWTH_DENOMINATOR;
        let rem = capacity % Self::GROWTH_DENOMINATOR;
        whole.checked_mul(Self::GROWTH_NUMERATOR)?
            .checked_add(rem * Self::GROWTH_NUMERATOR / Self::GROWTH_DENOMINATOR)
    }
}

impl ReserveStrategy for GrowthFactorReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize> {
        let grown = cur_capacity
            .checked_add(Self::scaled(cur_capacity)?)?
            .checked_add(1)?;
        Some(grown.max(min_capacity))
    }
}

/// A reserve strategy that will try to either return double the current capacity, or the minimum required capacity, whichever is bigger.
pub struct DoubleOrMinReserveStrategy;

impl ReserveStrategy for DoubleOrMinReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize> {
        let double_cap = cur_capacity.checked_mul(2)?;
        Some(double_cap.max(min_capacity))
    }
}
