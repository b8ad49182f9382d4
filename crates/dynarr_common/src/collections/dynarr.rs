use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr,
    slice::{self, SliceIndex},
};

use scopeguard::guard;
use static_assertions::{assert_eq_size, assert_impl_all, assert_not_impl_any};

use super::{
    imp::array::{handle_error, RawArray},
    impl_slice_partial_eq_generic, DynArrError, GrowthFactorReserveStrategy, ReserveStrategy, TryReserveError,
};


/// A contiguous growable array type, also known as a dynamic array, or DynArr.
///
/// Dynamic arrays have *O*(1) indexing, amortized *O*(1) push (to the end), and *O*(1) pop (from the back).
///
/// _Note: It was decided to not name this `Vec` as in the standard library, as this is easily confusable with a math vector_
///
/// # Examples
///
/// ```
/// # use dynarr_common::collections::DynArr;
/// let mut arr = DynArr::new();
/// arr.push_back(1).unwrap();
/// arr.push_back(2).unwrap();
///
/// assert_eq!(arr.size(), 2);
/// assert_eq!(arr.at(0), Ok(&1));
///
/// *arr.at_mut(0).unwrap() = 7;
/// assert_eq!(arr, [7, 2]);
/// ```
///
/// The [`dynarr!`] macro is provided for convenient initialization:
///
/// ```
/// # use dynarr_common::dynarr;
/// let mut arr1 = dynarr![1, 2, 3];
/// arr1.push_back(4).unwrap();
/// let arr2 = dynarr![1, 2, 3, 4];
/// assert_eq!(arr1, arr2);
///
/// let zeros = dynarr![0; 5];
/// assert_eq!(zeros, [0, 0, 0, 0, 0]);
/// ```
///
/// # Checked access
///
/// Every operation that can fail returns a [`DynArrError`] instead of panicking:
/// [`at`] fails with [`DynArrError::OutOfRange`] when the index does not refer to a live element,
/// [`front`], [`back`] and [`pop_back`] fail with [`DynArrError::EmptyContainer`] on an empty dynamic array,
/// and any operation that needs a bigger buffer fails with [`DynArrError::CapacityExceeded`] when the capacity can't be represented or allocated.
///
/// Indexing with `[]` is also supported, and panics on an out of range index, like a slice does.
///
/// # Capacity and reallocation
///
/// The capacity of a dynamic array is the amount of space allocated for any future elements that will be added onto the dynamic array.
/// This is not to be confused with the *length* (or size) of the dynamic array, which specifies the number of actual elements within the dynamic array.
/// If a dynamic array's length exceeds its capacity, its capacity will automatically be increased, but its elements will have to be reallocated.
///
/// With the default [`GrowthFactorReserveStrategy`] the new capacity is `capacity + floor(capacity * 1.2) + 1`,
/// so an empty dynamic array grows to 1, 3, 7, 16, 36, ... slots as elements are pushed.
/// A different [`ReserveStrategy`] can be chosen with the second type parameter.
///
/// A reallocation allocates the new buffer first, moves the live elements over, and only then releases the old buffer.
/// If the new buffer can't be allocated, the dynamic array is left exactly as it was.
///
/// # Guarantees
///
/// `DynArr` is a (pointer, capacity, length) triplet and exclusively owns its buffer.
/// Constructing a `DynArr` with capacity 0 via [`DynArr::new`], [`dynarr![]`][`dynarr!`] or [`DynArr::with_capacity(0)`][`DynArr::with_capacity`],
/// or storing zero-sized types inside a `DynArr`, will not allocate.
///
/// ```text
///           ptr      capacity   len
///         +--------+--------+--------+
///         | 0x1234 |    4   |    2   |
///         +--------+--------+--------+
///             |
///             v
/// Heap    +--------+--------+--------+--------+
///         |   'a'  |   'b'  | uninit | uninit |
///         +--------+--------+--------+--------+
/// ```
///
/// `DynArr` will never automatically shrink itself, even if completely empty.
/// If you wish to free up unused memory use [`shrink_to_fit`] or [`reset`].
///
/// Any reference obtained from a `DynArr` borrows it, so the borrow checker rejects every operation that could move the buffer
/// (growing, [`reserve`], [`shrink_to_fit`], assignment or dropping) while such a reference is alive.
///
/// [`at`]: DynArr::at
/// [`front`]: DynArr::front
/// [`back`]: DynArr::back
/// [`pop_back`]: DynArr::pop_back
/// [`reserve`]: DynArr::reserve
/// [`shrink_to_fit`]: DynArr::shrink_to_fit
/// [`reset`]: DynArr::reset
/// [`dynarr!`]: crate::dynarr
pub struct DynArr<T, R: ReserveStrategy = GrowthFactorReserveStrategy> {
    arr: RawArray<T, R>,
    len: usize,
}

// SAFETY: the buffer is exclusively owned, so sending or sharing the array is the same as sending or sharing its elements
unsafe impl<T: Send, R: ReserveStrategy> Send for DynArr<T, R> {}
unsafe impl<T: Sync, R: ReserveStrategy> Sync for DynArr<T, R> {}

assert_eq_size!(DynArr<u32>, [usize; 3]);
assert_impl_all!(DynArr<u32>: Send, Sync, Clone, Default);
assert_not_impl_any!(DynArr<std::rc::Rc<u32>>: Send, Sync);

impl<T> DynArr<T> {
    /// Constructs a new, empty `DynArr<T>`.
    ///
    /// The dynamic array will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::collections::DynArr;
    /// let arr: DynArr<i32> = DynArr::new();
    /// assert_eq!(arr.capacity(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::new_using()
    }

    /// Constructs a new `DynArr<T>` with exactly the specified capacity.
    ///
    /// It is important to note that although the returned dynamic array has the specified *capacity*, the dynamic array will have a zero length.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if `capacity` exceeds [`max_size`](DynArr::max_size), or the allocation failed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::collections::DynArr;
    /// let arr = DynArr::<u64>::with_capacity(10).unwrap();
    /// assert_eq!(arr.capacity(), 10);
    /// assert!(arr.is_empty());
    ///
    /// assert!(DynArr::<u64>::with_capacity(usize::MAX).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, DynArrError> {
        Self::with_capacity_using(capacity)
    }

    /// Constructs a new `DynArr<T>` holding a clone of every element in `values`, in order.
    ///
    /// Both the length and the capacity of the dynamic array will be `values.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if the buffer could not be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::collections::DynArr;
    /// let arr = DynArr::from_sequence(&["a", "b", "c"]).unwrap();
    /// assert_eq!(arr.size(), 3);
    /// assert_eq!(arr.capacity(), 3);
    /// assert_eq!(arr, ["a", "b", "c"]);
    /// ```
    pub fn from_sequence(values: &[T]) -> Result<Self, DynArrError> where
        T: Clone
    {
        Self::from_sequence_using(values)
    }

    /// Multiplier used to grow the capacity when a push overflows the buffer.
    #[inline]
    pub const fn growth_factor(&self) -> f32 {
        GrowthFactorReserveStrategy::GROWTH_FACTOR
    }
}

impl<T, R: ReserveStrategy> DynArr<T, R> {
    /// Largest number of elements any `DynArr<T, R>` can hold.
    pub const MAX_SIZE: usize = RawArray::<T, R>::MAX_CAPACITY;

    /// Constructs a new, empty `DynArr<T, R>`, using the reserve strategy `R`.
    ///
    /// The dynamic array will not allocate until elements are pushed onto it.
    #[inline]
    #[must_use]
    pub const fn new_using() -> Self {
        Self { arr: RawArray::new(), len: 0 }
    }

    /// Constructs a new `DynArr<T, R>` with exactly the specified capacity, using the reserve strategy `R`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if `capacity` exceeds [`max_size`](DynArr::max_size), or the allocation failed.
    pub fn with_capacity_using(capacity: usize) -> Result<Self, DynArrError> {
        Ok(Self { arr: RawArray::try_with_capacity(capacity)?, len: 0 })
    }

    /// Constructs a new `DynArr<T, R>` holding a clone of every element in `values`, using the reserve strategy `R`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if the buffer could not be allocated.
    pub fn from_sequence_using(values: &[T]) -> Result<Self, DynArrError> where
        T: Clone
    {
        Ok(Self::clone_slice(values)?)
    }

    /// Returns the number of elements in the dynamic array, also referred to as its 'length'.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements in the dynamic array.
    ///
    /// Same as [`len`](DynArr::len).
    #[inline]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the dynamic array contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the total number of elements the dynamic array can hold without reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.arr.capacity()
    }

    /// Returns the largest number of elements the dynamic array could ever hold.
    ///
    /// This is limited by the address space: a buffer can't be bigger than `isize::MAX` bytes.
    /// For zero-sized types this is `usize::MAX`.
    #[inline]
    pub const fn max_size(&self) -> usize {
        Self::MAX_SIZE
    }

    /// Returns a raw pointer to the dynamic array's buffer, or a dangling raw pointer valid for zero sized reads if the dynamic array didn't allocate.
    ///
    /// The pointer is invalidated by any operation that reallocates the buffer.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.arr.ptr()
    }

    /// Returns an unsafe mutable pointer to the dynamic array's buffer, or a dangling raw pointer valid for zero sized reads if the dynamic array didn't allocate.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.arr.ptr()
    }

    /// Extracts a slice containing the entire dynamic array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice of the entire dynamic array.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] if `index >= self.size()`, spare capacity is never accessible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::{collections::DynArrError, dynarr};
    /// let arr = dynarr![10, 40, 30];
    /// assert_eq!(arr.at(1), Ok(&40));
    /// assert_eq!(arr.at(3), Err(DynArrError::OutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, DynArrError> {
        let len = self.len;
        self.as_slice().get(index).ok_or(DynArrError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] if `index >= self.size()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DynArrError> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(DynArrError::OutOfRange { index, len })
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::EmptyContainer`] if the dynamic array is empty.
    pub fn front(&self) -> Result<&T, DynArrError> {
        self.as_slice().first().ok_or(DynArrError::EmptyContainer)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::EmptyContainer`] if the dynamic array is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, DynArrError> {
        self.as_mut_slice().first_mut().ok_or(DynArrError::EmptyContainer)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::EmptyContainer`] if the dynamic array is empty.
    pub fn back(&self) -> Result<&T, DynArrError> {
        self.as_slice().last().ok_or(DynArrError::EmptyContainer)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::EmptyContainer`] if the dynamic array is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, DynArrError> {
        self.as_mut_slice().last_mut().ok_or(DynArrError::EmptyContainer)
    }

    /// Appends an element to the back of the dynamic array.
    ///
    /// When the dynamic array is full, the buffer first grows according to the reserve strategy.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if the buffer had to grow, but no bigger buffer could be allocated.
    /// In that case `value` is dropped and the dynamic array is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::dynarr;
    /// let mut arr = dynarr![1, 2];
    /// arr.push_back(3).unwrap();
    /// assert_eq!(arr, [1, 2, 3]);
    /// ```
    ///
    /// # Time complexity
    ///
    /// Takes amortized *O*(1) time.
    /// If the dynamic array's length would exceed its capacity after the push, *O*(*capacity*) time is taken to copy the dynamic array's elements to a larger allocation.
    pub fn push_back(&mut self, value: T) -> Result<(), DynArrError> {
        // Inform codegen the length does not change across try_grow_one()
        let len = self.len;
        if len == self.arr.capacity() {
            self.arr.try_grow_one()?;
        }
        unsafe {
            let end = self.arr.ptr().add(len);
            ptr::write(end, value);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Removes the last element from the dynamic array and returns it.
    ///
    /// The capacity is not changed.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::EmptyContainer`] if the dynamic array is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::{collections::DynArrError, dynarr};
    /// let mut arr = dynarr![1, 2];
    /// assert_eq!(arr.pop_back(), Ok(2));
    /// assert_eq!(arr.pop_back(), Ok(1));
    /// assert_eq!(arr.pop_back(), Err(DynArrError::EmptyContainer));
    /// ```
    pub fn pop_back(&mut self) -> Result<T, DynArrError> {
        if self.len == 0 {
            return Err(DynArrError::EmptyContainer);
        }

        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` was live and is no longer part of the dynamic array.
        unsafe { Ok(ptr::read(self.arr.ptr().add(self.len))) }
    }

    /// Clears the dynamic array, dropping all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the dynamic array.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Shortens the dynamic array, keeping the first `len` elements and dropping the rest.
    ///
    /// If `len` is greater or equal to the dynamic array's current length, this has no effect.
    /// Note that this method has no effect on the allocated capacity of the dynamic array.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        unsafe {
            let remaining_len = self.len - len;
            let tail = ptr::slice_from_raw_parts_mut(self.arr.ptr().add(len), remaining_len);
            // Update the length first, so a panicking drop can't cause the tail to be dropped a second time
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Reserves capacity for exactly `new_capacity` elements.
    ///
    /// Does nothing if the capacity is already at least `new_capacity`,
    /// otherwise the capacity will be exactly `new_capacity` and all elements keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if `new_capacity` exceeds [`max_size`](DynArr::max_size), or the allocation failed.
    /// The dynamic array is unchanged when an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::dynarr;
    /// let mut arr = dynarr![1];
    /// arr.reserve(10).unwrap();
    /// assert_eq!(arr.capacity(), 10);
    ///
    /// arr.reserve(5).unwrap();
    /// assert_eq!(arr.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), DynArrError> {
        self.arr.try_reserve_exact(self.len, new_capacity)?;
        Ok(())
    }

    /// Shrinks the capacity of the dynamic array to its length.
    ///
    /// Does nothing if the dynamic array is empty, or has no spare capacity.
    /// Use [`reset`](DynArr::reset) to release the buffer of an empty dynamic array.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if the smaller buffer could not be allocated, the dynamic array is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::dynarr;
    /// let mut arr = dynarr![1, 2, 3];
    /// arr.reserve(10).unwrap();
    /// arr.shrink_to_fit().unwrap();
    /// assert_eq!(arr.capacity(), 3);
    /// ```
    pub fn shrink_to_fit(&mut self) -> Result<(), DynArrError> {
        if self.len == 0 || self.len == self.capacity() {
            return Ok(());
        }
        self.arr.try_shrink(self.len)?;
        Ok(())
    }

    /// Swaps the contents of two dynamic arrays.
    ///
    /// Only the buffers are exchanged, no element is cloned, moved or dropped.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Moves the content out of the dynamic array, leaving an empty, unallocated dynamic array behind.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::dynarr;
    /// let mut src = dynarr![1, 2, 3];
    /// let dst = src.take();
    /// assert_eq!(dst, [1, 2, 3]);
    /// assert_eq!(src.size(), 0);
    /// assert_eq!(src.capacity(), 0);
    /// ```
    #[inline]
    #[must_use = "use `reset` to drop the content instead"]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new_using())
    }

    /// Drops all values and releases the buffer, leaving the dynamic array with a capacity of 0.
    pub fn reset(&mut self) {
        self.clear();
        self.arr.release();
    }

    /// Resizes the dynamic array in-place so that its length is equal to `new_len`.
    ///
    /// If `new_len` is greater than the length, the dynamic array is extended by the difference, with each additional slot filled with a clone of `value`.
    /// If `new_len` is less than the length, the dynamic array is simply truncated.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if the dynamic array had to grow, but no bigger buffer could be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::dynarr;
    /// let mut arr = dynarr!["hello"];
    /// arr.resize(3, "world").unwrap();
    /// assert_eq!(arr, ["hello", "world", "world"]);
    ///
    /// arr.resize(1, "unused").unwrap();
    /// assert_eq!(arr, ["hello"]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), DynArrError> where
        T: Clone
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        let additional = new_len - self.len;
        self.arr.try_reserve(self.len, additional)?;
        // SAFETY: we just reserved space for `additional` elements
        unsafe { self.write_repeated(additional, value) };
        Ok(())
    }

    /// Creates a clone of the dynamic array, with a capacity equal to its length.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::CapacityExceeded`] if the buffer could not be allocated.
    pub fn try_clone(&self) -> Result<Self, DynArrError> where
        T: Clone
    {
        Ok(Self::clone_slice(self)?)
    }

    //--------------------------------------------------------------

    fn clone_slice(values: &[T]) -> Result<Self, TryReserveError> where
        T: Clone
    {
        let mut res = Self { arr: RawArray::try_with_capacity(values.len())?, len: 0 };
        // SAFETY: the buffer holds exactly `values.len()` elements
        unsafe { res.write_cloned(values) };
        Ok(res)
    }

    /// Clone `values` into the spare capacity.
    ///
    /// If a clone panics, the elements cloned so far are kept and will be dropped with the dynamic array.
    ///
    /// # Safety
    ///
    /// The spare capacity must be able to hold `values.len()` elements.
    unsafe fn write_cloned(&mut self, values: &[T]) where
        T: Clone
    {
        let dst = self.arr.ptr();
        let start = self.len;
        let len_slot = &mut self.len;
        let mut local_len = guard(start, move |len| *len_slot = len);

        for value in values {
            ptr::write(dst.add(*local_len), value.clone());
            *local_len += 1;
        }
    }

    /// Write `n` copies of `value` into the spare capacity, the last one being `value` itself.
    ///
    /// # Safety
    ///
    /// The spare capacity must be able to hold `n` elements.
    unsafe fn write_repeated(&mut self, n: usize, value: T) where
        T: Clone
    {
        let dst = self.arr.ptr();
        let start = self.len;
        let len_slot = &mut self.len;
        let mut local_len = guard(start, move |len| *len_slot = len);

        if n == 0 {
            return;
        }

        for _ in 1..n {
            ptr::write(dst.add(*local_len), value.clone());
            *local_len += 1;
        }
        ptr::write(dst.add(*local_len), value);
        *local_len += 1;
    }
}

//------------------------------------------------------------------------------------------------------------------------------

#[doc(hidden)]
pub fn from_elem<T: Clone>(elem: T, n: usize) -> DynArr<T> {
    let mut arr = DynArr { arr: RawArray::try_with_capacity(n).unwrap_or_else(|err| handle_error(err)), len: 0 };
    // SAFETY: the buffer holds exactly `n` elements
    unsafe { arr.write_repeated(n, elem) };
    arr
}

/// Creates a [`DynArr`] containing the arguments.
///
/// - Create a [`DynArr`] containing a given list of elements, with a capacity equal to the number of elements:
///
/// ```
/// # use dynarr_common::dynarr;
/// let arr = dynarr![1, 2, 3];
/// assert_eq!(arr.at(0), Ok(&1));
/// assert_eq!(arr.capacity(), 3);
/// ```
///
/// - Create a [`DynArr`] from a given element and size:
///
/// ```
/// # use dynarr_common::dynarr;
/// let arr = dynarr![1; 3];
/// assert_eq!(arr, [1, 1, 1]);
/// ```
///
/// # Panics
///
/// Panics on capacity overflow, and aborts if the buffer could not be allocated, like `vec!`.
#[macro_export]
macro_rules! dynarr {
    () => {
        $crate::collections::DynArr::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::collections::from_elem($elem, $n)
    };
    ($($val:expr),+ $(,)?) => {
        <$crate::collections::DynArr<_>>::from([$($val),+])
    };
}

//------------------------------------------------------------------------------------------------------------------------------

impl<T, R: ReserveStrategy> Deref for DynArr<T, R> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { slice::from_raw_parts(self.arr.ptr(), self.len) }
    }
}

impl<T, R: ReserveStrategy> DerefMut for DynArr<T, R> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { slice::from_raw_parts_mut(self.arr.ptr(), self.len) }
    }
}

impl<T: Clone, R: ReserveStrategy> Clone for DynArr<T, R> {
    /// Clones the dynamic array into a new buffer sized to its length.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow, and aborts if the buffer could not be allocated.
    /// Use [`DynArr::try_clone`] to handle these as errors instead.
    fn clone(&self) -> Self {
        Self::clone_slice(self).unwrap_or_else(|err| handle_error(err))
    }
}

impl<T: Hash, R: ReserveStrategy> Hash for DynArr<T, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state)
    }
}

impl<T, I: SliceIndex<[T]>, R: ReserveStrategy> Index<I> for DynArr<T, R> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>, R: ReserveStrategy> IndexMut<I> for DynArr<T, R> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl_slice_partial_eq_generic! { [R1: ReserveStrategy, R2: ReserveStrategy] DynArr<T, R1>, DynArr<U, R2> }
impl_slice_partial_eq_generic! { [R: ReserveStrategy] DynArr<T, R>, [U] }
impl_slice_partial_eq_generic! { [R: ReserveStrategy] DynArr<T, R>, &[U] }
impl_slice_partial_eq_generic! { [R: ReserveStrategy] DynArr<T, R>, &mut [U] }
impl_slice_partial_eq_generic! { [R: ReserveStrategy, const N: usize] DynArr<T, R>, [U; N] }
impl_slice_partial_eq_generic! { [R: ReserveStrategy, const N: usize] DynArr<T, R>, &[U; N] }
impl_slice_partial_eq_generic! { [R: ReserveStrategy] [T], DynArr<U, R> }
impl_slice_partial_eq_generic! { [R: ReserveStrategy] &[T], DynArr<U, R> }

impl<T: Eq, R: ReserveStrategy> Eq for DynArr<T, R> {}

impl<T, R: ReserveStrategy> Drop for DynArr<T, R> {
    fn drop(&mut self) {
        unsafe {
            // use drop for [T]
            // uses a raw slice to refer to the elements of the dynamic array as the weakest necessary type;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.arr.ptr(), self.len))
        }
        // RawArray handles deallocation
    }
}

impl<T, R: ReserveStrategy> Default for DynArr<T, R> {
    /// Creates an empty `DynArr<T, R>`.
    ///
    /// The dynamic array will not allocate until elements are pushed onto it.
    fn default() -> Self {
        Self::new_using()
    }
}

impl<T: fmt::Debug, R: ReserveStrategy> fmt::Debug for DynArr<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T, R: ReserveStrategy> AsRef<[T]> for DynArr<T, R> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, R: ReserveStrategy> AsMut<[T]> for DynArr<T, R> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone, R: ReserveStrategy> From<&[T]> for DynArr<T, R> {
    /// Allocate a `DynArr<T>` and fill it by cloning `s`'s items.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::{collections::DynArr, dynarr};
    /// assert_eq!(DynArr::<i32>::from(&[1, 2, 3][..]), dynarr![1, 2, 3]);
    /// ```
    fn from(s: &[T]) -> Self {
        Self::clone_slice(s).unwrap_or_else(|err| handle_error(err))
    }
}

impl<T, R: ReserveStrategy, const N: usize> From<[T; N]> for DynArr<T, R> {
    /// Allocate a `DynArr<T>` and move `values`'s items into it.
    ///
    /// Both the length and the capacity will be `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dynarr_common::{collections::DynArr, dynarr};
    /// assert_eq!(DynArr::<i32>::from([1, 2, 3]), dynarr![1, 2, 3]);
    /// ```
    fn from(values: [T; N]) -> Self {
        let arr = RawArray::try_with_capacity(N).unwrap_or_else(|err| handle_error(err));
        let values = ManuallyDrop::new(values);
        // SAFETY: the buffer holds exactly `N` elements, and `values` won't drop the moved elements
        unsafe { ptr::copy_nonoverlapping(values.as_ptr(), arr.ptr(), N) };
        Self { arr, len: N }
    }
}
