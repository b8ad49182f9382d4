use std::{
    alloc::{self, Layout},
    marker::PhantomData,
    mem::size_of,
    ptr::{self, NonNull},
};

use scopeguard::{guard, ScopeGuard};

use crate::{
    collections::{ReserveStrategy, TryReserveError},
    mem::{alloc_raw, dealloc_raw, note_reallocation},
};


/// Low level utility for more ergonomically allocating, reallocating, and deallocating
/// a buffer of memory without having to worry about all the corner cases involved.
/// In particular:
///
/// - Produces `NonNull::dangling` on zero-sized types
/// - Produces `NonNull::dangling` on zero-length allocations.
/// - Avoid freeing `NonNull::dangling`
/// - Catches all overflows in capacity computations (promotes them to "capacity overflow" errors).
/// - Never touches the current buffer until a replacement buffer has been fully populated.
///
/// This type does not in anyway inspect the memory it manages. When dropped it *will* free its memory, but it *won't* try to drop its contents.
/// It is up to the user of `RawArray` to handle the actual things *stored* inside of `RawArray`.
///
/// Unlike `std`'s `RawVec`, the capacity of a zero-sized type is tracked like any other capacity, it just never allocates.
pub(crate) struct RawArray<T, R: ReserveStrategy> {
    ptr:      NonNull<T>,
    cap:      usize,
    _phantom: PhantomData<(T, fn() -> R)>,
}

impl<T, R: ReserveStrategy> RawArray<T, R> {
    /// Largest number of elements a buffer can hold, so that its size in bytes never exceeds `isize::MAX`.
    /// Zero-sized types can always hold `usize::MAX` elements.
    pub const MAX_CAPACITY: usize = if size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size_of::<T>()
    };

    /// Creates a `RawArray` without allocating, with a capacity of `0`.
    /// Useful for implementing delayed allocation.
    #[must_use]
    pub const fn new() -> Self {
        Self { ptr: NonNull::dangling(), cap: 0, _phantom: PhantomData }
    }

    /// Tries to create a `RawArray` with exactly the capacity and alignment requirements for a `[T; capacity]`.
    /// This is equivalent to calling `RawArray::new` when `capacity` is `0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested capacity exceeds [`Self::MAX_CAPACITY`], or the allocation failed.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let ptr = Self::allocate(capacity)?;
        Ok(Self { ptr, cap: capacity, _phantom: PhantomData })
    }

    /// Get the capacity of the allocation.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Get a raw pointer to the start of the allocation.
    /// Note that this is a dangling pointer when either `capacity() == 0` or `T` is zero-sized.
    #[inline]
    pub const fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Ensures that the buffer contains at least enough space to hold `len + additional` elements.
    /// If it doesn't already have enough capacity, will reallocate using the reserve strategy to get amortized *O*(1) behavior.
    /// The strategy is clamped to [`Self::MAX_CAPACITY`] when it would overshoot it.
    ///
    /// `len` may not exceed `self.capacity()`.
    pub fn try_reserve(&mut self, len: usize, additional: usize) -> Result<(), TryReserveError> {
        if self.needs_to_grow(len, additional) {
            self.grow_amortized(len, additional)?;
        }
        Ok(())
    }

    /// A specialized version of `self.try_reserve(len, 1)`, which requires the caller to ensure `len == self.capacity()`.
    pub fn try_grow_one(&mut self) -> Result<(), TryReserveError> {
        self.grow_amortized(self.cap, 1)
    }

    /// Ensures that the buffer holds exactly `capacity` elements if it currently holds less.
    ///
    /// `len` may not exceed `self.capacity()`.
    pub fn try_reserve_exact(&mut self, len: usize, capacity: usize) -> Result<(), TryReserveError> {
        if capacity <= self.cap {
            return Ok(());
        }
        if capacity > Self::MAX_CAPACITY {
            return Err(TryReserveError::CapacityOverflow { requested: capacity, max: Self::MAX_CAPACITY });
        }
        unsafe { self.relocate(capacity, len) }
    }

    /// Shrinks the buffer down to exactly `len` elements.
    /// If `len` is 0, actually completely deallocates.
    ///
    /// `len` may not exceed `self.capacity()`.
    pub fn try_shrink(&mut self, len: usize) -> Result<(), TryReserveError> {
        assert!(len <= self.cap, "Tried to shrink to a larger capacity");

        if len == self.cap {
            return Ok(());
        }

        if len == 0 {
            self.release();
            return Ok(());
        }

        unsafe { self.relocate(len, len) }
    }

    /// Free the buffer, leaving an unallocated `RawArray` with a capacity of `0` behind.
    ///
    /// Any elements still in the buffer are forgotten, not dropped.
    pub fn release(&mut self) {
        unsafe { Self::deallocate(self.ptr, self.cap) };
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    //--------------------------------------------------------------

    /// Returns if the buffer needs to grow to fulfill the needed extra capacity.
    fn needs_to_grow(&self, len: usize, additional: usize) -> bool {
        additional > self.cap.wrapping_sub(len)
    }

    fn grow_amortized(&mut self, len: usize, additional: usize) -> Result<(), TryReserveError> {
        debug_assert!(additional > 0);

        let required_cap = match len.checked_add(additional) {
            Some(cap) if cap <= Self::MAX_CAPACITY => cap,
            Some(cap) => return Err(TryReserveError::CapacityOverflow { requested: cap, max: Self::MAX_CAPACITY }),
            None => return Err(TryReserveError::CapacityOverflow { requested: usize::MAX, max: Self::MAX_CAPACITY }),
        };

        // When the strategy overshoots (or overflows), settle for the largest capacity we can represent, it still fits `required_cap`.
        let new_cap = R::calculate(self.cap, required_cap)
            .map_or(Self::MAX_CAPACITY, |cap| cap.min(Self::MAX_CAPACITY));
        debug_assert!(new_cap >= required_cap);

        unsafe { self.relocate(new_cap, len) }
    }

    /// Move the first `len` elements into a new buffer of `new_cap` elements and adopt it.
    ///
    /// The current buffer is left untouched if the new buffer can't be allocated.
    ///
    /// # Safety
    ///
    /// `len` must not exceed either capacity, and the first `len` slots must be initialized.
    unsafe fn relocate(&mut self, new_cap: usize, len: usize) -> Result<(), TryReserveError> {
        debug_assert!(len <= new_cap && len <= self.cap);

        let new_ptr = Self::allocate(new_cap)?;
        // The new buffer is released again unless it gets adopted below.
        let new_buf = guard(new_ptr, |ptr| Self::deallocate(ptr, new_cap));

        ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_buf.as_ptr(), len);

        let new_ptr = ScopeGuard::into_inner(new_buf);
        let old_ptr = core::mem::replace(&mut self.ptr, new_ptr);
        let old_cap = core::mem::replace(&mut self.cap, new_cap);
        Self::deallocate(old_ptr, old_cap);

        // Only count buffers that actually got replaced, zero-byte buffers never exist.
        if size_of::<T>() != 0 && old_cap != 0 && new_cap != 0 {
            note_reallocation(old_cap, new_cap);
        }
        Ok(())
    }

    fn allocate(capacity: usize) -> Result<NonNull<T>, TryReserveError> {
        if capacity > Self::MAX_CAPACITY {
            return Err(TryReserveError::CapacityOverflow { requested: capacity, max: Self::MAX_CAPACITY });
        }

        let layout = match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => return Err(TryReserveError::CapacityOverflow { requested: capacity, max: Self::MAX_CAPACITY }),
        };

        // Don't allocate here, because `deallocate` will not free zero-sized buffers either.
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        match unsafe { alloc_raw(layout) } {
            Some(ptr) => Ok(ptr.cast()),
            None => Err(TryReserveError::AllocError(layout)),
        }
    }

    /// # Safety
    ///
    /// `ptr` must have been returned by `Self::allocate(capacity)`, and not have been deallocated yet.
    unsafe fn deallocate(ptr: NonNull<T>, capacity: usize) {
        if size_of::<T>() == 0 || capacity == 0 {
            return;
        }

        // We could use Layout::array here, but this memory has already been allocated so we know it can't overflow.
        let layout = Layout::from_size_align_unchecked(size_of::<T>() * capacity, core::mem::align_of::<T>());
        dealloc_raw(ptr.cast(), layout);
    }
}

impl<T, R: ReserveStrategy> Drop for RawArray<T, R> {
    fn drop(&mut self) {
        unsafe { Self::deallocate(self.ptr, self.cap) };
    }
}

/// Central function for reserve error handling in infallible operations.
#[cold]
pub(crate) fn handle_error(e: TryReserveError) -> ! {
    match e {
        TryReserveError::CapacityOverflow { .. } => capacity_overflow(),
        TryReserveError::AllocError(layout) => alloc::handle_alloc_error(layout),
    }
}

fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
