use std::{
    alloc::{self, Layout},
    ptr::NonNull,
};

/// Snapshot of the buffer allocations made by containers on the current thread.
/// 
/// Only buffers with a non-zero byte size are counted, empty arrays and arrays of zero-sized types never allocate.
/// A buffer released on another thread than the one that allocated it will be counted on the releasing thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// Number of buffers currently allocated
    pub live_allocations:    usize,
    /// Number of bytes currently allocated
    pub live_bytes:          usize,
    /// Number of buffers allocated since the thread started
    pub total_allocations:   usize,
    /// Number of times a buffer was replaced by a buffer of a different capacity
    pub total_reallocations: usize,
}

impl MemoryStats {
    /// Create a snapshot with all counters at zero.
    pub const fn new() -> Self {
        Self { live_allocations: 0, live_bytes: 0, total_allocations: 0, total_reallocations: 0 }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "memory_tracking")] {
        use std::cell::Cell;

        thread_local! {
            static THREAD_STATS: Cell<MemoryStats> = const { Cell::new(MemoryStats::new()) };
        }

        fn update_stats<F: FnOnce(&mut MemoryStats)>(f: F) {
            THREAD_STATS.with(|cell| {
                let mut stats = cell.get();
                f(&mut stats);
                cell.set(stats);
            });
        }

        /// Get the allocation statistics of the current thread.
        pub fn memory_stats() -> MemoryStats {
            THREAD_STATS.with(Cell::get)
        }
    } else {
        fn update_stats<F: FnOnce(&mut MemoryStats)>(_f: F) {}

        /// Get the allocation statistics of the current thread.
        /// 
        /// Always empty, as the `memory_tracking` feature is disabled.
        pub fn memory_stats() -> MemoryStats {
            MemoryStats::new()
        }
    }
}

/// Allocate a raw allocation with the given layout.
/// 
/// Returns `None` if the global allocator failed to provide the memory.
/// 
/// # Safety
/// 
/// `layout` must have a non-zero size.
pub(crate) unsafe fn alloc_raw(layout: Layout) -> Option<NonNull<u8>> {
    debug_assert!(layout.size() != 0, "zero-sized allocations are never made");

    let ptr = NonNull::new(alloc::alloc(layout))?;
    update_stats(|stats| {
        stats.live_allocations += 1;
        stats.live_bytes += layout.size();
        stats.total_allocations += 1;
    });
    trace_buffer!("allocated {} bytes (align {}) at {:p}", layout.size(), layout.align(), ptr);
    Some(ptr)
}

/// Deallocate memory
/// 
/// # Safety
/// 
/// `ptr` must have been returned by [`alloc_raw`] with the same `layout`, and must not have been deallocated yet.
pub(crate) unsafe fn dealloc_raw(ptr: NonNull<u8>, layout: Layout) {
    alloc::dealloc(ptr.as_ptr(), layout);
    update_stats(|stats| {
        stats.live_allocations = stats.live_allocations.saturating_sub(1);
        stats.live_bytes = stats.live_bytes.saturating_sub(layout.size());
    });
    trace_buffer!("released {} bytes at {:p}", layout.size(), ptr);
}

/// Record that a container moved its elements to a new buffer.
#[allow(unused_variables)]
pub(crate) fn note_reallocation(old_capacity: usize, new_capacity: usize) {
    update_stats(|stats| stats.total_reallocations += 1);
    trace_buffer!("reallocated buffer from {} to {} slots", old_capacity, new_capacity);
}
