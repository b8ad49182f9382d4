//! Contiguous growable array and the raw buffer management underneath it.
//!
//! The main type is [`collections::DynArr`], a dynamic array with a configurable growth policy.
//! Buffer allocations can be observed through [`mem::memory_stats`] when the `memory_tracking` feature is enabled.

#[macro_use]
mod log_macros;

pub mod mem;
pub mod collections;
