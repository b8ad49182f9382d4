//! Contiguous growable array.
//!
//! ```
//! use dynarr::{dynarr, DynArr, DynArrError};
//!
//! let mut arr = DynArr::new();
//! arr.push_back(1).unwrap();
//! arr.push_back(2).unwrap();
//! assert_eq!(arr, dynarr![1, 2]);
//! assert_eq!(arr.at(2), Err(DynArrError::OutOfRange { index: 2, len: 2 }));
//! ```

pub use dynarr_common::{
    collections::{
        DoubleOrMinReserveStrategy, DynArr, DynArrError, DynamicArray, GrowthFactorReserveStrategy, ReserveStrategy,
        TryReserveError,
    },
    dynarr,
    mem,
};
