// Trace records for buffer management, only emitted with the `logging` feature.
// Errors are reported to the caller and never go through here.

cfg_if::cfg_if! {
    if #[cfg(feature = "logging")] {
        macro_rules! trace_buffer {
            ($($arg:tt)*) => {
                log::trace!(target: "dynarr", $($arg)*)
            };
        }
    } else {
        macro_rules! trace_buffer {
            ($($arg:tt)*) => {};
        }
    }
}
