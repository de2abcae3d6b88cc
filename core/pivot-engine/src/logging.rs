//! FILENAME: core/pivot-engine/src/logging.rs
// PURPOSE: Category-tagged logging macros shared by the pivot crates.
// CONTEXT: Each macro forwards to the `log` facade with the category as the
// target, so a subscriber can filter on "PIVOT", "REPORT" or "DATASET".
// The libraries never install a logger themselves.

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::log::error!(target: $cat, $($arg)*)
    };
}
