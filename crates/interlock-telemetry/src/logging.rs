//! Structured logging helpers.
//!
//! Every event carries a `component` field so JSON output can be filtered
//! per crate. The calling crate needs `tracing` as a dependency.

/// Log a transaction event with the invocation target.
#[macro_export]
macro_rules! log_tx_event {
    ($level:ident, $msg:expr, $target:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "transaction",
            target_method = %$target,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an exception event with the exception type.
#[macro_export]
macro_rules! log_exception_event {
    ($level:ident, $msg:expr, $exception_type:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "exception-control",
            exception_type = %$exception_type,
            $($($field)*,)?
            $msg
        )
    };
}
