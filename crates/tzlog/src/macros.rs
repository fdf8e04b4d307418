//! Call-site macros
//!
//! Unlike the `Logger` methods, the macros also capture the enclosing module
//! path, which fills the function slot of the file line, and accept
//! `format!` arguments.
//!
//! ```ignore
//! tzlog::info!(tzlog::global(), "listening on {}", addr)?;
//! tzlog::log!(logger, "WARNING", "retry {} of {}", n, max)?;
//! ```

/// Emit at any level accepted by `LevelSpec` (number, name or `Severity`).
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit_at(
            $level,
            ::std::format!($($arg)+),
            $crate::SourceLocation::new(::std::file!(), ::std::module_path!(), ::std::line!()),
        )
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Critical, $($arg)+)
    };
}
