//! Log records

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::Severity;

/// Where a record was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source path as reported by the compiler
    pub file: &'static str,
    /// Enclosing function or module path (`?` when unknown)
    pub function: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const UNKNOWN_FUNCTION: &'static str = "?";

    pub fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    /// Location of the caller of a `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), Self::UNKNOWN_FUNCTION, location.line())
    }

    /// Base name of the source file (`src/main.rs` -> `main.rs`)
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }
}

/// Error details attached to a record (error chain, panic payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    /// Error type or `panic`
    pub kind: String,
    pub message: String,
    /// Cause chain, location and backtrace, already rendered
    pub traceback: Option<String>,
}

impl ExceptionInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            traceback: None,
        }
    }

    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = Some(traceback.into());
        self
    }

    /// Capture an error, its `source()` chain and a backtrace when the
    /// environment enables backtrace capture.
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let mut traceback = String::new();
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = writeln!(traceback, "caused by: {}", cause);
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(traceback, "{}", backtrace);
        }

        let info = Self::new(std::any::type_name::<E>(), err.to_string());
        let traceback = traceback.trim_end();
        if traceback.is_empty() {
            info
        } else {
            info.with_traceback(traceback)
        }
    }

    /// Multi-line rendering appended below the record's own line.
    pub fn render(&self) -> String {
        match &self.traceback {
            Some(traceback) => format!("{}: {}\n{}", self.kind, self.message, traceback),
            None => format!("{}: {}", self.kind, self.message),
        }
    }
}

/// Immutable snapshot of one emission.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub severity: Severity,
    /// Fully interpolated message
    pub message: String,
    pub location: SourceLocation,
    pub created: DateTime<Utc>,
    pub exception: Option<ExceptionInfo>,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(severity: Severity, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            severity,
            message: message.into(),
            location,
            created: Utc::now(),
            exception: None,
        }
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }
}
