//! Error types for tzlog

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced synchronously by initialization, reconfiguration and emission.
///
/// Nothing is logged-and-swallowed: the logger cannot report its own failures
/// through itself, so every failure goes back to the immediate caller.
#[derive(Error, Debug)]
pub enum LogError {
    /// Symbolic level name not present in the level table
    #[error("Invalid level name: {0}")]
    InvalidLevelName(String),

    /// Time zone identifier that does not resolve to an IANA zone
    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),

    /// Date pattern containing an unsupported strftime specifier
    #[error("Invalid timestamp pattern: {0}")]
    InvalidPattern(String),

    /// Epoch seconds outside the representable calendar range
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(f64),

    /// The log file could not be opened, rotated, written or closed
    #[error("Sink I/O error on {}: {source}", .path.display())]
    SinkIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reconfiguration or emission before `initialize` succeeded
    #[error("Logger used before initialization")]
    NotInitialized,
}

impl LogError {
    /// Build a `map_err` adapter that tags an I/O error with the sink path.
    pub fn sink_io(path: &Path) -> impl FnOnce(io::Error) -> LogError + '_ {
        move |source| LogError::SinkIo {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result alias used across tzlog
pub type Result<T> = std::result::Result<T, LogError>;
