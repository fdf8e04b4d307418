//! # tzlog Core Library
//!
//! Building blocks for the tzlog façade, free of any process-wide state.
//!
//! ## Modules
//!
//! - `domain` - Severities, records, time zones and configuration
//! - `formatter` - Time-zone aware timestamp and record rendering
//! - `sink` - File sinks (plain append and midnight rotation)
//! - `error` - Error taxonomy shared by every crate in the workspace

pub mod domain;
pub mod error;
pub mod formatter;
pub mod sink;

// Re-export commonly used types
pub use domain::*;
pub use error::{LogError, Result};
pub use formatter::{format_console_line, FileFormatter, TimestampFormatter, DEFAULT_TIMEZONE};
pub use sink::{AppendSink, FileSink, SinkFactory, TimeRotatingSink};
