//! # tzlog
//!
//! Process-wide logging façade: one console sink plus one durable file sink
//! behind level-based calls, with file timestamps rendered in a named time
//! zone independent of the host's zone setting.
//!
//! ## Usage
//!
//! ```ignore
//! use tzlog::{LoggerConfig, RotationMode};
//!
//! let logger = tzlog::global();
//! logger.initialize(
//!     LoggerConfig::default()
//!         .with_level("INFO")
//!         .with_file_path("./logs/log.log")
//!         .with_rotation(RotationMode::Time)
//!         .with_formatter_tz("Asia/Seoul"),
//! )?;
//! tzlog::install_panic_hook(logger);
//!
//! logger.info("service started")?;
//! tzlog::warning!(logger, "queue depth {}", depth)?;
//!
//! // Move the file sink; the console keeps logging throughout
//! logger.reconfigure("./logs/other.log", RotationMode::Plain)?;
//! ```
//!
//! ## Modules
//!
//! - `facade` - The `Logger` singleton and its lifecycle
//! - `console` - Console sink trait and the tracing-backed renderer
//! - `hook` - Panic hook wired to `Logger::handle_unhandled`
//! - `macros` - `log!`, `debug!`, `info!`, `warning!`, `error!`, `critical!`

pub mod console;
pub mod facade;
pub mod hook;
mod macros;

pub use console::{ConsoleSink, TracingConsole};
pub use facade::{global, InitOutcome, Logger};
pub use hook::{exception_from_panic, install_panic_hook};

pub use tzlog_core::{
    ExceptionInfo, LevelSpec, LogError, LogRecord, LoggerConfig, Result, RotationMode, Severity,
    SourceLocation, Zone,
};
