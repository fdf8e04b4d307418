//! Console sink
//!
//! The console renderer is pluggable through [`ConsoleSink`]. The default,
//! [`TracingConsole`], renders through a private `tracing_subscriber::fmt`
//! subscriber: colored when stderr is a terminal, stamped with the host's
//! local clock. It is never installed as the global subscriber, so hosts
//! keep full control over their own `tracing` setup.

use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::fmt::time::ChronoLocal;
use tzlog_core::{format_console_line, LogRecord, Severity};

/// Destination for records on the console.
///
/// Receives every record at or above the logger threshold. Rendering
/// failures are the sink's own concern and never reach the caller.
pub trait ConsoleSink: Send + Sync {
    fn write(&self, record: &LogRecord);
}

/// Colorized stderr renderer backed by `tracing-subscriber`
pub struct TracingConsole {
    dispatch: Dispatch,
}

impl TracingConsole {
    pub fn new() -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_max_level(LevelFilter::TRACE)
            .with_target(false)
            .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
            .finish();

        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }
}

impl Default for TracingConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for TracingConsole {
    fn write(&self, record: &LogRecord) {
        let line = format_console_line(record);
        tracing::dispatcher::with_default(&self.dispatch, || match record.severity {
            Severity::NotSet => tracing::trace!("{}", line),
            Severity::Debug => tracing::debug!("{}", line),
            Severity::Info => tracing::info!("{}", line),
            Severity::Warning => tracing::warn!("{}", line),
            Severity::Error => tracing::error!("{}", line),
            Severity::Critical => tracing::error!(severity = "CRITICAL", "{}", line),
        });
    }
}
