//! Record and timestamp rendering
//!
//! Timestamps in the file sink are rendered in a configurable named zone
//! regardless of the host's own zone setting. The zone only affects display:
//! rotation boundaries are decided by the sink's [`Zone`](crate::Zone).

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::domain::LogRecord;
use crate::error::{LogError, Result};

/// Zone used for file timestamps when neither a global nor a
/// formatter-only zone is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Seoul;

fn validate_pattern(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(LogError::InvalidPattern(pattern.to_string()));
    }
    Ok(())
}

/// Converts UTC instants into display strings in a fixed zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormatter {
    zone: Tz,
    pattern: Option<String>,
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl TimestampFormatter {
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            pattern: None,
        }
    }

    /// Use `pattern` (strftime syntax) instead of ISO-8601 by default.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        validate_pattern(&pattern)?;
        self.pattern = Some(pattern);
        Ok(self)
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Render `created` in this formatter's zone.
    ///
    /// `explicit_pattern` wins over the configured pattern; with neither the
    /// result is ISO-8601 with millisecond precision and the zone offset,
    /// e.g. `2024-01-01T09:00:00.000+09:00`.
    pub fn format(&self, created: DateTime<Utc>, explicit_pattern: Option<&str>) -> Result<String> {
        let local = created.with_timezone(&self.zone);
        match explicit_pattern.or(self.pattern.as_deref()) {
            Some(pattern) => {
                validate_pattern(pattern)?;
                Ok(local
                    .format_with_items(StrftimeItems::new(pattern))
                    .to_string())
            }
            None => Ok(local.to_rfc3339_opts(SecondsFormat::Millis, false)),
        }
    }

    /// Same as [`format`](Self::format) for raw epoch seconds (UTC based).
    pub fn format_epoch(&self, epoch_seconds: f64, explicit_pattern: Option<&str>) -> Result<String> {
        if !epoch_seconds.is_finite() {
            return Err(LogError::InvalidTimestamp(epoch_seconds));
        }
        let secs = epoch_seconds.floor();
        let nanos = ((epoch_seconds - secs) * 1e9).round().min(999_999_999.0) as u32;
        let created = DateTime::<Utc>::from_timestamp(secs as i64, nanos)
            .ok_or(LogError::InvalidTimestamp(epoch_seconds))?;
        self.format(created, explicit_pattern)
    }
}

/// Formatter attached to file sinks.
///
/// Line layout: `[<timestamp>]\t<LEVEL>\t[<file>:<function>:<line>]\t>> <message>`,
/// followed by the exception rendering on the next lines when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFormatter {
    timestamps: TimestampFormatter,
}

impl FileFormatter {
    pub fn new(timestamps: TimestampFormatter) -> Self {
        Self { timestamps }
    }

    pub fn timestamps(&self) -> &TimestampFormatter {
        &self.timestamps
    }

    pub fn format(&self, record: &LogRecord) -> Result<String> {
        let timestamp = self.timestamps.format(record.created, None)?;
        let mut line = format!(
            "[{}]\t{}\t[{}:{}:{}]\t>> {}",
            timestamp,
            record.severity,
            record.location.file_name(),
            record.location.function,
            record.location.line,
            record.message
        );
        if let Some(exception) = &record.exception {
            line.push('\n');
            line.push_str(&exception.render());
        }
        Ok(line)
    }
}

/// Console body: `[<file>:<line>] >> <message>`
pub fn format_console_line(record: &LogRecord) -> String {
    let mut line = format!(
        "[{}:{}] >> {}",
        record.location.file_name(),
        record.location.line,
        record.message
    );
    if let Some(exception) = &record.exception {
        line.push('\n');
        line.push_str(&exception.render());
    }
    line
}
