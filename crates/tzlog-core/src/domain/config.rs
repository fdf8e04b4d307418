//! Logger configuration

use std::env;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::LevelSpec;

/// Default target of the file sink
pub const DEFAULT_LOG_PATH: &str = "./log.log";

/// File sink rotation policy.
///
/// Parsed leniently: `"time"` selects midnight rotation, any other value
/// selects a plain append file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RotationMode {
    /// Rotate at local midnight, one file per day
    #[default]
    Time,
    /// Append to a single file forever
    Plain,
}

impl RotationMode {
    pub fn parse(s: &str) -> Self {
        match s {
            "time" => RotationMode::Time,
            _ => RotationMode::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationMode::Time => "time",
            RotationMode::Plain => "plain",
        }
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RotationMode {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for RotationMode {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<RotationMode> for String {
    fn from(mode: RotationMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Parameters of `Logger::initialize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity shared by the console and file sinks
    pub min_level: LevelSpec,
    /// Target of the file sink
    pub file_path: PathBuf,
    pub rotation: RotationMode,
    /// Process-wide zone: sets `TZ` for the whole process
    pub global_tz: Option<String>,
    /// Display-only zone for file timestamps
    pub formatter_tz: Option<String>,
    /// strftime pattern for file timestamps (ISO-8601 with milliseconds when unset)
    pub date_pattern: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LevelSpec::default(),
            file_path: PathBuf::from(DEFAULT_LOG_PATH),
            rotation: RotationMode::Time,
            global_tz: None,
            formatter_tz: None,
            date_pattern: None,
        }
    }
}

impl LoggerConfig {
    /// Create config from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// Reads:
    /// - `TZLOG_LEVEL`: level name or number
    /// - `TZLOG_PATH`: log file path
    /// - `TZLOG_ROTATION`: `time` or anything else for plain append
    /// - `TZLOG_TZ`: process-wide time zone
    /// - `TZLOG_FORMATTER_TZ`: display-only time zone
    /// - `TZLOG_DATE_FORMAT`: strftime pattern for file timestamps
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            min_level: env::var("TZLOG_LEVEL")
                .map(|s| match s.parse::<u32>() {
                    Ok(value) => LevelSpec::Numeric(value),
                    Err(_) => LevelSpec::Named(s),
                })
                .unwrap_or(defaults.min_level),
            file_path: env::var("TZLOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
            rotation: env::var("TZLOG_ROTATION")
                .map(RotationMode::from)
                .unwrap_or(defaults.rotation),
            global_tz: env::var("TZLOG_TZ").ok(),
            formatter_tz: env::var("TZLOG_FORMATTER_TZ").ok(),
            date_pattern: env::var("TZLOG_DATE_FORMAT").ok(),
        }
    }

    pub fn with_level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.min_level = level.into();
        self
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    pub fn with_rotation(mut self, rotation: impl Into<RotationMode>) -> Self {
        self.rotation = rotation.into();
        self
    }

    pub fn with_global_tz(mut self, tz: impl Into<String>) -> Self {
        self.global_tz = Some(tz.into());
        self
    }

    pub fn with_formatter_tz(mut self, tz: impl Into<String>) -> Self {
        self.formatter_tz = Some(tz.into());
        self
    }

    pub fn with_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_pattern = Some(pattern.into());
        self
    }
}
