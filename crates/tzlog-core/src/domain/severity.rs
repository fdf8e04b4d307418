//! Severity scale and level name resolution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

/// Ordered importance of a record.
///
/// Numeric values follow the conventional 0/10/20/30/40/50 scale so that
/// numeric and symbolic level inputs can be mixed freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    NotSet,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Self::NotSet,
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSet => "NOTSET",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            Self::NotSet => 0,
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }

    /// Resolve a symbolic name through the fixed level table.
    ///
    /// Matching is exact: `"info"` is not a level name, `"INFO"` is.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "CRITICAL" | "FATAL" => Ok(Self::Critical),
            "ERROR" => Ok(Self::Error),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            "NOTSET" => Ok(Self::NotSet),
            _ => Err(LogError::InvalidLevelName(name.to_string())),
        }
    }

    /// Resolve a numeric level to the highest severity not above it.
    pub fn from_value(value: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|severity| severity.value() <= value)
            .unwrap_or(Self::NotSet)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Level as supplied by a caller: a number or a symbolic name.
///
/// Resolved to a [`Severity`] at the boundary; unknown names are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Numeric(u32),
    Named(String),
}

impl LevelSpec {
    pub fn resolve(&self) -> Result<Severity> {
        match self {
            Self::Numeric(value) => Ok(Severity::from_value(*value)),
            Self::Named(name) => Severity::from_name(name),
        }
    }
}

impl Default for LevelSpec {
    fn default() -> Self {
        Self::Named(Severity::Info.as_str().to_string())
    }
}

impl From<u32> for LevelSpec {
    fn from(value: u32) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Severity> for LevelSpec {
    fn from(severity: Severity) -> Self {
        Self::Numeric(severity.value())
    }
}
