//! Domain types
//!
//! - Severity scale and the number-or-name level input (`LevelSpec`)
//! - Log records with source location and exception details
//! - Time zones used for rotation boundaries and timestamp display
//! - Logger configuration

pub mod config;
mod record;
mod severity;
mod zone;

pub use config::*;
pub use record::*;
pub use severity::*;
pub use zone::*;
