//! Time zones for rotation boundaries
//!
//! A [`Zone`] is either the host's local clock or a named IANA zone. The
//! rotating sink asks it two questions: which calendar day an instant falls
//! on, and when the next local midnight is.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{LogError, Result};

/// Parse an IANA identifier such as `Asia/Seoul` or `UTC`.
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| LogError::InvalidTimeZone(name.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Host local time (honours the `TZ` environment variable)
    Local,
    Named(Tz),
}

impl Zone {
    pub fn parse(name: &str) -> Result<Self> {
        parse_tz(name).map(Zone::Named)
    }

    /// Calendar date of `at` in this zone
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        match self {
            Zone::Local => at.with_timezone(&Local).date_naive(),
            Zone::Named(tz) => at.with_timezone(tz).date_naive(),
        }
    }

    /// First local midnight strictly after `at`
    pub fn midnight_after(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let today = self.local_date(at);
        let Some(tomorrow) = today.succ_opt() else {
            return DateTime::<Utc>::MAX_UTC;
        };
        match self {
            Zone::Local => start_of_day(&Local, tomorrow),
            Zone::Named(tz) => start_of_day(tz, tomorrow),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("Local"),
            Zone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

/// First existing instant of `date` in `tz`.
///
/// Zones that move their clocks at midnight skip it on transition days; the
/// earliest valid hour is taken instead. Ambiguous midnights take the
/// earlier instant.
fn start_of_day<T: TimeZone>(tz: &T, date: NaiveDate) -> DateTime<Utc> {
    for hour in 0..4 {
        let Some(naive) = date.and_hms_opt(hour, 0, 0) else {
            continue;
        };
        if let Some(instant) = tz.from_local_datetime(&naive).earliest() {
            return instant.with_timezone(&Utc);
        }
    }
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
