//! Midnight-rotating file sink

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::Zone;
use crate::error::{LogError, Result};

use super::open_append;

/// Name of the file a period is archived to:
/// `logs/app.log` + 2024-01-31 -> `logs/app-20240131.log`.
pub fn rotated_path(path: &Path, date: NaiveDate) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = date.format("-%Y%m%d");
    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(name)
}

/// Daily file rotated at local midnight of its zone.
///
/// The live file always keeps the configured path. When a record created at
/// or after the next midnight arrives, the live file is closed, renamed with
/// the date of the day that ended, and a fresh file is started.
pub struct TimeRotatingSink {
    path: PathBuf,
    zone: Zone,
    /// `None` between a rotation and the next write
    writer: Option<BufWriter<File>>,
    rollover_at: DateTime<Utc>,
}

impl TimeRotatingSink {
    /// Open the sink, starting the current period at the existing file's
    /// modification time, or now for a new file.
    pub fn open(path: impl Into<PathBuf>, zone: Zone) -> Result<Self> {
        let path = path.into();
        let started = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        Self::open_at(path, zone, started)
    }

    /// Open the sink with the current period starting at `started`.
    pub fn open_at(path: impl Into<PathBuf>, zone: Zone, started: DateTime<Utc>) -> Result<Self> {
        let path = path.into();
        let writer = open_append(&path)?;
        Ok(Self {
            rollover_at: zone.midnight_after(started),
            path,
            zone,
            writer: Some(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Instant at which the next record triggers a rotation
    pub fn rollover_at(&self) -> DateTime<Utc> {
        self.rollover_at
    }

    pub fn should_rollover(&self, at: DateTime<Utc>) -> bool {
        at >= self.rollover_at
    }

    /// Write one record's line, rotating first if `created` crossed midnight.
    ///
    /// The boundary is checked against the record's own creation time, not
    /// the time of the write. A record created just before midnight that
    /// reaches the sink after another record already triggered the rotation
    /// goes to the new live file; it never triggers a second rotation.
    pub fn write_line(&mut self, created: DateTime<Utc>, line: &str) -> Result<()> {
        if self.should_rollover(created) {
            self.rotate(created)?;
        }
        if self.writer.is_none() {
            self.writer = Some(open_append(&self.path)?);
        }
        if let Some(writer) = self.writer.as_mut() {
            writeln!(writer, "{}", line).map_err(LogError::sink_io(&self.path))?;
            writer.flush().map_err(LogError::sink_io(&self.path))?;
        }
        Ok(())
    }

    /// Archive the live file and schedule the next rollover after `now`.
    ///
    /// `rollover_at` only moves once the archive is in place, so a failed
    /// rename is retried by the next write instead of mixing two days in
    /// the live file.
    fn rotate(&mut self, now: DateTime<Utc>) -> Result<()> {
        // The period that ended is the day containing its last instant
        let ended = self.zone.local_date(self.rollover_at - Duration::seconds(1));
        let archived = rotated_path(&self.path, ended);

        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(LogError::sink_io(&self.path))?;
        }

        if self.path.exists() {
            if archived.exists() {
                fs::remove_file(&archived).map_err(LogError::sink_io(&archived))?;
            }
            fs::rename(&self.path, &archived).map_err(LogError::sink_io(&self.path))?;
        }
        self.rollover_at = self.zone.midnight_after(now);
        Ok(())
    }

    pub fn close(mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush().map_err(LogError::sink_io(&self.path)),
            None => Ok(()),
        }
    }
}
