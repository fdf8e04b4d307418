//! File sinks
//!
//! Two variants, both UTF-8 text opened in append mode:
//! - [`AppendSink`]: one fixed file, never rotated
//! - [`TimeRotatingSink`]: rotated daily at local midnight, archived as
//!   `<stem>-YYYYMMDD.<ext>`
//!
//! [`SinkFactory`] builds the variant matching a [`RotationMode`] and
//! [`FileSink`] pairs it with the [`FileFormatter`] that renders records.

mod append;
mod rotating;

pub use append::AppendSink;
pub use rotating::{rotated_path, TimeRotatingSink};

use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

use crate::domain::{LogRecord, RotationMode, Zone};
use crate::error::{LogError, Result};
use crate::formatter::FileFormatter;

/// Open `path` for appending, creating it and its parent directory if needed.
pub(crate) fn open_append(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(LogError::sink_io(parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LogError::sink_io(path))?;
    Ok(BufWriter::new(file))
}

enum SinkWriter {
    Append(AppendSink),
    TimeRotating(TimeRotatingSink),
}

/// An open log file plus the formatter attached to it.
pub struct FileSink {
    writer: SinkWriter,
    formatter: FileFormatter,
}

impl FileSink {
    pub fn mode(&self) -> RotationMode {
        match self.writer {
            SinkWriter::Append(_) => RotationMode::Plain,
            SinkWriter::TimeRotating(_) => RotationMode::Time,
        }
    }

    pub fn path(&self) -> &Path {
        match &self.writer {
            SinkWriter::Append(sink) => sink.path(),
            SinkWriter::TimeRotating(sink) => sink.path(),
        }
    }

    pub fn formatter(&self) -> &FileFormatter {
        &self.formatter
    }

    pub fn set_formatter(&mut self, formatter: FileFormatter) {
        self.formatter = formatter;
    }

    pub fn with_formatter(mut self, formatter: FileFormatter) -> Self {
        self.set_formatter(formatter);
        self
    }

    /// Render and append one record (rotating first when due).
    pub fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.format(record)?;
        match &mut self.writer {
            SinkWriter::Append(sink) => sink.write_line(&line),
            SinkWriter::TimeRotating(sink) => sink.write_line(record.created, &line),
        }
    }

    /// Flush and release the underlying file.
    pub fn close(self) -> Result<()> {
        match self.writer {
            SinkWriter::Append(sink) => sink.close(),
            SinkWriter::TimeRotating(sink) => sink.close(),
        }
    }
}

impl From<AppendSink> for FileSink {
    fn from(sink: AppendSink) -> Self {
        Self {
            writer: SinkWriter::Append(sink),
            formatter: FileFormatter::default(),
        }
    }
}

impl From<TimeRotatingSink> for FileSink {
    fn from(sink: TimeRotatingSink) -> Self {
        Self {
            writer: SinkWriter::TimeRotating(sink),
            formatter: FileFormatter::default(),
        }
    }
}

/// Builds file sinks whose rotation boundaries follow `rotation_zone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFactory {
    rotation_zone: Zone,
}

impl SinkFactory {
    pub fn new(rotation_zone: Zone) -> Self {
        Self { rotation_zone }
    }

    pub fn rotation_zone(&self) -> Zone {
        self.rotation_zone
    }

    pub fn make_sink(&self, path: &Path, mode: RotationMode) -> Result<FileSink> {
        match mode {
            RotationMode::Time => {
                TimeRotatingSink::open(path, self.rotation_zone).map(FileSink::from)
            }
            RotationMode::Plain => AppendSink::open(path).map(FileSink::from),
        }
    }
}
