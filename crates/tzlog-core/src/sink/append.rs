//! Plain append file sink

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LogError, Result};

use super::open_append;

/// Single file, never rotated. Existing content is kept and new lines are
/// appended after it.
pub struct AppendSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl AppendSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let writer = open_append(&path)?;
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let path = &self.path;
        writeln!(self.writer, "{}", line).map_err(LogError::sink_io(path))?;
        self.writer.flush().map_err(LogError::sink_io(path))
    }

    pub fn close(mut self) -> Result<()> {
        self.writer.flush().map_err(LogError::sink_io(&self.path))
    }
}
