//! Logger façade
//!
//! One [`Logger`] owns a console sink and exactly one file sink. The
//! process-wide instance is reached through [`global()`]; isolated instances
//! can be built with [`Logger::new`] or [`Logger::with_console`].
//!
//! # Initialization is first-call-wins
//!
//! Only the first successful [`Logger::initialize`] takes effect. Every later
//! call is a silent no-op that ignores all of its arguments, including a
//! different level, path or time zone, and reports
//! [`InitOutcome::AlreadyInitialized`]. Use [`Logger::reconfigure`] to move
//! the file sink.
//!
//! # Global time zone
//!
//! `global_tz` sets the `TZ` environment variable of the whole process. It
//! changes local time for every piece of code in the process, not only for
//! this logger, and stays in effect until the process exits.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use chrono_tz::Tz;
use parking_lot::Mutex;
use tzlog_core::{
    parse_tz, ExceptionInfo, FileFormatter, FileSink, LevelSpec, LogError, LogRecord,
    LoggerConfig, Result, RotationMode, Severity, SinkFactory, SourceLocation,
    TimestampFormatter, Zone, DEFAULT_TIMEZONE,
};

use crate::console::{ConsoleSink, TracingConsole};

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, created uninitialized on first access.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

/// Result of [`Logger::initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// This call configured the logger
    Initialized,
    /// The logger was already configured; the call changed nothing
    AlreadyInitialized,
}

/// State that exists once `initialize` has succeeded
struct ActiveLogger {
    threshold: Severity,
    console: Arc<dyn ConsoleSink>,
    file_sink: FileSink,
    log_path: PathBuf,
    factory: SinkFactory,
    formatter: FileFormatter,
}

thread_local! {
    /// Set while this thread holds the logger state and runs the sinks
    static EMITTING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside a sink write until dropped.
struct EmitScope;

impl EmitScope {
    fn enter() -> Self {
        EMITTING.with(|flag| flag.set(true));
        EmitScope
    }
}

impl Drop for EmitScope {
    fn drop(&mut self) {
        EMITTING.with(|flag| flag.set(false));
    }
}

/// True when the current thread is in the middle of writing a record.
///
/// A panic raised by a sink fires while the state lock is still held; the
/// panic hook checks this to avoid locking it a second time.
pub(crate) fn emitting_on_current_thread() -> bool {
    EMITTING.with(Cell::get)
}

/// Clears the enabled flag for the lifetime of the guard.
struct PauseGuard<'a>(&'a AtomicBool);

impl<'a> PauseGuard<'a> {
    fn pause(flag: &'a AtomicBool) -> Self {
        flag.store(false, Ordering::Release);
        Self(flag)
    }
}

impl Drop for PauseGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

pub struct Logger {
    state: Mutex<Option<ActiveLogger>>,
    /// Cleared while the file sink is being swapped
    enabled: AtomicBool,
    console_override: Option<Arc<dyn ConsoleSink>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Uninitialized logger using the tracing-backed console.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
            enabled: AtomicBool::new(true),
            console_override: None,
        }
    }

    /// Uninitialized logger rendering console output through `console`.
    pub fn with_console(console: Arc<dyn ConsoleSink>) -> Self {
        Self {
            console_override: Some(console),
            ..Self::new()
        }
    }

    /// Configure the logger once.
    ///
    /// Validates the level, zones and date pattern and opens the file sink
    /// before any global side effect, so a failed call leaves the process
    /// untouched and can be retried. Repeated calls after a success are
    /// no-ops (see the module docs).
    pub fn initialize(&self, config: LoggerConfig) -> Result<InitOutcome> {
        let mut state = self.state.lock();
        if state.is_some() {
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let threshold = config.min_level.resolve()?;
        let global_tz = config.global_tz.as_deref().map(parse_tz).transpose()?;
        let formatter_tz = config.formatter_tz.as_deref().map(parse_tz).transpose()?;

        // Display zone: formatter-only override, then global, then default
        let display_zone = formatter_tz.or(global_tz).unwrap_or(DEFAULT_TIMEZONE);
        let mut timestamps = TimestampFormatter::new(display_zone);
        if let Some(pattern) = &config.date_pattern {
            timestamps = timestamps.with_pattern(pattern.clone())?;
        }
        let formatter = FileFormatter::new(timestamps);

        // Rotation follows the process clock, never the formatter-only zone
        let rotation_zone = global_tz.map(Zone::Named).unwrap_or(Zone::Local);
        let factory = SinkFactory::new(rotation_zone);
        let file_sink = factory
            .make_sink(&config.file_path, config.rotation)?
            .with_formatter(formatter.clone());

        if let Some(tz) = global_tz {
            set_process_timezone(tz);
        }

        let console = match &self.console_override {
            Some(console) => console.clone(),
            None => Arc::new(TracingConsole::new()),
        };

        *state = Some(ActiveLogger {
            threshold,
            console,
            file_sink,
            log_path: config.file_path,
            factory,
            formatter,
        });
        Ok(InitOutcome::Initialized)
    }

    /// Replace the file sink with a new one at `path`.
    ///
    /// Emission is paused for the duration of the swap; records emitted in
    /// that window are dropped. The replacement is opened before the current
    /// sink is detached: if opening fails the current sink stays attached
    /// and the error is returned. The console sink is never touched.
    ///
    /// Returns [`LogError::NotInitialized`] before `initialize`.
    pub fn reconfigure(&self, path: impl AsRef<Path>, mode: RotationMode) -> Result<()> {
        let path = path.as_ref();
        let mut state = self.state.lock();
        let active = state.as_mut().ok_or(LogError::NotInitialized)?;

        let _pause = PauseGuard::pause(&self.enabled);
        let replacement = active
            .factory
            .make_sink(path, mode)?
            .with_formatter(active.formatter.clone());

        let previous = std::mem::replace(&mut active.file_sink, replacement);
        active.log_path = path.to_path_buf();
        previous.close()
    }

    /// Route `record` to both sinks if it passes the threshold.
    pub fn emit_record(&self, record: LogRecord) -> Result<()> {
        if !self.enabled.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut state = self.state.lock();
        let active = state.as_mut().ok_or(LogError::NotInitialized)?;
        if record.severity < active.threshold {
            return Ok(());
        }

        let _scope = EmitScope::enter();
        active.console.write(&record);
        active.file_sink.write(&record)
    }

    /// Emit at a numeric or symbolic level; unknown names write nothing.
    pub fn emit_at(
        &self,
        level: impl Into<LevelSpec>,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Result<()> {
        let severity = level.into().resolve()?;
        self.emit_record(LogRecord::new(severity, message, location))
    }

    #[track_caller]
    pub fn emit(&self, level: impl Into<LevelSpec>, message: impl Into<String>) -> Result<()> {
        self.emit_at(level, message, SourceLocation::caller())
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.emit_at(Severity::Debug, message, SourceLocation::caller())
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.emit_at(Severity::Info, message, SourceLocation::caller())
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.emit_at(Severity::Warning, message, SourceLocation::caller())
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.emit_at(Severity::Error, message, SourceLocation::caller())
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) -> Result<()> {
        self.emit_at(Severity::Critical, message, SourceLocation::caller())
    }

    /// ERROR record carrying `err`, its cause chain and a backtrace.
    #[track_caller]
    pub fn exception<E>(&self, message: impl Into<String>, err: &E) -> Result<()>
    where
        E: std::error::Error + ?Sized,
    {
        let record = LogRecord::new(Severity::Error, message, SourceLocation::caller())
            .with_exception(ExceptionInfo::from_error(err));
        self.emit_record(record)
    }

    /// Entry point for uncaught failures (see [`install_panic_hook`](crate::install_panic_hook)).
    #[track_caller]
    pub fn handle_unhandled(&self, exception: ExceptionInfo) -> Result<()> {
        let record = LogRecord::new(
            Severity::Error,
            "Unexpected exception",
            SourceLocation::caller(),
        )
        .with_exception(exception);
        self.emit_record(record)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().is_some()
    }

    /// False only while a `reconfigure` swap is in progress
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Number of file sinks attached: 0 before initialization, 1 after.
    ///
    /// The active state owns exactly one `FileSink`, so a value above 1 is
    /// unrepresentable; `reconfigure` replaces that sink in place.
    pub fn attached_file_sinks(&self) -> usize {
        usize::from(self.state.lock().is_some())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.state.lock().as_ref().map(|a| a.log_path.clone())
    }

    pub fn threshold(&self) -> Option<Severity> {
        self.state.lock().as_ref().map(|a| a.threshold)
    }

    pub fn rotation_mode(&self) -> Option<RotationMode> {
        self.state.lock().as_ref().map(|a| a.file_sink.mode())
    }

    /// Zone deciding rotation boundaries
    pub fn rotation_zone(&self) -> Option<Zone> {
        self.state.lock().as_ref().map(|a| a.factory.rotation_zone())
    }

    /// Zone file timestamps are displayed in
    pub fn formatter_zone(&self) -> Option<Tz> {
        self.state
            .lock()
            .as_ref()
            .map(|a| a.formatter.timestamps().zone())
    }
}

/// Point the process-wide local clock at `tz`.
///
/// Mutates the environment of the whole process; callers should do this
/// during startup before other threads read the environment.
fn set_process_timezone(tz: Tz) {
    std::env::set_var("TZ", tz.name());
}
