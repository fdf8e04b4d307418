//! Panic hook integration

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::{self, PanicHookInfo};

use tzlog_core::ExceptionInfo;

use crate::facade::{emitting_on_current_thread, Logger};

/// Convert a panic into the details attached to an "Unexpected exception" record.
pub fn exception_from_panic(info: &PanicHookInfo<'_>) -> ExceptionInfo {
    let payload = info.payload();
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    };

    let thread = std::thread::current();
    let mut traceback = format!("thread '{}'", thread.name().unwrap_or("<unnamed>"));
    if let Some(location) = info.location() {
        traceback.push_str(&format!(
            " panicked at {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        traceback.push('\n');
        traceback.push_str(&backtrace.to_string());
    }

    ExceptionInfo::new("panic", message).with_traceback(traceback)
}

/// Route panics to [`Logger::handle_unhandled`].
///
/// The previously installed hook still runs whenever the logger cannot take
/// the record: not initialized yet, the file sink failed, or the panic was
/// raised by a sink while this thread was writing a record.
pub fn install_panic_hook(logger: &'static Logger) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // The state lock is still held by this thread; locking again would hang
        if emitting_on_current_thread() {
            previous(info);
            return;
        }
        if logger.handle_unhandled(exception_from_panic(info)).is_err() {
            previous(info);
        }
    }));
}
