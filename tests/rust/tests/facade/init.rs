//! Initialization tests
//!
//! Repeated `initialize` calls are ignored on purpose: the first call's
//! parameters stay in effect for the lifetime of the logger.

use pretty_assertions::assert_eq;
use tests::console::capturing_logger;
use tests::fixtures::{read_lines, TestLogDir};
use tests::{InitOutcome, LoggerConfig, RotationMode, Severity};

#[test]
fn test_first_initialize_wins() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();
    let first = dir.log_path("first.log");
    let second = dir.log_path("second.log");

    let outcome = logger.initialize(
        LoggerConfig::default()
            .with_level("WARNING")
            .with_file_path(&first)
            .with_rotation(RotationMode::Plain),
    )?;
    assert_eq!(outcome, InitOutcome::Initialized);

    let outcome = logger.initialize(
        LoggerConfig::default()
            .with_level("DEBUG")
            .with_file_path(&second)
            .with_rotation(RotationMode::Time)
            .with_formatter_tz("UTC"),
    )?;
    assert_eq!(outcome, InitOutcome::AlreadyInitialized);

    assert_eq!(logger.log_path(), Some(first.clone()));
    assert_eq!(logger.threshold(), Some(Severity::Warning));
    assert_eq!(logger.rotation_mode(), Some(RotationMode::Plain));
    assert_eq!(logger.formatter_zone(), Some(chrono_tz::Asia::Seoul));
    assert!(!second.exists());
    Ok(())
}

#[test]
fn test_repeated_initialize_keeps_single_sink() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();

    for name in ["a.log", "b.log", "c.log"] {
        logger.initialize(LoggerConfig::default().with_file_path(dir.log_path(name)))?;
        assert_eq!(logger.attached_file_sinks(), 1);
    }

    logger.info("only once")?;
    assert_eq!(read_lines(&dir.log_path("a.log")).len(), 1);
    assert!(!dir.log_path("b.log").exists());
    assert!(!dir.log_path("c.log").exists());
    Ok(())
}

#[test]
fn test_threshold_filters_both_sinks() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, console) = capturing_logger();
    let path = dir.log_path("log.log");

    logger.initialize(
        LoggerConfig::default()
            .with_level("INFO")
            .with_file_path(&path)
            .with_rotation("time"),
    )?;

    logger.emit("DEBUG", "x")?;
    assert!(console.is_empty());
    assert!(read_lines(&path).is_empty());

    logger.emit("INFO", "y")?;
    assert_eq!(console.severities(), vec![Severity::Info]);
    assert!(console.lines()[0].ends_with(">> y"));

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\tINFO\t"));
    assert!(lines[0].ends_with("\t>> y"));
    Ok(())
}

#[test]
fn test_notset_lets_everything_through() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, console) = capturing_logger();
    logger.initialize(
        LoggerConfig::default()
            .with_level("NOTSET")
            .with_file_path(dir.log_path("all.log")),
    )?;

    logger.emit(0u32, "lowest")?;
    logger.debug("debug")?;
    logger.critical("critical")?;

    assert_eq!(
        console.severities(),
        vec![Severity::NotSet, Severity::Debug, Severity::Critical]
    );
    Ok(())
}

#[test]
fn test_unwritable_path_fails_initialize() {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();

    // The temp root is a directory, not a file
    let result = logger.initialize(LoggerConfig::default().with_file_path(dir.root()));

    assert!(matches!(result, Err(tzlog::LogError::SinkIo { .. })));
    assert!(!logger.is_initialized());
}
