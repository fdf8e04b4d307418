//! Emission tests: level resolution, routing and record layout

use chrono::{DateTime, Duration};
use pretty_assertions::assert_eq;
use std::io;
use tests::console::capturing_logger;
use tests::fixtures::{read_lines, utc, TestLogDir};
use tests::{LoggerConfig, RotationMode, Severity};
use tzlog::{ExceptionInfo, LogError, LogRecord, SourceLocation};

fn plain_config(dir: &TestLogDir, name: &str) -> LoggerConfig {
    LoggerConfig::default()
        .with_level("NOTSET")
        .with_file_path(dir.log_path(name))
        .with_rotation(RotationMode::Plain)
}

/// Level and message columns of a file line
fn level_and_message(line: &str) -> (String, String) {
    let columns: Vec<&str> = line.split('\t').collect();
    (columns[1].to_string(), columns[3].to_string())
}

#[test]
fn test_names_and_numbers_route_identically() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, console) = capturing_logger();
    let path = dir.log_path("levels.log");
    logger.initialize(plain_config(&dir, "levels.log"))?;

    let table: [(&str, u32); 7] = [
        ("CRITICAL", 50),
        ("FATAL", 50),
        ("ERROR", 40),
        ("WARNING", 30),
        ("INFO", 20),
        ("DEBUG", 10),
        ("NOTSET", 0),
    ];
    for (name, value) in table {
        logger.emit(name, "same")?;
        logger.emit(value, "same")?;
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), table.len() * 2);
    for pair in lines.chunks(2) {
        assert_eq!(level_and_message(&pair[0]), level_and_message(&pair[1]));
    }

    let severities = console.severities();
    for pair in severities.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
    assert_eq!(severities[0], Severity::Critical);
    assert_eq!(severities[2], Severity::Critical);
    Ok(())
}

#[test]
fn test_invalid_level_name_writes_nothing() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, console) = capturing_logger();
    let path = dir.log_path("invalid.log");
    logger.initialize(plain_config(&dir, "invalid.log"))?;

    let result = logger.emit("LOUD", "should not appear");

    assert!(matches!(result, Err(LogError::InvalidLevelName(ref name)) if name == "LOUD"));
    assert!(console.is_empty());
    assert!(read_lines(&path).is_empty());
    Ok(())
}

#[test]
fn test_non_standard_number_rounds_down() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, console) = capturing_logger();
    logger.initialize(plain_config(&dir, "numeric.log"))?;

    logger.emit(25u32, "between info and warning")?;

    assert_eq!(console.severities(), vec![Severity::Info]);
    Ok(())
}

#[test]
fn test_method_location_is_caller() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, console) = capturing_logger();
    let path = dir.log_path("location.log");
    logger.initialize(plain_config(&dir, "location.log"))?;

    let line = line!() + 1;
    logger.warning("from a method")?;

    let expected = format!("[emission.rs:?:{}]", line);
    assert!(read_lines(&path)[0].contains(&expected));
    assert_eq!(
        console.lines()[0],
        format!("[emission.rs:{}] >> from a method", line)
    );
    Ok(())
}

#[test]
fn test_macros_capture_module_and_format_args() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();
    let path = dir.log_path("macros.log");
    logger.initialize(plain_config(&dir, "macros.log"))?;

    let attempt = 3;
    tzlog::error!(logger, "retry {} of {}", attempt, 5)?;
    tzlog::log!(logger, "DEBUG", "named level {}", "ok")?;
    let invalid = tzlog::log!(logger, "CHATTY", "dropped");

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\tERROR\t[emission.rs:facade::emission:"));
    assert!(lines[0].ends_with(">> retry 3 of 5"));
    assert!(lines[1].ends_with(">> named level ok"));
    assert!(matches!(invalid, Err(LogError::InvalidLevelName(_))));
    Ok(())
}

#[test]
fn test_exception_attaches_error_details() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, console) = capturing_logger();
    let path = dir.log_path("exception.log");
    logger.initialize(plain_config(&dir, "exception.log"))?;

    let err = io::Error::new(io::ErrorKind::Other, "disk full");
    logger.exception("write failed", &err)?;

    let lines = read_lines(&path);
    assert!(lines[0].contains("\tERROR\t"));
    assert!(lines[0].ends_with(">> write failed"));
    assert!(lines[1].ends_with(": disk full"));
    assert_eq!(console.severities(), vec![Severity::Error]);
    assert!(console.lines()[0].contains("disk full"));
    Ok(())
}

#[test]
fn test_handle_unhandled_emits_error() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();
    let path = dir.log_path("unhandled.log");
    logger.initialize(
        LoggerConfig::default()
            .with_level("CRITICAL")
            .with_file_path(dir.log_path("unhandled.log")),
    )?;

    // Below the CRITICAL threshold, so filtered like any other ERROR
    logger.handle_unhandled(ExceptionInfo::new("ValueError", "bad input"))?;
    assert!(read_lines(&path).is_empty());

    let (logger, _console) = capturing_logger();
    let path = dir.log_path("unhandled-2.log");
    logger.initialize(plain_config(&dir, "unhandled-2.log"))?;
    logger.handle_unhandled(
        ExceptionInfo::new("ValueError", "bad input").with_traceback("at worker.rs:12"),
    )?;

    let lines = read_lines(&path);
    assert!(lines[0].contains("\tERROR\t"));
    assert!(lines[0].ends_with(">> Unexpected exception"));
    assert_eq!(
        lines[1..].to_vec(),
        vec!["ValueError: bad input".to_string(), "at worker.rs:12".to_string()]
    );
    Ok(())
}

#[test]
fn test_formatter_timezone_changes_display_only() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let created = utc("2024-05-01T12:34:56.789Z");
    let location = SourceLocation::new("src/job.rs", "app::job", 1);

    let mut stamps = Vec::new();
    for (name, tz) in [("utc.log", "UTC"), ("seoul.log", "Asia/Seoul")] {
        let (logger, _console) = capturing_logger();
        logger.initialize(plain_config(&dir, name).with_formatter_tz(tz))?;
        logger.emit_record(
            LogRecord::new(Severity::Info, "tick", location).with_created(created),
        )?;

        assert_eq!(logger.rotation_zone(), Some(tzlog::Zone::Local));
        let line = read_lines(&dir.log_path(name)).remove(0);
        let stamp = line[1..line.find(']').unwrap()].to_string();
        stamps.push(stamp);
    }

    assert_eq!(stamps[0], "2024-05-01T12:34:56.789+00:00");
    assert_eq!(stamps[1], "2024-05-01T21:34:56.789+09:00");

    let a = DateTime::parse_from_rfc3339(&stamps[0])?;
    let b = DateTime::parse_from_rfc3339(&stamps[1])?;
    assert_eq!(a, b);
    assert_eq!(b.naive_local() - a.naive_local(), Duration::hours(9));
    Ok(())
}

#[test]
fn test_custom_date_pattern() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();
    logger.initialize(
        plain_config(&dir, "pattern.log")
            .with_formatter_tz("Europe/London")
            .with_date_pattern("%d/%m/%Y %H:%M"),
    )?;

    logger.emit_record(
        LogRecord::new(Severity::Info, "summer", SourceLocation::caller())
            .with_created(utc("2024-07-01T08:15:00Z")),
    )?;

    let line = read_lines(&dir.log_path("pattern.log")).remove(0);
    assert!(line.starts_with("[01/07/2024 09:15]\tINFO\t"));
    Ok(())
}

#[test]
fn test_invalid_date_pattern_fails_initialize() {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();

    let result = logger.initialize(plain_config(&dir, "p.log").with_date_pattern("%Q"));

    assert!(matches!(result, Err(LogError::InvalidPattern(_))));
    assert!(!logger.is_initialized());
}

#[test]
fn test_non_ascii_round_trips() -> anyhow::Result<()> {
    let dir = TestLogDir::new();
    let (logger, _console) = capturing_logger();
    let path = dir.log_path("utf8.log");
    logger.initialize(plain_config(&dir, "utf8.log"))?;

    logger.info("사용자 로그인 성공 · ünïcødé ✓")?;

    assert!(read_lines(&path)[0].ends_with(">> 사용자 로그인 성공 · ünïcødé ✓"));
    Ok(())
}
