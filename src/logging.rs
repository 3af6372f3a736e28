//! `log` backend for the binary
//!
//! Records go to stderr, except while the full-screen interface owns the
//! terminal: then they are buffered and the transcript pane drains them.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Mutex;

struct SessionLogger {
    captured: Mutex<Option<Vec<String>>>,
}

static LOGGER: SessionLogger = SessionLogger {
    captured: Mutex::new(None),
};

impl Log for SessionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.level(), record.args());
        match self.captured.lock() {
            Ok(mut guard) => match guard.as_mut() {
                Some(buffer) => buffer.push(line),
                None => eprintln!("{}", line),
            },
            Err(_) => eprintln!("{}", line),
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Start buffering records instead of writing them to stderr
pub fn start_capture() {
    if let Ok(mut guard) = LOGGER.captured.lock() {
        guard.get_or_insert_with(Vec::new);
    }
}

/// Take the records buffered so far, leaving capture on
pub fn drain_captured() -> Vec<String> {
    match LOGGER.captured.lock() {
        Ok(mut guard) => guard.as_mut().map(std::mem::take).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

/// Stop buffering and return whatever was not drained yet
pub fn stop_capture() -> Vec<String> {
    match LOGGER.captured.lock() {
        Ok(mut guard) => guard.take().unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_buffers_records() {
        // Only this test installs the logger in the unit test binary
        let _ = init(LevelFilter::Info);
        start_capture();
        log::info!("hello");
        log::debug!("filtered out");
        let drained = drain_captured();
        assert!(drained.contains(&"[INFO] hello".to_string()));
        assert!(!drained.iter().any(|l| l.contains("filtered out")));

        log::warn!("later");
        let rest = stop_capture();
        assert!(rest.contains(&"[WARN] later".to_string()));
        assert!(drain_captured().is_empty());
    }
}
