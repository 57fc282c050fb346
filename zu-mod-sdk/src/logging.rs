//! Logging API.
//!
//! Mods log through the engine's `core` interface. Code that should be testable
//! without a host takes `&impl Logger` and is handed [`HostLogger`] at the export
//! boundary and [`MemoryLogger`] in tests.

use std::cell::RefCell;
use std::fmt;

use crate::bindings::zu::engine::core as host;

/// Severity of a log line, matching the functions of the `core` interface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

/// Sink for mod log lines.
pub trait Logger {
    fn log(&self, level: Level, text: &str);

    fn trace(&self, text: &str) {
        self.log(Level::Trace, text);
    }

    fn debug(&self, text: &str) {
        self.log(Level::Debug, text);
    }

    fn info(&self, text: &str) {
        self.log(Level::Info, text);
    }

    fn warn(&self, text: &str) {
        self.log(Level::Warn, text);
    }

    fn error(&self, text: &str) {
        self.log(Level::Error, text);
    }
}

/// Forwards every line to the engine.
#[derive(Copy, Clone, Debug, Default)]
pub struct HostLogger;

impl Logger for HostLogger {
    fn log(&self, level: Level, text: &str) {
        match level {
            Level::Trace => host::trace(text),
            Level::Debug => host::debug(text),
            Level::Info => host::info(text),
            Level::Warn => host::warn(text),
            Level::Error => host::error(text),
        }
    }
}

/// One captured line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub level: Level,
    pub text: String,
}

/// Keeps every line in memory instead of sending it anywhere.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: RefCell<Vec<Record>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Number of lines logged at exactly `level`.
    pub fn count(&self, level: Level) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level == level)
            .count()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, text: &str) {
        self.records.borrow_mut().push(Record {
            level,
            text: text.to_owned(),
        });
    }
}

/// Log at trace level through the engine.
pub fn trace(text: &str) {
    HostLogger.trace(text);
}

/// Log at debug level through the engine.
pub fn debug(text: &str) {
    HostLogger.debug(text);
}

/// Log at info level through the engine.
pub fn info(text: &str) {
    HostLogger.info(text);
}

/// Log at warn level through the engine.
pub fn warn(text: &str) {
    HostLogger.warn(text);
}

/// Log at error level through the engine.
pub fn error(text: &str) {
    HostLogger.error(text);
}
