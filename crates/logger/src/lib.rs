//! Logging infrastructure for gottem.
//!
//! Provides a cloneable, thread-safe logger handle with optional file
//! output and an in-memory ring of recent entries. The handle is created
//! once at startup and passed to whoever needs it.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Shared logger state
#[derive(Debug)]
struct LoggerState {
    /// Last N messages
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries in memory
    max_entries: usize,
    /// Minimum log level to record
    min_level: LogLevel,
    /// Log file path
    file_path: Option<PathBuf>,
}

impl LoggerState {
    /// Add entry to log
    fn add_entry(&mut self, level: LogLevel, message: String) {
        // Filter by minimum level
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();

        // Write to file (create if deleted)
        if let Some(path) = &self.file_path {
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(file, "[{}] {}: {}", timestamp, level.to_str(), message);
            }
        }

        self.entries.push_back(LogEntry {
            timestamp,
            level,
            message,
        });

        // Limit queue size
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}

/// Logger handle; clones share the same state
#[derive(Debug, Clone)]
pub struct Logger {
    state: Arc<Mutex<LoggerState>>,
}

impl Logger {
    /// Create a logger writing to `file_path`.
    ///
    /// The file is truncated and a start header written.
    pub fn new(file_path: PathBuf, max_entries: usize, min_level: LogLevel) -> Self {
        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        // Clear log file on startup
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
        {
            let _ = writeln!(file, "=== gottem log start ===");
        }

        Self::with_state(Some(file_path), max_entries, min_level)
    }

    /// Create an in-memory logger that records every level
    pub fn memory(max_entries: usize) -> Self {
        Self::with_state(None, max_entries, LogLevel::Debug)
    }

    fn with_state(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> Self {
        Self {
            state: Arc::new(Mutex::new(LoggerState {
                entries: VecDeque::new(),
                max_entries,
                min_level,
                file_path,
            })),
        }
    }

    /// Set minimum log level
    pub fn set_min_level(&self, level: LogLevel) {
        if let Ok(mut state) = self.state.lock() {
            state.min_level = level;
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.add_entry(level, message.into());
        }
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    /// Log an informational message
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    /// Log an error message
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Get all log entries currently stored in memory
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state
            .lock()
            .map(|state| state.entries.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::memory(500)
    }
}
