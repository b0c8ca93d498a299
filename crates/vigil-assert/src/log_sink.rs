//! Append-only violation log.

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use vigil_core::{ContextRef, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Shown to the operator and raised.
    Escalated,
    /// Recorded only.
    LogOnly,
}

impl Severity {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Escalated => "VIOLATION",
            Self::LogOnly => "LOGGED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub context: ContextRef,
}

impl LogEntry {
    #[must_use]
    pub fn from_violation(violation: &Violation, severity: Severity) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: violation.message().to_string(),
            context: violation.context().clone(),
        }
    }

    /// One-line rendering: `<rfc3339> <SEVERITY> <message> [<context>]`.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} [{}]",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.severity.label(),
            self.message,
            self.context
        )
    }
}

/// Destination for every violation, escalating or not.
pub trait LogSink {
    fn append(&self, entry: &LogEntry);
}

/// Appends one line per entry to a file. Never truncates.
#[derive(Debug, Clone)]
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl LogSink for FileLogSink {
    fn append(&self, entry: &LogEntry) {
        if let Err(error) = self.write_line(&entry.to_line()) {
            // The tracing event still carries the violation.
            tracing::error!(%error, path = %self.path.display(), "failed to append to violation log");
        }
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemoryLogSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl LogSink for MemoryLogSink {
    fn append(&self, entry: &LogEntry) {
        self.entries.borrow_mut().push(entry.clone());
    }
}
