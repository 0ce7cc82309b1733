//! Structured run log.
//!
//! [`RunLog`] is the append-only record of everything a run did: one entry
//! per executed command plus warnings and the abort record when a run goes
//! down. Records are kept in memory behind a lock and mirrored to `tracing`
//! as they arrive, so live output and the exported log always agree.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LogLevel
// ---------------------------------------------------------------------------

/// Severity of a run log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// A command ran and reported success.
    Info,
    /// A command failed without taking the run down.
    Warn,
    /// The run aborted.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// LogRecord
// ---------------------------------------------------------------------------

/// One timestamped run log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Severity.
    pub level: LogLevel,
    /// What happened, in display form.
    pub message: String,
    /// Document the record concerns, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// When the record was appended.
    pub at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// RunLog
// ---------------------------------------------------------------------------

/// Append-only, thread-shareable log of one run.
#[derive(Debug, Default)]
pub struct RunLog {
    records: RwLock<Vec<LogRecord>>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and mirror it to the `tracing` subscriber.
    pub fn append(&self, level: LogLevel, message: impl Into<String>, file: Option<String>) {
        let message = message.into();
        match level {
            LogLevel::Info => tracing::info!(file = file.as_deref(), "{message}"),
            LogLevel::Warn => tracing::warn!(file = file.as_deref(), "{message}"),
            LogLevel::Error => tracing::error!(file = file.as_deref(), "{message}"),
        }
        self.records.write().push(LogRecord {
            level,
            message,
            file,
            at: Utc::now(),
        });
    }

    pub fn info(&self, message: impl Into<String>, file: Option<String>) {
        self.append(LogLevel::Info, message, file);
    }

    pub fn warn(&self, message: impl Into<String>, file: Option<String>) {
        self.append(LogLevel::Warn, message, file);
    }

    pub fn error(&self, message: impl Into<String>, file: Option<String>) {
        self.append(LogLevel::Error, message, file);
    }

    /// Snapshot of every record appended so far, in append order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.read().clone()
    }

    /// Number of records at the given severity.
    pub fn count(&self, level: LogLevel) -> usize {
        self.records.read().iter().filter(|r| r.level == level).count()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Serialize the full log as pretty JSON for export alongside run
    /// artifacts.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.records.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_append_in_order() {
        let log = RunLog::new();
        log.info("first", None);
        log.warn("second", Some("a.txt".into()));
        log.info("third", None);

        let records = log.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].level, LogLevel::Warn);
        assert_eq!(records[1].file.as_deref(), Some("a.txt"));
        assert_eq!(records[2].message, "third");
    }

    #[test]
    fn counts_by_level() {
        let log = RunLog::new();
        log.info("ok", None);
        log.info("ok again", None);
        log.warn("miss", None);
        log.error("boom", None);

        assert_eq!(log.count(LogLevel::Info), 2);
        assert_eq!(log.count(LogLevel::Warn), 1);
        assert_eq!(log.count(LogLevel::Error), 1);
        assert_eq!(log.len(), 4);
        assert!(!log.is_empty());
    }

    #[test]
    fn json_export_omits_absent_file() {
        let log = RunLog::new();
        log.info("no file here", None);

        let json = log.to_json().unwrap();
        assert!(json.contains("\"no file here\""));
        assert!(!json.contains("\"file\""));

        let back: Vec<LogRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert!(back[0].file.is_none());
    }

    #[test]
    fn levels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
        assert_eq!(LogLevel::Error.to_string(), "error");
    }
}
