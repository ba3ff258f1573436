/// Single audit record produced while wiping
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PassCompleted,
    Locked,
    Deleted,
    Error,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::PassCompleted => "pass completed",
            EventKind::Locked => "locked",
            EventKind::Deleted => "deleted",
            EventKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// One append-only log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub target: PathBuf,
    pub event: EventKind,
    /// Short label such as "Pass 2" or "Deleted"
    pub label: String,
    /// Pass digest, deletion timestamp, lock reason or error text
    pub detail: String,
    pub recorded_at: DateTime<Utc>,
}

impl LogEntry {
    fn new(target: &Path, event: EventKind, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            target: target.to_path_buf(),
            event,
            label: label.into(),
            detail: detail.into(),
            recorded_at: Utc::now(),
        }
    }

    pub fn pass_completed(target: &Path, label: impl Into<String>, digest: impl Into<String>) -> Self {
        Self::new(target, EventKind::PassCompleted, label, digest)
    }

    /// Deletion record; the detail is the completion timestamp.
    pub fn deleted(target: &Path) -> Self {
        let now = Utc::now();
        Self {
            target: target.to_path_buf(),
            event: EventKind::Deleted,
            label: "Deleted".to_string(),
            detail: now.to_rfc3339(),
            recorded_at: now,
        }
    }

    pub fn locked(target: &Path, reason: impl Into<String>) -> Self {
        Self::new(target, EventKind::Locked, "Locked", reason)
    }

    pub fn error(target: &Path, message: impl Into<String>) -> Self {
        Self::new(target, EventKind::Error, "Error", message)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}: {}", self.target.display(), self.label, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_line() {
        let entry = LogEntry::pass_completed(Path::new("/tmp/a.txt"), "Pass 1", "abc123");
        assert_eq!(entry.to_string(), "/tmp/a.txt - Pass 1: abc123");
    }

    #[test]
    fn test_deleted_detail_is_timestamp() {
        let entry = LogEntry::deleted(Path::new("/tmp/a.txt"));
        assert_eq!(entry.event, EventKind::Deleted);
        let parsed = DateTime::parse_from_rfc3339(&entry.detail).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), entry.recorded_at);
    }

    #[test]
    fn test_serde_shape() {
        let entry = LogEntry::locked(Path::new("/tmp/b"), "in use");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"], "Locked");
        assert_eq!(json["target"], "/tmp/b");
        assert_eq!(json["detail"], "in use");
    }
}
