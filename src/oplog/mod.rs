/// Operation log - ordered audit trail of a wipe run
pub mod entry;

pub use entry::{EventKind, LogEntry};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Final state of one target, derived from its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// All passes done and the entry removed
    Wiped,
    /// Some passes completed, then a failure: content altered, file still present
    Interrupted { passes_completed: usize },
    /// Failed before any pass completed
    Failed,
    /// Skipped by the lock gate
    Locked,
}

/// Counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub wiped: usize,
    pub interrupted: usize,
    pub failed: usize,
    pub locked: usize,
}

impl Summary {
    /// Any target left on disk: failed, interrupted or skipped as locked.
    pub fn has_failures(&self) -> bool {
        self.interrupted > 0 || self.failed > 0 || self.locked > 0
    }
}

/// Append-only sequence of entries owned by a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLog {
    entries: Vec<LogEntry>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded for `target`, in order.
    pub fn entries_for<'a>(&'a self, target: &'a Path) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| e.target == target)
    }

    /// Outcome per target, in first-seen order.
    pub fn outcomes(&self) -> Vec<(PathBuf, FileOutcome)> {
        let mut order: Vec<PathBuf> = Vec::new();
        let mut state: HashMap<&Path, (usize, Option<FileOutcome>)> = HashMap::new();

        for entry in &self.entries {
            let slot = state.entry(entry.target.as_path()).or_insert_with(|| {
                order.push(entry.target.clone());
                (0, None)
            });
            match entry.event {
                EventKind::PassCompleted => slot.0 += 1,
                EventKind::Deleted => slot.1 = Some(FileOutcome::Wiped),
                EventKind::Locked => slot.1 = Some(FileOutcome::Locked),
                EventKind::Error => {
                    slot.1 = Some(if slot.0 > 0 {
                        FileOutcome::Interrupted {
                            passes_completed: slot.0,
                        }
                    } else {
                        FileOutcome::Failed
                    })
                }
            }
        }

        order
            .into_iter()
            .map(|path| {
                let outcome = state
                    .get(path.as_path())
                    .and_then(|(passes, outcome)| match outcome {
                        Some(o) => Some(*o),
                        // passes without a terminal entry never happens in a
                        // finished run; report it as interrupted
                        None if *passes > 0 => Some(FileOutcome::Interrupted {
                            passes_completed: *passes,
                        }),
                        None => None,
                    })
                    .unwrap_or(FileOutcome::Failed);
                (path, outcome)
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for (_, outcome) in self.outcomes() {
            match outcome {
                FileOutcome::Wiped => summary.wiped += 1,
                FileOutcome::Interrupted { .. } => summary.interrupted += 1,
                FileOutcome::Failed => summary.failed += 1,
                FileOutcome::Locked => summary.locked += 1,
            }
        }
        summary
    }
}

impl IntoIterator for OperationLog {
    type Item = LogEntry;
    type IntoIter = std::vec::IntoIter<LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_distinguish_interrupted_from_wiped() {
        let a = Path::new("/data/a");
        let b = Path::new("/data/b");
        let c = Path::new("/data/c");
        let d = Path::new("/data/d");

        let mut log = OperationLog::new();
        log.push(LogEntry::pass_completed(a, "Pass 1", "x"));
        log.push(LogEntry::deleted(a));
        log.push(LogEntry::pass_completed(b, "Pass 1", "x"));
        log.push(LogEntry::pass_completed(b, "Pass 2", "x"));
        log.push(LogEntry::error(b, "write failed"));
        log.push(LogEntry::error(c, "permission denied"));
        log.push(LogEntry::locked(d, "in use"));

        let outcomes = log.outcomes();
        assert_eq!(
            outcomes,
            vec![
                (a.to_path_buf(), FileOutcome::Wiped),
                (b.to_path_buf(), FileOutcome::Interrupted { passes_completed: 2 }),
                (c.to_path_buf(), FileOutcome::Failed),
                (d.to_path_buf(), FileOutcome::Locked),
            ]
        );

        let summary = log.summary();
        assert_eq!(summary.wiped, 1);
        assert_eq!(summary.interrupted, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.locked, 1);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_locked_only_run_is_not_clean() {
        let mut log = OperationLog::new();
        log.push(LogEntry::pass_completed(Path::new("/a"), "Pass 1", "x"));
        log.push(LogEntry::deleted(Path::new("/a")));
        log.push(LogEntry::locked(Path::new("/b"), "in use"));

        let summary = log.summary();
        assert_eq!(summary.failed + summary.interrupted, 0);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_entries_for_keeps_order() {
        let a = Path::new("/a");
        let mut log = OperationLog::new();
        log.push(LogEntry::pass_completed(a, "Pass 1", "1"));
        log.push(LogEntry::error(Path::new("/b"), "e"));
        log.push(LogEntry::pass_completed(a, "Pass 2", "2"));

        let labels: Vec<_> = log.entries_for(a).map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Pass 1", "Pass 2"]);
    }

    #[test]
    fn test_empty_log() {
        let log = OperationLog::new();
        assert!(log.is_empty());
        assert!(log.outcomes().is_empty());
        assert!(!log.summary().has_failures());
    }
}
