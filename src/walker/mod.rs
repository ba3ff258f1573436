/// Path walker - apply a wipe algorithm to every file under a root
///
/// The walk is resilient: per-file failures and unreadable subdirectories
/// become log entries, and every discovered file is attempted exactly once.
/// Only a root that cannot be reached at all fails the call.
mod discover;

pub use discover::{Discovered, discover};

use crate::error::Result;
use crate::lock::{LockGate, LockStatus};
use crate::oplog::{LogEntry, OperationLog};
use crate::wipe::{ChunkedOverwriter, WipeAlgorithm};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tracing::{info, warn};

/// Upper bound on concurrently wiped files
pub const MAX_WORKERS: usize = 64;

/// Drives lock gating and wiping across a tree.
pub struct PathWalker {
    gate: LockGate,
    overwriter: ChunkedOverwriter,
    workers: usize,
}

impl PathWalker {
    pub fn new(gate: LockGate, overwriter: ChunkedOverwriter) -> Self {
        Self {
            gate,
            overwriter,
            workers: 1,
        }
    }

    /// Wipe up to `workers` distinct files at once (clamped to 1..=64).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, MAX_WORKERS);
        self
    }

    pub fn gate(&self) -> &LockGate {
        &self.gate
    }

    /// Wipe every regular file reachable from `root`.
    ///
    /// `root` may be a directory, a mount point, or a single file.
    pub fn wipe_tree(&self, root: &Path, algorithm: WipeAlgorithm) -> Result<OperationLog> {
        let found = discover(root)?;
        let files = found.iter().filter(|d| matches!(d, Discovered::File(_))).count();
        info!(
            root = %root.display(),
            files,
            algorithm = algorithm.name(),
            workers = self.workers,
            "starting wipe"
        );

        let per_target: Vec<Vec<LogEntry>> = if self.workers > 1 && files > 1 {
            self.process_parallel(&found, algorithm)
        } else {
            found.iter().map(|item| self.process(item, algorithm)).collect()
        };

        let mut log = OperationLog::new();
        for entries in per_target {
            log.extend(entries);
        }

        let summary = log.summary();
        info!(
            wiped = summary.wiped,
            interrupted = summary.interrupted,
            failed = summary.failed,
            locked = summary.locked,
            "wipe finished"
        );
        Ok(log)
    }

    /// Gate then wipe one file.
    pub fn wipe_file(&self, path: &Path, algorithm: WipeAlgorithm) -> Vec<LogEntry> {
        let status = self.gate.check(path);
        if self.gate.decide(&status) {
            warn!(path = %path.display(), %status, "skipping locked file");
            return vec![LogEntry::locked(path, lock_reason(&status))];
        }
        algorithm.run(path, &self.overwriter)
    }

    fn process(&self, item: &Discovered, algorithm: WipeAlgorithm) -> Vec<LogEntry> {
        match item {
            Discovered::File(path) => self.wipe_file(path, algorithm),
            Discovered::Unlistable { dir, reason } => {
                vec![LogEntry::error(dir, format!("cannot list directory: {}", reason))]
            }
        }
    }

    /// Workers pull the next index; results are merged in discovery order.
    fn process_parallel(&self, found: &[Discovered], algorithm: WipeAlgorithm) -> Vec<Vec<LogEntry>> {
        let next = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<Vec<LogEntry>>>> = Mutex::new(vec![None; found.len()]);

        thread::scope(|scope| {
            for _ in 0..self.workers.min(found.len()) {
                scope.spawn(|| {
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(item) = found.get(index) else { break };
                        let entries = self.process(item, algorithm);
                        let mut guard = match slots.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        guard[index] = Some(entries);
                    }
                });
            }
        });

        let slots = match slots.into_inner() {
            Ok(slots) => slots,
            Err(poisoned) => poisoned.into_inner(),
        };
        slots
            .into_iter()
            .zip(found)
            .map(|(slot, item)| {
                slot.unwrap_or_else(|| vec![LogEntry::error(item.path(), "worker terminated before processing")])
            })
            .collect()
    }
}

fn lock_reason(status: &LockStatus) -> String {
    match status {
        LockStatus::Locked { pid } => format!("File is currently open or in use (pid {}).", pid),
        LockStatus::Unknown(reason) => format!("Lock state could not be determined: {}", reason),
        LockStatus::Unlocked => "File is currently open or in use.".to_string(),
    }
}
