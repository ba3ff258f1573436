/// Linux open-file detection via /proc/<pid>/fd
use super::{LockStatus, OpenFileInspector};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Walks every numeric entry of the proc root and resolves its fd links.
///
/// Processes whose fd table cannot be read (permissions, exited mid-scan)
/// are skipped. Only an unreadable proc root makes the result `Unknown`.
#[derive(Debug, Clone)]
pub struct ProcFsInspector {
    proc_root: PathBuf,
}

impl ProcFsInspector {
    /// Inspector over an alternative proc root (used by tests).
    pub fn with_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    /// First pid whose fd table contains `target`.
    fn find_holder(&self, target: &Path) -> std::io::Result<Option<u32>> {
        let mut skipped = 0usize;

        for entry in fs::read_dir(&self.proc_root)? {
            let Ok(entry) = entry else { continue };
            let name = entry.file_name();
            let pid: u32 = match name.to_string_lossy().parse() {
                Ok(p) if p > 0 => p,
                _ => continue,
            };

            let fd_dir = self.proc_root.join(&name).join("fd");
            let fds = match fs::read_dir(&fd_dir) {
                Ok(fds) => fds,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            for fd in fds.flatten() {
                if let Ok(link) = fs::read_link(fd.path()) {
                    if link == target {
                        return Ok(Some(pid));
                    }
                }
            }
        }

        trace!(skipped, "processes with unreadable fd tables");
        Ok(None)
    }
}

impl Default for ProcFsInspector {
    fn default() -> Self {
        Self::with_root("/proc")
    }
}

impl OpenFileInspector for ProcFsInspector {
    fn inspect(&self, path: &Path) -> LockStatus {
        // fd links are absolute and fully resolved
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        match self.find_holder(&target) {
            Ok(Some(pid)) => LockStatus::Locked { pid },
            Ok(None) => LockStatus::Unlocked,
            Err(e) => LockStatus::Unknown(format!(
                "cannot read {}: {}",
                self.proc_root.display(),
                e
            )),
        }
    }
}
