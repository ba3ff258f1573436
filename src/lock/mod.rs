/// Lock gate - refuse to wipe files another process holds open
///
/// Detection is advisory: a file opened right after the check is not caught.
/// Backends per platform:
/// - Linux: scan of `/proc/<pid>/fd`
/// - Windows: Restart Manager session
/// - elsewhere: no capability, every query is `Unknown`
#[cfg(target_os = "linux")]
pub mod procfs;
#[cfg(windows)]
pub mod windows;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Result of inspecting a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockStatus {
    /// No inspected process holds the path open
    Unlocked,
    /// Held open by the given process
    Locked { pid: u32 },
    /// Inspection capability missing or failed as a whole
    Unknown(String),
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockStatus::Unlocked => write!(f, "not in use"),
            LockStatus::Locked { pid } => write!(f, "open in process {}", pid),
            LockStatus::Unknown(reason) => write!(f, "lock state unknown ({})", reason),
        }
    }
}

/// How an `Unknown` status is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockPolicy {
    /// Unknown counts as locked; the file is skipped
    #[default]
    FailClosed,
    /// Unknown counts as unlocked; the file is wiped
    FailOpen,
}

/// Platform capability: who has this path open?
pub trait OpenFileInspector: Send + Sync {
    fn inspect(&self, path: &Path) -> LockStatus;
}

/// Inspector for platforms without process/handle enumeration.
#[derive(Debug, Default)]
pub struct UnsupportedInspector;

impl OpenFileInspector for UnsupportedInspector {
    fn inspect(&self, _path: &Path) -> LockStatus {
        LockStatus::Unknown(format!(
            "open-file inspection is not supported on {}",
            std::env::consts::OS
        ))
    }
}

/// Precondition check run before every wipe.
pub struct LockGate {
    inspector: Box<dyn OpenFileInspector>,
    policy: LockPolicy,
}

impl LockGate {
    /// Gate backed by the platform's native inspector.
    pub fn new(policy: LockPolicy) -> Self {
        Self::with_inspector(platform_inspector(), policy)
    }

    pub fn with_inspector(inspector: Box<dyn OpenFileInspector>, policy: LockPolicy) -> Self {
        Self { inspector, policy }
    }

    pub fn policy(&self) -> LockPolicy {
        self.policy
    }

    /// Raw three-way status.
    pub fn check(&self, path: &Path) -> LockStatus {
        self.inspector.inspect(path)
    }

    /// Whether the wipe must be skipped, with `Unknown` resolved by policy.
    pub fn is_locked(&self, path: &Path) -> bool {
        self.decide(&self.check(path))
    }

    pub fn decide(&self, status: &LockStatus) -> bool {
        match status {
            LockStatus::Unlocked => false,
            LockStatus::Locked { .. } => true,
            LockStatus::Unknown(_) => self.policy == LockPolicy::FailClosed,
        }
    }
}

impl Default for LockGate {
    fn default() -> Self {
        Self::new(LockPolicy::default())
    }
}

/// Native inspector for the current platform.
pub fn platform_inspector() -> Box<dyn OpenFileInspector> {
    #[cfg(target_os = "linux")]
    {
        Box::new(procfs::ProcFsInspector::default())
    }

    #[cfg(windows)]
    {
        Box::new(windows::RestartManagerInspector)
    }

    #[cfg(not(any(target_os = "linux", windows)))]
    {
        Box::new(UnsupportedInspector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(LockStatus);

    impl OpenFileInspector for Fixed {
        fn inspect(&self, _path: &Path) -> LockStatus {
            self.0.clone()
        }
    }

    #[test]
    fn test_policy_resolves_unknown() {
        let unknown = || Box::new(Fixed(LockStatus::Unknown("no /proc".into())));

        let closed = LockGate::with_inspector(unknown(), LockPolicy::FailClosed);
        assert!(closed.is_locked(Path::new("/x")));

        let open = LockGate::with_inspector(unknown(), LockPolicy::FailOpen);
        assert!(!open.is_locked(Path::new("/x")));
    }

    #[test]
    fn test_known_states_ignore_policy() {
        for policy in [LockPolicy::FailClosed, LockPolicy::FailOpen] {
            let locked = LockGate::with_inspector(Box::new(Fixed(LockStatus::Locked { pid: 7 })), policy);
            assert!(locked.is_locked(Path::new("/x")));

            let free = LockGate::with_inspector(Box::new(Fixed(LockStatus::Unlocked)), policy);
            assert!(!free.is_locked(Path::new("/x")));
        }
    }

    #[test]
    fn test_unsupported_reports_unknown() {
        let status = UnsupportedInspector.inspect(Path::new("/x"));
        assert!(matches!(status, LockStatus::Unknown(_)));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LockStatus::Locked { pid: 42 }.to_string(), "open in process 42");
    }
}
