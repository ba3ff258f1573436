/// Host platform description for certificates
use std::env::consts;

/// Operating system and CPU the tool runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub os: &'static str,
    pub family: &'static str,
    pub arch: &'static str,
}

/// Detect current platform
pub fn detect_platform() -> PlatformInfo {
    PlatformInfo {
        os: consts::OS,
        family: consts::FAMILY,
        arch: consts::ARCH,
    }
}

impl PlatformInfo {
    /// Short target-style name, e.g. "linux-x86_64"
    pub fn name(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }

    /// OS line for the certificate header
    pub fn description(&self) -> String {
        match os_release() {
            Some(release) => format!("{} ({}, {})", release, self.name(), self.family),
            None => format!("{} ({})", self.name(), self.family),
        }
    }
}

/// Distribution name from /etc/os-release, if any.
fn os_release() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        content
            .lines()
            .find_map(|line| line.strip_prefix("PRETTY_NAME="))
            .map(|v| v.trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}
