/// Certificate header - who, where and when
use crate::utils::platform::detect_platform;
use crate::wipe::WipeAlgorithm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateHeader {
    pub generated_at: DateTime<Utc>,
    /// Host name
    pub device_id: String,
    /// SHA-256 of host name and first hardware address
    pub machine_fingerprint: String,
    pub user_name: String,
    pub system_info: String,
    pub processor: String,
    pub algorithm: String,
    pub target: PathBuf,
}

impl CertificateHeader {
    /// Gather host details for a run of `algorithm` against `target`.
    pub fn collect(algorithm: WipeAlgorithm, target: &Path) -> Self {
        let platform = detect_platform();
        let device_id = host_name();
        Self {
            generated_at: Utc::now(),
            machine_fingerprint: machine_fingerprint(&device_id),
            device_id,
            user_name: user_name(),
            system_info: platform.description(),
            processor: platform.arch.to_string(),
            algorithm: algorithm.title().to_string(),
            target: target.to_path_buf(),
        }
    }
}

fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Stable identifier for this machine.
pub fn machine_fingerprint(host: &str) -> String {
    let mac = hardware_address().unwrap_or_else(|| "00:00:00:00:00:00".to_string());
    let mut hasher = Sha256::new();
    hasher.update(format!("{}-{}", host, mac).as_bytes());
    hex::encode(hasher.finalize())
}

/// First non-loopback interface address, Linux only.
fn hardware_address() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let mut names: Vec<_> = std::fs::read_dir("/sys/class/net")
            .ok()?
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name != "lo")
            .collect();
        // read_dir order is unspecified; keep the fingerprint stable
        names.sort();
        names.into_iter().find_map(|name| {
            std::fs::read_to_string(format!("/sys/class/net/{}/address", name))
                .ok()
                .map(|addr| addr.trim().to_string())
        })
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

fn user_name() -> String {
    #[cfg(unix)]
    {
        if let Ok(Some(user)) = nix::unistd::User::from_uid(nix::unistd::geteuid()) {
            return user.name;
        }
    }

    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}
