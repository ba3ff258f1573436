/// Configuration schema for erasure runs
use crate::auth::CredentialConfig;
use crate::lock::LockPolicy;
use crate::walker::MAX_WORKERS;
use crate::wipe::{DEFAULT_CHUNK_SIZE, WipeAlgorithm};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const MIN_CHUNK_SIZE: usize = 4 * 1024;
const MAX_CHUNK_SIZE: usize = 256 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Algorithm used when the command line does not pick one
    #[serde(default)]
    pub algorithm: WipeAlgorithm,

    /// Bytes generated, written and synced per step
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// What to do when open-file inspection is unavailable
    #[serde(default)]
    pub lock_policy: LockPolicy,

    /// Files wiped concurrently (1 = strictly sequential)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Text certificate of erasure
    #[serde(default = "default_certificate_path")]
    pub certificate_path: PathBuf,

    /// Optional machine-readable certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_certificate_path: Option<PathBuf>,

    /// Credential gate; no gate when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<CredentialConfig>,

    /// Words that trigger an extra confirmation before a single-file wipe
    #[serde(default = "default_sensitive_keywords")]
    pub sensitive_keywords: Vec<String>,

    /// How much of a file the keyword scan reads
    #[serde(default = "default_scan_limit")]
    pub scan_limit_bytes: u64,
}

/// Compile-time chunk size from `.env` wins over the built-in default
pub fn default_chunk_size() -> usize {
    option_env!("ERASURE_CHUNK_SIZE")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CHUNK_SIZE)
}

fn default_workers() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_certificate_path() -> PathBuf {
    PathBuf::from("certificate_of_erasure.log")
}

fn default_sensitive_keywords() -> Vec<String> {
    ["password", "confidential", "ssn", "credit card", "secret", "private", "classified"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_scan_limit() -> u64 {
    64 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: WipeAlgorithm::default(),
            chunk_size: default_chunk_size(),
            lock_policy: LockPolicy::default(),
            workers: default_workers(),
            log_level: default_log_level(),
            certificate_path: default_certificate_path(),
            json_certificate_path: None,
            credential: None,
            sensitive_keywords: default_sensitive_keywords(),
            scan_limit_bytes: default_scan_limit(),
        }
    }
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(format!(
                "chunk_size must be between {} and {} bytes, got {}",
                MIN_CHUNK_SIZE, MAX_CHUNK_SIZE, self.chunk_size
            ));
        }

        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(format!("workers must be between 1 and {}", MAX_WORKERS));
        }

        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(format!("unknown log_level '{}'", self.log_level));
        }

        if self.certificate_path.as_os_str().is_empty() {
            return Err("certificate_path cannot be empty".to_string());
        }

        if let Some(credential) = &self.credential {
            credential.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.chunk_size = 10;
        assert!(config.validate().is_err());

        config.chunk_size = DEFAULT_CHUNK_SIZE;
        config.workers = 0;
        assert!(config.validate().is_err());

        config.workers = 4;
        config.log_level = "chatty".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.algorithm, WipeAlgorithm::ThreePass);
        assert_eq!(config.lock_policy, LockPolicy::FailClosed);
        assert_eq!(config.workers, 1);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.certificate_path, PathBuf::from("certificate_of_erasure.log"));
        assert!(config.credential.is_none());
        assert!(config.sensitive_keywords.contains(&"credit card".to_string()));
    }

    #[test]
    fn test_explicit_values() {
        let json = r#"{
            "algorithm": "gutmann35",
            "chunk_size": 1048576,
            "lock_policy": "fail-open",
            "workers": 4,
            "json_certificate_path": "out/cert.json"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.algorithm, WipeAlgorithm::Gutmann35);
        assert_eq!(config.chunk_size, 1024 * 1024);
        assert_eq!(config.lock_policy, LockPolicy::FailOpen);
        assert_eq!(config.workers, 4);
        assert_eq!(config.json_certificate_path, Some(PathBuf::from("out/cert.json")));
        assert!(config.validate().is_ok());
    }
}
