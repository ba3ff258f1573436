/// Configuration loader
use super::schema::Config;
use crate::error::{Result, WipeError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load configuration.
///
/// An explicit path must exist. Without one, `<executable>.config` next to
/// the binary is used if present, otherwise built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => adjacent_config_path().filter(|p| p.is_file()),
    };

    let config = match path {
        Some(path) => load_config_file(&path)?,
        None => {
            debug!("no config file found, using defaults");
            Config::default()
        }
    };

    config.validate().map_err(WipeError::Config)?;
    Ok(config)
}

/// Parse a JSON config file without validating it.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        WipeError::Config(format!("failed to read config file {}: {}", path.display(), e))
    })?;

    let config: Config = serde_json::from_str(&content)
        .map_err(|e| WipeError::Config(format!("failed to parse {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// `<executable>.config`, e.g. "erasure.config"
fn adjacent_config_path() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    Some(PathBuf::from(format!("{}.config", exe_path.display())))
}
