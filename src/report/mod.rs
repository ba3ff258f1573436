/// Report module - certificates of erasure built from an operation log
pub mod header;
pub mod text;

pub use header::CertificateHeader;
pub use text::render_text;

use crate::error::{Result, WipeError};
use crate::oplog::{FileOutcome, LogEntry, OperationLog, Summary};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Machine-readable certificate layout
#[derive(Debug, Serialize)]
pub struct JsonCertificate<'a> {
    pub header: &'a CertificateHeader,
    pub entries: &'a [LogEntry],
    pub outcomes: Vec<OutcomeRecord>,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct OutcomeRecord {
    pub target: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

pub fn render_json(header: &CertificateHeader, log: &OperationLog) -> serde_json::Result<String> {
    let certificate = JsonCertificate {
        header,
        entries: log.entries(),
        outcomes: log
            .outcomes()
            .into_iter()
            .map(|(target, outcome)| OutcomeRecord { target, outcome })
            .collect(),
        summary: log.summary(),
    };
    serde_json::to_string_pretty(&certificate)
}

/// Write the text certificate to `path`, creating parent directories.
pub fn write_text_certificate(path: &Path, header: &CertificateHeader, log: &OperationLog) -> Result<()> {
    write_file(path, &render_text(header, log))
}

/// Write the JSON certificate to `path`, creating parent directories.
pub fn write_json_certificate(path: &Path, header: &CertificateHeader, log: &OperationLog) -> Result<()> {
    let json = render_json(header, log).map_err(|e| WipeError::Certificate {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    let to_error = |source: std::io::Error| WipeError::Certificate {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}
