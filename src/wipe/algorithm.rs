/// Multi-pass wipe algorithms expressed as pass sequences
use super::overwrite::ChunkedOverwriter;
use super::pattern::PatternKind;
use crate::error::{Result, WipeError};
use crate::oplog::LogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// One pass of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSpec {
    pub pattern: PatternKind,
    /// 1-based position within the algorithm
    pub index: u32,
}

/// Supported wipe standards.
///
/// They differ only in the pass sequence; all I/O goes through
/// [`ChunkedOverwriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WipeAlgorithm {
    /// DoD 5220.22-M: zeros, ones, random
    #[default]
    ThreePass,
    /// Single random overwrite
    SinglePass,
    /// Gutmann-style 35 random passes
    Gutmann35,
}

impl WipeAlgorithm {
    pub const ALL: [WipeAlgorithm; 3] = [
        WipeAlgorithm::ThreePass,
        WipeAlgorithm::SinglePass,
        WipeAlgorithm::Gutmann35,
    ];

    /// Config / CLI name
    pub fn name(&self) -> &'static str {
        match self {
            WipeAlgorithm::ThreePass => "three-pass",
            WipeAlgorithm::SinglePass => "single-pass",
            WipeAlgorithm::Gutmann35 => "gutmann35",
        }
    }

    /// Human-readable title for certificates
    pub fn title(&self) -> &'static str {
        match self {
            WipeAlgorithm::ThreePass => "DoD 5220.22-M (3-pass)",
            WipeAlgorithm::SinglePass => "Simple Random Overwrite (1-pass)",
            WipeAlgorithm::Gutmann35 => "Gutmann (35-pass)",
        }
    }

    /// Ordered pass sequence.
    pub fn passes(&self) -> Vec<PassSpec> {
        let patterns: Vec<PatternKind> = match self {
            WipeAlgorithm::ThreePass => vec![PatternKind::Zero, PatternKind::One, PatternKind::Random],
            WipeAlgorithm::SinglePass => vec![PatternKind::Random],
            WipeAlgorithm::Gutmann35 => vec![PatternKind::Random; 35],
        };
        patterns
            .into_iter()
            .zip(1u32..)
            .map(|(pattern, index)| PassSpec { pattern, index })
            .collect()
    }

    /// Label recorded for a completed pass.
    pub fn pass_label(&self, pass: &PassSpec) -> String {
        match self {
            WipeAlgorithm::ThreePass => format!("Pass {}", pass.index),
            WipeAlgorithm::SinglePass => "Random Pass".to_string(),
            WipeAlgorithm::Gutmann35 => format!("Gutmann Pass {}", pass.index),
        }
    }

    /// Overwrite `path` with every pass, then remove it.
    ///
    /// Never fails: on the first error the sequence stops and a single
    /// `Error` entry is appended. Completed passes are not undone.
    pub fn run(&self, path: &Path, overwriter: &ChunkedOverwriter) -> Vec<LogEntry> {
        let mut entries = Vec::with_capacity(self.passes().len() + 1);
        if let Err(e) = self.execute(path, overwriter, &mut entries) {
            warn!(path = %path.display(), passes_done = entries.len(), error = %e, "wipe failed");
            entries.push(LogEntry::error(path, e.to_string()));
        }
        entries
    }

    fn execute(&self, path: &Path, overwriter: &ChunkedOverwriter, entries: &mut Vec<LogEntry>) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(WipeError::Open)?;

        // Length is fixed for the whole run
        let total_len = file.metadata().map_err(WipeError::Metadata)?.len();
        let passes = self.passes();
        info!(path = %path.display(), bytes = total_len, algorithm = self.name(), "wiping file");

        for pass in &passes {
            let report = overwriter.overwrite_pass(&mut file, total_len, pass.pattern)?;
            debug!(
                path = %path.display(),
                pass = pass.index,
                of = passes.len(),
                pattern = %pass.pattern,
                chunks = report.chunks,
                "pass completed"
            );
            entries.push(LogEntry::pass_completed(path, self.pass_label(pass), report.digest));
        }

        drop(file);
        fs::remove_file(path).map_err(WipeError::Remove)?;
        entries.push(LogEntry::deleted(path));
        info!(path = %path.display(), "file wiped and removed");
        Ok(())
    }
}

impl fmt::Display for WipeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WipeAlgorithm {
    type Err = String;

    /// Case-insensitive; accepts the config names plus a few aliases.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "three-pass" | "threepass" | "dod" | "3" => Ok(WipeAlgorithm::ThreePass),
            "single-pass" | "singlepass" | "random" | "1" => Ok(WipeAlgorithm::SinglePass),
            "gutmann35" | "gutmann" | "35" => Ok(WipeAlgorithm::Gutmann35),
            other => Err(format!(
                "unknown algorithm '{}' (expected three-pass, single-pass or gutmann35)",
                other
            )),
        }
    }
}
