//! Command-line interface for erasure.
//!
//! Uses clap derive macros for the command tree; the flow that turns a
//! command into a wipe run lives in `run`.

pub mod prompt;
pub mod run;

use crate::wipe::WipeAlgorithm;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Erasure: multi-pass secure file wiping with a certificate of erasure.
///
/// Files are overwritten in place with a standard pass sequence, synced to
/// disk after every chunk, then removed. Every pass, skip and failure is
/// recorded in the certificate.
#[derive(Parser, Debug)]
#[command(name = "erasure")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON config file (default: <executable>.config if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wipe a specific file.
    ///
    /// Refuses files held open by another process and asks again when
    /// sensitive keywords are found in the content.
    File(WipeArgs),

    /// Wipe every file in a folder, recursively.
    Folder(WipeArgs),

    /// Wipe every file on a mounted drive (asks for confirmation twice).
    Drive(WipeArgs),

    /// Report whether a file is currently held open.
    CheckLock {
        /// File to inspect
        path: PathBuf,
    },

    /// Create a credential block for the config file.
    HashPassword,
}

/// Options shared by the wipe commands.
#[derive(Args, Debug, Clone)]
pub struct WipeArgs {
    /// File, folder or mount point to wipe
    pub target: PathBuf,

    /// three-pass (DoD 5220.22-M), single-pass (random) or gutmann35
    #[arg(short, long)]
    pub algorithm: Option<WipeAlgorithm>,

    /// Number of files wiped concurrently
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Where to write the text certificate
    #[arg(long, value_name = "PATH")]
    pub certificate: Option<PathBuf>,

    /// Also write a JSON certificate
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Skip all confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,
}
