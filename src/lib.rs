/// Erasure - multi-pass secure file wiping
///
/// Overwrites files in place with a standard pass sequence, syncing every
/// chunk to disk, removes them, and records each step in an operation log
/// that is rendered as a certificate of erasure.
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod lock;
pub mod oplog;
pub mod report;
pub mod scan;
pub mod utils;
pub mod walker;
pub mod wipe;
