/// Deterministic discovery of wipe targets
use crate::error::{Result, WipeError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Something found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovered {
    /// Regular file to wipe
    File(PathBuf),
    /// Directory whose listing failed; its subtree is skipped
    Unlistable { dir: PathBuf, reason: String },
}

impl Discovered {
    pub fn path(&self) -> &Path {
        match self {
            Discovered::File(path) => path,
            Discovered::Unlistable { dir, .. } => dir,
        }
    }
}

/// List every regular file under `root`, depth-first, names sorted per level.
///
/// Symlinks below the root are never followed and non-regular files are
/// ignored. A symlinked root is resolved once. A root that is a regular file
/// yields just itself. Fails if the root is missing, cannot be read, or is
/// neither a file nor a directory.
pub fn discover(root: &Path) -> Result<Vec<Discovered>> {
    let meta = root.symlink_metadata().map_err(|e| root_error(root, e))?;
    if meta.file_type().is_symlink() {
        let resolved = fs::canonicalize(root).map_err(|e| root_error(root, e))?;
        debug!(root = %root.display(), resolved = %resolved.display(), "resolved symlinked root");
        return discover_resolved(&resolved);
    }
    discover_resolved(root)
}

fn discover_resolved(root: &Path) -> Result<Vec<Discovered>> {
    let meta = root.symlink_metadata().map_err(|e| root_error(root, e))?;

    if meta.is_file() {
        return Ok(vec![Discovered::File(root.to_path_buf())]);
    }
    if !meta.is_dir() {
        return Err(WipeError::Aborted(format!(
            "{} is neither a regular file nor a directory",
            root.display()
        )));
    }

    let listing = list_sorted(root).map_err(|e| root_error(root, e))?;
    let mut found = Vec::new();
    visit(listing, &mut found);
    Ok(found)
}

fn visit(listing: Vec<(PathBuf, fs::FileType)>, found: &mut Vec<Discovered>) {
    for (path, file_type) in listing {
        if file_type.is_file() {
            found.push(Discovered::File(path));
        } else if file_type.is_dir() {
            match list_sorted(&path) {
                Ok(children) => visit(children, found),
                Err(e) => {
                    warn!(dir = %path.display(), error = %e, "skipping unreadable directory");
                    found.push(Discovered::Unlistable {
                        dir: path,
                        reason: e.to_string(),
                    });
                }
            }
        } else {
            debug!(path = %path.display(), "skipping non-regular entry");
        }
    }
}

fn list_sorted(dir: &Path) -> io::Result<Vec<(PathBuf, fs::FileType)>> {
    let listing = fs::read_dir(dir)?.map(|entry| -> io::Result<(PathBuf, fs::FileType)> {
        let entry = entry?;
        // file_type() does not follow symlinks
        Ok((entry.path(), entry.file_type()?))
    });
    let mut entries = keep_readable(dir, listing);
    entries.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
    Ok(entries)
}

/// Drop entries that vanished or could not be read, keeping their siblings.
fn keep_readable<T>(dir: &Path, listing: impl IntoIterator<Item = io::Result<T>>) -> Vec<T> {
    listing
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .collect()
}

fn root_error(root: &Path, e: io::Error) -> WipeError {
    if e.kind() == io::ErrorKind::NotFound {
        WipeError::RootNotFound(root.to_path_buf())
    } else {
        WipeError::RootInaccessible {
            path: root.to_path_buf(),
            source: e,
        }
    }
}
