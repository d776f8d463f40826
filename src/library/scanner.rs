use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::candidate::Candidate;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("library folder {} does not exist", .0.display())]
    MissingRoot(PathBuf),
    #[error("failed to read library folder {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of scanning a set of library roots. Roots that could not be read
/// are reported, the rest still contribute candidates.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub candidates: Vec<Candidate>,
    pub failures: Vec<LibraryError>,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lists the immediate sub-folders of every root.
///
/// Roots keep their configured order; folders inside a root are sorted by
/// case-folded name. Symlinks to folders count as folders.
pub fn scan_folders(roots: &[PathBuf], hide_hidden: bool) -> ScanReport {
    let mut report = ScanReport::default();
    for root in roots {
        match list_folders(root, hide_hidden) {
            Ok(mut folders) => {
                tracing::debug!(root = %root.display(), folders = folders.len(), "scanned library root");
                report.candidates.append(&mut folders);
            }
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "library root skipped");
                report.failures.push(err);
            }
        }
    }
    report
}

/// Sorted sub-folders of `dir`.
pub fn list_folders(dir: &Path, hide_hidden: bool) -> Result<Vec<Candidate>, LibraryError> {
    list_entries(dir, hide_hidden, EntryKind::Folder)
}

/// Sorted files of `dir`, anything that is not a folder.
pub fn list_files(dir: &Path, hide_hidden: bool) -> Result<Vec<Candidate>, LibraryError> {
    list_entries(dir, hide_hidden, EntryKind::File)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Folder,
    File,
}

fn list_entries(
    dir: &Path,
    hide_hidden: bool,
    wanted: EntryKind,
) -> Result<Vec<Candidate>, LibraryError> {
    if !dir.exists() {
        return Err(LibraryError::MissingRoot(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir).map_err(|source| LibraryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut listed: Vec<(String, Candidate)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "directory entry skipped");
                continue;
            }
        };
        let kind = if is_folder(&entry) {
            EntryKind::Folder
        } else {
            EntryKind::File
        };
        if kind != wanted {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if hide_hidden && name.starts_with('.') {
            continue;
        }
        listed.push((name.to_lowercase(), Candidate::new(name, entry.path())));
    }

    listed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name().cmp(b.1.name())));
    Ok(listed.into_iter().map(|(_, candidate)| candidate).collect())
}

fn is_folder(entry: &fs::DirEntry) -> bool {
    let ft = match entry.file_type() {
        Ok(ft) => ft,
        Err(err) => {
            tracing::debug!(path = %entry.path().display(), error = %err, "unknown entry type");
            return false;
        }
    };
    if ft.is_symlink() {
        fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false)
    } else {
        ft.is_dir()
    }
}
