pub mod config;
pub mod scanner;

use std::path::PathBuf;

use crate::core::candidate::{Candidate, CandidateSource};

pub use config::{ConfigError, LibraryConfig};
pub use scanner::{LibraryError, ScanReport, list_files, list_folders, scan_folders};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Movies,
    TvShows,
}

impl LibraryKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Movies => "Search Movies",
            Self::TvShows => "Search TV Shows",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Movies => Self::TvShows,
            Self::TvShows => Self::Movies,
        }
    }
}

/// One kind of library: its roots and the latest folder snapshot.
#[derive(Debug)]
pub struct FolderLibrary {
    kind: LibraryKind,
    roots: Vec<PathBuf>,
    hide_hidden: bool,
    candidates: Vec<Candidate>,
}

impl FolderLibrary {
    pub fn new(kind: LibraryKind, roots: Vec<PathBuf>, hide_hidden: bool) -> Self {
        Self {
            kind,
            roots,
            hide_hidden,
            candidates: Vec::new(),
        }
    }

    pub fn from_config(kind: LibraryKind, config: &LibraryConfig) -> Self {
        let roots = match kind {
            LibraryKind::Movies => config.movie_dirs.clone(),
            LibraryKind::TvShows => config.tv_dirs.clone(),
        };
        Self::new(kind, roots, config.hide_hidden)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn is_configured(&self) -> bool {
        !self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Replaces the snapshot with a fresh scan. Returns the failed roots.
    pub fn rescan(&mut self) -> Vec<LibraryError> {
        let report = scan_folders(&self.roots, self.hide_hidden);
        tracing::info!(
            library = ?self.kind,
            folders = report.candidates.len(),
            failures = report.failures.len(),
            "library scanned"
        );
        self.candidates = report.candidates;
        report.failures
    }
}

impl CandidateSource for FolderLibrary {
    fn get_candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}
