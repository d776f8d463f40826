use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A folder that can appear in search results.
///
/// Clones share the underlying name and path, so result lists can hold their
/// own copy without borrowing from the library snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    name: Arc<str>,
    path: Arc<PathBuf>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            path: Arc::new(path.into()),
        }
    }

    /// Candidate whose payload is its own name, for callers that only
    /// have display strings.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let path = PathBuf::from(&name);
        Self::new(name, path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read-only view of the current candidate snapshot.
pub trait CandidateSource {
    fn get_candidates(&self) -> &[Candidate];
}

impl CandidateSource for [Candidate] {
    fn get_candidates(&self) -> &[Candidate] {
        self
    }
}

impl CandidateSource for Vec<Candidate> {
    fn get_candidates(&self) -> &[Candidate] {
        self
    }
}

pub fn candidates_from_names<I, S>(names: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Candidate::named).collect()
}
