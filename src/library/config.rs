use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::search::MAX_RESULTS;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no movie or TV folders configured; pass --movies/--tv or add them to the config file")]
    Empty,
}

/// Library folders and search settings, read from a JSON file.
///
/// ```json
/// { "movie_dirs": ["/mnt/media/movies"], "tv_dirs": ["/mnt/media/tv"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub movie_dirs: Vec<PathBuf>,
    pub tv_dirs: Vec<PathBuf>,
    pub max_results: usize,
    pub hide_hidden: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            movie_dirs: Vec::new(),
            tv_dirs: Vec::new(),
            max_results: MAX_RESULTS,
            hide_hidden: true,
        }
    }
}

impl LibraryConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Like [`LibraryConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.max_results = config.max_results.clamp(1, MAX_RESULTS);
        Ok(config)
    }

    /// Adds folders and settings given on the command line.
    pub fn merge_cli(
        &mut self,
        movie_dirs: impl IntoIterator<Item = PathBuf>,
        tv_dirs: impl IntoIterator<Item = PathBuf>,
        limit: Option<usize>,
    ) {
        self.movie_dirs.extend(movie_dirs);
        self.tv_dirs.extend(tv_dirs);
        if let Some(limit) = limit {
            self.max_results = limit.clamp(1, MAX_RESULTS);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.movie_dirs.is_empty() && self.tv_dirs.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(())
    }
}
