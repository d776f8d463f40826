use std::path::{Path, PathBuf};

use crate::app::command::Command;
use crate::core::candidate::Candidate;
use crate::core::error::SearchError;
use crate::core::search::{MAX_RESULTS, ResultList, find_matches};
use crate::input::SearchInput;
use crate::library::{
    FolderLibrary, LibraryConfig, LibraryError, LibraryKind, list_files, list_folders,
};
use crate::ui::search_view::SearchView;

/// Display name of the row that leads back from a season to its show.
pub const UP_ROW: &str = "..";

/// Where the TV surface is browsing. Movies always stay at `Root`.
#[derive(Debug, Default)]
enum Level {
    /// Search results over the library snapshot.
    #[default]
    Root,
    /// Seasons (sub-folders) of one show.
    Show { show: Candidate, rows: ResultList },
    /// Up row followed by the episodes (files) of one season.
    Season {
        show: Candidate,
        location: String,
        rows: ResultList,
    },
}

pub struct AppState {
    movies: FolderLibrary,
    tv_shows: FolderLibrary,
    active: LibraryKind,
    search: SearchInput,
    level: Level,
    hide_hidden: bool,
    selected: usize,
    notice: Option<String>,
    chosen: Option<PathBuf>,
    pub should_exit: bool,
}

impl AppState {
    pub fn new(config: &LibraryConfig) -> Self {
        let movies = FolderLibrary::from_config(LibraryKind::Movies, config);
        let tv_shows = FolderLibrary::from_config(LibraryKind::TvShows, config);
        let active = if movies.is_configured() || !tv_shows.is_configured() {
            LibraryKind::Movies
        } else {
            LibraryKind::TvShows
        };

        Self {
            movies,
            tv_shows,
            active,
            search: SearchInput::new().with_limit(config.max_results),
            level: Level::Root,
            hide_hidden: config.hide_hidden,
            selected: 0,
            notice: None,
            chosen: None,
            should_exit: false,
        }
    }

    /// Scans every configured library and opens the search surface.
    pub fn load(&mut self) {
        let mut failures = self.movies.rescan();
        failures.extend(self.tv_shows.rescan());
        self.notice = notice_for(&failures);
        self.open(self.active);
    }

    pub fn active(&self) -> LibraryKind {
        self.active
    }

    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Folder or episode picked with Enter, if any.
    pub fn chosen(&self) -> Option<&Path> {
        self.chosen.as_deref()
    }

    /// Whether the TV surface is browsing inside a show.
    pub fn is_browsing(&self) -> bool {
        !matches!(self.level, Level::Root)
    }

    /// Rows currently listed: search results at the root, folder contents
    /// below it.
    pub fn rows(&self) -> &ResultList {
        match &self.level {
            Level::Root => self.search.results(),
            Level::Show { rows, .. } | Level::Season { rows, .. } => rows,
        }
    }

    pub fn library(&self) -> &FolderLibrary {
        match self.active {
            LibraryKind::Movies => &self.movies,
            LibraryKind::TvShows => &self.tv_shows,
        }
    }

    fn library_mut(&mut self) -> &mut FolderLibrary {
        match self.active {
            LibraryKind::Movies => &mut self.movies,
            LibraryKind::TvShows => &mut self.tv_shows,
        }
    }

    /// Shows the search surface for `kind` with a fresh, idle query.
    pub fn open(&mut self, kind: LibraryKind) {
        self.active = kind;
        self.level = Level::Root;
        let library = match kind {
            LibraryKind::Movies => &self.movies,
            LibraryKind::TvShows => &self.tv_shows,
        };
        self.search.reset(library);
        self.selected = 0;
        tracing::info!(library = ?kind, folders = library.len(), "search opened");
    }

    /// Applies `command`. Returns whether the screen needs repainting.
    pub fn reduce(&mut self, command: Command) -> Result<bool, SearchError> {
        match command {
            Command::Quit => {
                self.should_exit = true;
                Ok(false)
            }
            Command::Dismiss => {
                match std::mem::take(&mut self.level) {
                    Level::Root => {}
                    Level::Show { .. } => {
                        self.selected = 0;
                        return Ok(true);
                    }
                    Level::Season { show, .. } => {
                        self.enter_show(show);
                        return Ok(true);
                    }
                }
                if self.search.query().is_empty() {
                    self.should_exit = true;
                    return Ok(false);
                }
                self.open(self.active);
                Ok(true)
            }
            Command::Choose => Ok(self.choose()),
            Command::MoveSelection(delta) => {
                let last = self.rows().len().saturating_sub(1);
                let next = self.selected.saturating_add_signed(delta).min(last);
                let changed = next != self.selected;
                self.selected = next;
                Ok(changed)
            }
            Command::SwitchLibrary => {
                self.open(self.active.other());
                Ok(true)
            }
            Command::Rescan => {
                self.level = Level::Root;
                let failures = self.library_mut().rescan();
                self.notice = notice_for(&failures);
                let library = match self.active {
                    LibraryKind::Movies => &self.movies,
                    LibraryKind::TvShows => &self.tv_shows,
                };
                self.search.refresh(library);
                self.clamp_selection();
                Ok(true)
            }
            Command::InputKey(key) => {
                let library = match self.active {
                    LibraryKind::Movies => &self.movies,
                    LibraryKind::TvShows => &self.tv_shows,
                };
                let before = self.search.revision();
                self.search.handle_key(key, library)?;
                if self.search.revision() != before {
                    self.level = Level::Root;
                    self.selected = 0;
                }
                Ok(true)
            }
        }
    }

    fn choose(&mut self) -> bool {
        let Some(item) = self.rows().get(self.selected) else {
            return false;
        };
        let candidate = item.candidate.clone();

        match std::mem::take(&mut self.level) {
            Level::Root if self.active == LibraryKind::TvShows => {
                self.enter_show(candidate);
                true
            }
            Level::Root => {
                self.finish(candidate.path());
                false
            }
            Level::Show { show, rows } => {
                match list_files(candidate.path(), self.hide_hidden) {
                    Ok(files) => {
                        let location = format!("{} / {}", show.name(), candidate.name());
                        let mut entries = Vec::with_capacity(files.len() + 1);
                        entries.push(Candidate::new(UP_ROW, show.path()));
                        entries.extend(files);
                        tracing::debug!(season = %candidate.path().display(), files = entries.len() - 1, "season opened");
                        self.level = Level::Season {
                            show,
                            location,
                            rows: find_matches("", &entries, MAX_RESULTS),
                        };
                        self.selected = 0;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "season listing failed");
                        self.notice = Some(err.to_string());
                        self.level = Level::Show { show, rows };
                    }
                }
                true
            }
            Level::Season { show, .. } if self.selected == 0 => {
                self.enter_show(show);
                true
            }
            Level::Season { .. } => {
                self.finish(candidate.path());
                false
            }
        }
    }

    /// Lists the seasons of `show`. On failure the surface returns to the
    /// search results with the error as notice.
    fn enter_show(&mut self, show: Candidate) {
        self.selected = 0;
        match list_folders(show.path(), self.hide_hidden) {
            Ok(seasons) => {
                tracing::debug!(show = %show.path().display(), seasons = seasons.len(), "show opened");
                let rows = find_matches("", &seasons, MAX_RESULTS);
                self.level = Level::Show { show, rows };
            }
            Err(err) => {
                tracing::warn!(error = %err, "show listing failed");
                self.notice = Some(err.to_string());
                self.level = Level::Root;
            }
        }
    }

    fn finish(&mut self, path: &Path) {
        tracing::info!(path = %path.display(), "entry chosen");
        self.chosen = Some(path.to_path_buf());
        self.should_exit = true;
    }

    pub fn view(&self) -> SearchView<'_> {
        let (location, total) = match &self.level {
            Level::Root => (None, Some(self.library().len())),
            Level::Show { show, .. } => (Some(show.name()), None),
            Level::Season { location, .. } => (Some(location.as_str()), None),
        };
        SearchView {
            title: self.active.title(),
            location,
            input: &self.search,
            results: self.rows(),
            total,
            selected: self.selected,
            notice: self.notice.as_deref(),
        }
    }

    fn clamp_selection(&mut self) {
        let last = self.rows().len().saturating_sub(1);
        self.selected = self.selected.min(last);
    }
}

fn notice_for(failures: &[LibraryError]) -> Option<String> {
    match failures {
        [] => None,
        [only] => Some(only.to_string()),
        [first, rest @ ..] => Some(format!("{first} (and {} more)", rest.len())),
    }
}
