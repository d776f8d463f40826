pub mod app;
pub mod core;
pub mod input;
pub mod library;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use crate::core::candidate::{Candidate, CandidateSource};
pub use crate::core::error::SearchError;
pub use crate::core::search::autocomplete;
pub use crate::core::search::{HighlightRange, MAX_RESULTS, MatchResult, ResultList, find_matches};
pub use crate::input::{SearchInput, SearchState, Selection};
