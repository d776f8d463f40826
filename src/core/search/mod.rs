pub mod autocomplete;
pub mod matcher;
pub mod normalize;

pub use matcher::{HighlightRange, MAX_RESULTS, MatchResult, ResultList, find_matches};
pub use normalize::{Normalized, normalize};
