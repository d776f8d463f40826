use thiserror::Error;

/// Raised when the search controller finds its own buffer state corrupt.
/// Not a user error: callers should stop instead of trying to recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid query state: offset {offset} outside query of {len} chars")]
    InvalidQueryState { offset: usize, len: usize },
}
