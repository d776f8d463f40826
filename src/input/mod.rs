pub mod search_input;

pub use search_input::{SearchInput, SearchState, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Handled,
    NotHandled,
}
