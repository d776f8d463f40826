pub mod frame;
pub mod search_view;
pub mod span;
pub mod style;
