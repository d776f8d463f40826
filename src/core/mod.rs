pub mod candidate;
pub mod error;
pub mod search;
