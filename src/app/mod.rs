pub mod command;
pub mod runtime;
pub mod state;

use thiserror::Error;

use crate::core::error::SearchError;
use crate::library::ConfigError;

pub use runtime::Runtime;
pub use state::AppState;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Search(#[from] SearchError),
}
