//! FILENAME: core/grid-preview/src/error.rs

use grid_persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Render error: {0}")]
    Render(String),
}
