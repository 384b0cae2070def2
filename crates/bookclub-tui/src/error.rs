//! Error types for bookclub-tui.

use bookclub_core::AppError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Missing or invalid connection settings.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] AppError),
}

pub type TuiResult<T> = Result<T, TuiError>;

impl From<bookclub_core::error::StorageError> for TuiError {
    fn from(err: bookclub_core::error::StorageError) -> Self {
        TuiError::Core(err.into())
    }
}

impl From<bookclub_core::error::ApiError> for TuiError {
    fn from(err: bookclub_core::error::ApiError) -> Self {
        TuiError::Core(err.into())
    }
}
