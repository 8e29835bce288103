//! Error types and error handling.

mod types;


pub use types::{StoreError, TokenError};

use thiserror::Error;

/// Umbrella error for code that talks to both layers
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type CoreResult<T> = Result<T, CoreError>;
