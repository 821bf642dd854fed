use std::fmt::Display;

use thiserror::Error;

/// Every failure a follow operation can surface, from configuration at
/// startup through to a single graph query.
#[derive(Debug, Error)]
pub enum FollowersError {
    #[error("configuration error: {0}")]
    Config(String),

    /// The graph store could not be reached or rejected a statement.
    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Bad client input, such as a non-numeric user id.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl FollowersError {
    /// Wrap a driver error; for use with `map_err`.
    pub fn database(err: impl Display) -> Self {
        Self::Database(err.to_string())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

pub type FollowersResult<T> = Result<T, FollowersError>;
