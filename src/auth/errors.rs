use thiserror::Error;

use crate::storage::CacheError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter both name and key")]
    MissingCredentials,
    #[error("Invalid name or key")]
    InvalidCredentials,
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("Access key list is malformed: {0}")]
    MalformedKeyList(String),
    #[error("Session storage error: {0}")]
    Storage(#[from] CacheError),
}
