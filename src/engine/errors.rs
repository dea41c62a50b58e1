use thiserror::Error;

use crate::auth::AuthError;
use crate::models::LedgerError;
use crate::storage::CacheError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Local cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("Replication task failed: {0}")]
    Replication(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CacheError> for AppError {
    fn from(error: CacheError) -> Self {
        AppError::Store(StoreError::Cache(error))
    }
}
