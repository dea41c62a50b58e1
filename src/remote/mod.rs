mod connectivity;
mod errors;
#[cfg(test)]
pub(crate) mod fake;
mod rest_client;
#[cfg(test)]
mod tests;

use std::future::Future;
use std::sync::Arc;

use crate::models::Transaction;

pub use connectivity::Connectivity;
pub use errors::RemoteError;
pub use rest_client::{RemoteConfig, RestRemote};

/// The hosted `transactions` table.
pub trait RemoteStore: Send + Sync + 'static {
    /// Every record, newest first.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Transaction>, RemoteError>> + Send;
    fn insert(&self, transaction: &Transaction) -> impl Future<Output = Result<(), RemoteError>> + Send;
    fn delete_all(&self) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

impl<T: RemoteStore> RemoteStore for Arc<T> {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Transaction>, RemoteError>> + Send {
        (**self).fetch_all()
    }

    fn insert(&self, transaction: &Transaction) -> impl Future<Output = Result<(), RemoteError>> + Send {
        (**self).insert(transaction)
    }

    fn delete_all(&self) -> impl Future<Output = Result<(), RemoteError>> + Send {
        (**self).delete_all()
    }
}
