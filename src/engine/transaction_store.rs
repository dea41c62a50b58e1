use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::actors::{ReplicationActor, ReplicationCommand};
use crate::engine::errors::StoreError;
use crate::models::Transaction;
use crate::remote::{Connectivity, RemoteStore};
use crate::storage::{KeyValueStore, TransactionCache};

/// Local cache first, remote second.
///
/// Every write lands in the local cache before the call returns; the remote
/// copy is brought up to date by a background `ReplicationActor`. Reads prefer
/// the remote and overwrite the cache with what it returns. Without a remote
/// the store runs local-only and reports itself offline.
pub struct TransactionStore<K: KeyValueStore, R: RemoteStore> {
    cache: TransactionCache<K>,
    remote: Option<Arc<R>>,
    replication: Option<ReplicationActor>,
    connectivity: Arc<Connectivity>,
}

impl<K: KeyValueStore, R: RemoteStore> TransactionStore<K, R> {
    /// Creates the store. With a remote this spawns the replication actor, so
    /// it must be called from within a Tokio runtime.
    pub fn new(store: Arc<K>, remote: Option<R>) -> Self {
        let connectivity = Arc::new(Connectivity::new(remote.is_some()));
        let remote = remote.map(Arc::new);
        let replication = remote
            .as_ref()
            .map(|remote| ReplicationActor::new(remote.clone(), connectivity.clone()));

        Self {
            cache: TransactionCache::new(store),
            remote,
            replication,
            connectivity,
        }
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// The full history, newest first.
    ///
    /// Queued replication is flushed first so the remote sees this session's
    /// writes before it is read back.
    pub async fn load(&self) -> Result<Vec<Transaction>, StoreError> {
        let Some(remote) = &self.remote else {
            self.connectivity.set_online(false);
            return Ok(self.cache.read()?);
        };

        if let Some(replication) = &self.replication {
            if !replication.flush().await {
                error!("Replication actor stopped before the remote load");
            }
        }

        match remote.fetch_all().await {
            Ok(transactions) => {
                if let Err(error) = self.cache.write(&transactions) {
                    warn!("Could not refresh the local cache: {error}");
                }

                self.connectivity.set_online(true);
                debug!("Loaded {} transactions from the remote store", transactions.len());

                Ok(transactions)
            }
            Err(error) => {
                warn!("Error loading from the remote store, using the local cache: {error}");
                self.connectivity.set_online(false);

                Ok(self.cache.read()?)
            }
        }
    }

    /// Records `transaction` locally and queues it for the remote store.
    pub fn append(&self, transaction: Transaction) -> Result<(), StoreError> {
        self.cache.prepend(transaction.clone())?;

        match &self.replication {
            Some(replication) => {
                let transaction_id = transaction.id.clone();

                if !replication.accept(ReplicationCommand::Insert(transaction)) {
                    error!("Replication actor could not accept transaction [{transaction_id}]");
                    self.connectivity.set_online(false);
                }
            }
            None => self.connectivity.set_online(false),
        }

        Ok(())
    }

    /// Empties the local cache and queues a remote delete of every row.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        self.cache.clear()?;

        if let Some(replication) = &self.replication {
            if !replication.accept(ReplicationCommand::DeleteAll) {
                error!("Replication actor could not accept the remote clear");
            }
        }

        Ok(())
    }

    /// Waits for queued remote writes to finish.
    pub async fn shutdown(self) -> Result<(), StoreError> {
        if let Some(replication) = self.replication {
            replication.despawn().await.map_err(|error| StoreError::Replication(error.to_string()))?;
        }

        Ok(())
    }
}
