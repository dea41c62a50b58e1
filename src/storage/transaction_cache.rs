use std::sync::Arc;

use crate::models::Transaction;
use crate::storage::{CacheError, KeyValueStore, TRANSACTIONS_KEY};

/// Typed access to the transaction list slot.
pub struct TransactionCache<K: KeyValueStore> {
    store: Arc<K>,
}

impl<K: KeyValueStore> TransactionCache<K> {
    pub fn new(store: Arc<K>) -> Self {
        Self { store }
    }

    /// The cached list, newest first. An empty slot reads as an empty list.
    pub fn read(&self) -> Result<Vec<Transaction>, CacheError> {
        match self.store.get(TRANSACTIONS_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| CacheError::Corrupt {
                key: TRANSACTIONS_KEY.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    pub fn write(&self, transactions: &[Transaction]) -> Result<(), CacheError> {
        let json = serde_json::to_string(transactions).map_err(|source| CacheError::Encode {
            key: TRANSACTIONS_KEY.to_string(),
            source,
        })?;

        self.store.set(TRANSACTIONS_KEY, &json)
    }

    /// Puts `transaction` at the head of the cached list.
    pub fn prepend(&self, transaction: Transaction) -> Result<(), CacheError> {
        let mut transactions = self.read()?;
        transactions.insert(0, transaction);

        self.write(&transactions)
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(TRANSACTIONS_KEY)
    }
}
