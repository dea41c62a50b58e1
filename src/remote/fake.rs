use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::models::Transaction;
use crate::remote::{RemoteError, RemoteStore};

/// In-memory stand-in for the hosted table with a switch to make every call
/// fail.
#[derive(Default)]
pub struct FakeRemote {
    rows: Mutex<Vec<Transaction>>,
    failing: AtomicBool,
    inserts: AtomicUsize,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Transaction>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Transaction> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), RemoteError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::RequestError("remote unavailable".to_string()));
        }

        Ok(())
    }
}

impl RemoteStore for FakeRemote {
    async fn fetch_all(&self) -> Result<Vec<Transaction>, RemoteError> {
        self.check()?;

        Ok(self.rows())
    }

    async fn insert(&self, transaction: &Transaction) -> Result<(), RemoteError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        if let Ok(mut rows) = self.rows.lock() {
            rows.insert(0, transaction.clone());
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RemoteError> {
        self.check()?;

        if let Ok(mut rows) = self.rows.lock() {
            rows.clear();
        }

        Ok(())
    }
}
