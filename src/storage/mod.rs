mod errors;
mod file_store;
mod memory_store;
#[cfg(test)]
mod tests;
mod transaction_cache;

pub use errors::CacheError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use transaction_cache::TransactionCache;

/// Slot holding the JSON encoded transaction list.
pub const TRANSACTIONS_KEY: &str = "pfandTransactions_shared";
/// Slot holding the lower-cased name of the logged-in user.
pub const USER_KEY: &str = "pfand_user";
/// Slot holding the selected theme.
pub const THEME_KEY: &str = "pfand-theme";

/// Synchronous string slots on the local machine.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    /// Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}
