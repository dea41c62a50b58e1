use super::{CacheError, FileStore, KeyValueStore, MemoryStore, THEME_KEY, TRANSACTIONS_KEY, TransactionCache, USER_KEY};
use crate::models::Transaction;
use anyhow::{Result, anyhow};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

fn sample_transactions() -> Result<Vec<Transaction>> {
    let created_at = Utc.with_ymd_and_hms(2024, 10, 17, 12, 0, 0).single().ok_or_else(|| anyhow!("invalid date"))?;

    Ok(vec![
        Transaction::withdrawal("3".to_string(), created_at, Decimal::from_str("1.13")?, 5, Some("evan".to_string())),
        Transaction::deposit("2".to_string(), created_at, 12, Some("theo".to_string())),
        Transaction::deposit("1".to_string(), created_at, 1, None),
    ])
}

#[test]
fn test_file_store_basic_get_set_and_remove() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let store = FileStore::open(directory.path().join("data"))?;

    assert!(store.get(USER_KEY)?.is_none());

    store.set(USER_KEY, "theo")?;
    store.set(THEME_KEY, "dark")?;

    assert_eq!(store.get(USER_KEY)?.as_deref(), Some("theo"));
    assert_eq!(store.get(THEME_KEY)?.as_deref(), Some("dark"));

    store.remove(USER_KEY)?;

    assert!(store.get(USER_KEY)?.is_none());
    assert_eq!(store.get(THEME_KEY)?.as_deref(), Some("dark"));

    Ok(())
}

#[test]
fn test_file_store_removing_a_missing_slot_succeeds() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let store = FileStore::open(directory.path())?;

    store.remove(TRANSACTIONS_KEY)?;

    Ok(())
}

#[test]
fn test_file_store_persists_across_instances() -> Result<()> {
    let directory = tempfile::tempdir()?;

    FileStore::open(directory.path())?.set(USER_KEY, "ronon")?;

    let reopened = FileStore::open(directory.path())?;

    assert_eq!(reopened.get(USER_KEY)?.as_deref(), Some("ronon"));

    Ok(())
}

#[test]
fn test_file_store_rejects_path_like_slot_names() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let store = FileStore::open(directory.path())?;

    assert!(matches!(store.set("../escape", "x"), Err(CacheError::InvalidKey(_))));
    assert!(matches!(store.get(""), Err(CacheError::InvalidKey(_))));

    Ok(())
}

#[test]
fn test_memory_store_enforces_overwrite_semantics() -> Result<()> {
    let store = MemoryStore::new();

    store.set(THEME_KEY, "light")?;
    store.set(THEME_KEY, "dark")?;

    assert_eq!(store.get(THEME_KEY)?.as_deref(), Some("dark"));
    assert_eq!(store.len(), 1);

    store.remove(THEME_KEY)?;
    store.remove(THEME_KEY)?;

    assert!(store.is_empty());

    Ok(())
}

#[test]
fn test_transaction_cache_round_trips_through_files() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let transactions = sample_transactions()?;

    TransactionCache::new(Arc::new(FileStore::open(directory.path())?)).write(&transactions)?;

    let reloaded = TransactionCache::new(Arc::new(FileStore::open(directory.path())?)).read()?;

    assert_eq!(reloaded, transactions);

    Ok(())
}

#[test]
fn test_transaction_cache_reads_missing_slot_as_empty() -> Result<()> {
    let cache = TransactionCache::new(Arc::new(MemoryStore::new()));

    assert!(cache.read()?.is_empty());

    Ok(())
}

#[test]
fn test_transaction_cache_prepends_newest_first() -> Result<()> {
    let cache = TransactionCache::new(Arc::new(MemoryStore::new()));
    let mut transactions = sample_transactions()?;
    let newest = transactions.remove(0);

    cache.write(&transactions)?;
    cache.prepend(newest.clone())?;

    let cached = cache.read()?;

    assert_eq!(cached.len(), 3);
    assert_eq!(cached[0], newest);

    Ok(())
}

#[test]
fn test_transaction_cache_reports_corrupt_json() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    store.set(TRANSACTIONS_KEY, "not json")?;

    let result = TransactionCache::new(store).read();

    assert!(matches!(result, Err(CacheError::Corrupt { .. })));

    Ok(())
}

#[test]
fn test_transaction_cache_clear_empties_the_slot() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let cache = TransactionCache::new(store.clone());

    cache.write(&sample_transactions()?)?;
    cache.clear()?;

    assert!(store.get(TRANSACTIONS_KEY)?.is_none());
    assert!(cache.read()?.is_empty());

    Ok(())
}
