use super::{ReplicationActor, ReplicationCommand};
use crate::models::Transaction;
use crate::remote::Connectivity;
use crate::remote::fake::FakeRemote;
use anyhow::{Result, anyhow};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn create_deposit(id: &str, bottles: u32) -> Result<Transaction> {
    let created_at = Utc.with_ymd_and_hms(2024, 10, 17, 12, 0, 0).single().ok_or_else(|| anyhow!("invalid date"))?;

    Ok(Transaction::deposit(id.to_string(), created_at, bottles, Some("theo".to_string())))
}

#[tokio::test]
async fn test_actor_replays_inserts_in_order() -> Result<()> {
    let remote = Arc::new(FakeRemote::new());
    let connectivity = Arc::new(Connectivity::new(false));
    let actor = ReplicationActor::new(remote.clone(), connectivity.clone());

    assert!(actor.accept(ReplicationCommand::Insert(create_deposit("1", 4)?)));
    assert!(actor.accept(ReplicationCommand::Insert(create_deposit("2", 6)?)));

    actor.despawn().await?;

    let rows = remote.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "2");
    assert_eq!(rows[1].id, "1");
    assert!(connectivity.is_online());

    Ok(())
}

#[tokio::test]
async fn test_actor_marks_offline_on_insert_failure_and_keeps_running() -> Result<()> {
    let remote = Arc::new(FakeRemote::new());
    let connectivity = Arc::new(Connectivity::new(true));
    let actor = ReplicationActor::new(remote.clone(), connectivity.clone());

    remote.set_failing(true);
    actor.accept(ReplicationCommand::Insert(create_deposit("1", 4)?));

    assert!(actor.flush().await);
    assert!(!connectivity.is_online());

    remote.set_failing(false);
    actor.accept(ReplicationCommand::Insert(create_deposit("2", 6)?));
    actor.despawn().await?;

    assert!(connectivity.is_online());
    assert_eq!(remote.rows().len(), 1);
    assert_eq!(remote.insert_attempts(), 2);

    Ok(())
}

#[tokio::test]
async fn test_actor_delete_failure_does_not_change_connectivity() -> Result<()> {
    let remote = Arc::new(FakeRemote::with_rows(vec![create_deposit("1", 4)?]));
    let connectivity = Arc::new(Connectivity::new(true));
    let actor = ReplicationActor::new(remote.clone(), connectivity.clone());

    remote.set_failing(true);
    actor.accept(ReplicationCommand::DeleteAll);
    actor.despawn().await?;

    assert!(connectivity.is_online());
    assert_eq!(remote.rows().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_actor_delete_all_clears_remote_rows() -> Result<()> {
    let remote = Arc::new(FakeRemote::with_rows(vec![create_deposit("1", 4)?, create_deposit("2", 8)?]));
    let actor = ReplicationActor::new(remote.clone(), Arc::new(Connectivity::new(true)));

    actor.accept(ReplicationCommand::DeleteAll);

    assert!(actor.flush().await);
    assert!(remote.rows().is_empty());

    actor.despawn().await?;

    Ok(())
}
