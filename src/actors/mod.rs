mod replication_actor;
#[cfg(test)]
mod tests;

pub use replication_actor::{ReplicationActor, ReplicationCommand};
