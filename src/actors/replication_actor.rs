use std::sync::Arc;

use tokio::spawn;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, warn};

use crate::models::Transaction;
use crate::remote::{Connectivity, RemoteStore};

pub enum ReplicationCommand {
    Insert(Transaction),
    DeleteAll,
    /// Answered once every command queued before it has been handled.
    Flush(oneshot::Sender<()>),
}

/// Replays local writes against the remote store in the background.
///
/// Commands are handled one at a time in the order they were accepted, so two
/// quick deposits become two sequential inserts. Failures are not retried: an
/// insert failure only marks the tracker offline and a delete failure is only
/// logged.
pub struct ReplicationActor {
    sender: mpsc::UnboundedSender<ReplicationCommand>,
    handle: JoinHandle<()>,
}

impl ReplicationActor {
    /// Spawns a new actor on the current runtime.
    pub fn new<R: RemoteStore>(remote: Arc<R>, connectivity: Arc<Connectivity>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let handle = spawn(async move {
            while let Some(command) = receiver.recv().await {
                match command {
                    ReplicationCommand::Insert(transaction) => match remote.insert(&transaction).await {
                        Ok(()) => {
                            debug!("Transaction [{}]:[{}] synced to the remote store", transaction.id, transaction.transaction_type);
                            connectivity.set_online(true);
                        }
                        Err(error) => {
                            warn!("Error syncing transaction [{}] to the remote store: {error}", transaction.id);
                            connectivity.set_online(false);
                        }
                    },
                    ReplicationCommand::DeleteAll => match remote.delete_all().await {
                        Ok(()) => debug!("Remote transaction history cleared"),
                        Err(error) => error!("Error clearing the remote store: {error}"),
                    },
                    ReplicationCommand::Flush(reply) => {
                        let _ = reply.send(());
                    }
                }
            }
        });

        Self { sender, handle }
    }

    /// Queues a command. Returns false if the actor is no longer running.
    pub fn accept(&self, command: ReplicationCommand) -> bool {
        self.sender.send(command).is_ok()
    }

    /// Waits until everything queued so far has been handled.
    pub async fn flush(&self) -> bool {
        let (reply, done) = oneshot::channel();

        self.accept(ReplicationCommand::Flush(reply)) && done.await.is_ok()
    }

    /// Closes the queue and waits for the remaining commands to finish.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
