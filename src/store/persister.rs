//! Ordered fire-and-forget write queue, one per store.
//!
//! Mutations must never block on durability, but writes to a store's
//! document have to land in mutation order for last-writer-wins to hold.
//! Each store therefore owns a single worker task fed by an unbounded
//! channel: the store serializes a snapshot of its collection at enqueue
//! time and the worker performs the writes strictly in order. A failed
//! write is logged and parked in a shared error slot for the caller to
//! surface; in-memory state is never rolled back.

use crate::libs::storage::{Storage, StorageError};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

enum Job {
    Write(String),
    Flush(oneshot::Sender<()>),
}

pub struct Persister {
    key: &'static str,
    tx: mpsc::UnboundedSender<Job>,
    last_error: Arc<Mutex<Option<StorageError>>>,
}

impl Persister {
    /// Spawns the worker task for `key` and returns its handle.
    pub fn spawn(storage: Storage, key: &'static str) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let last_error: Arc<Mutex<Option<StorageError>>> = Arc::new(Mutex::new(None));
        let error_slot = last_error.clone();

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    Job::Write(json) => {
                        if let Err(e) = storage.save_raw(key, &json).await {
                            tracing::warn!(key, error = %e, "durability write failed");
                            *error_slot.lock() = Some(e);
                        }
                    }
                    Job::Flush(ack) => {
                        // All writes queued before this marker have
                        // completed once we get here.
                        let _ = ack.send(());
                    }
                }
            }
        });

        Persister { key, tx, last_error }
    }

    /// Serializes a snapshot of `value` and queues it for writing.
    ///
    /// Returns immediately; the caller observes failures later through
    /// [`Persister::take_error`].
    pub fn enqueue<T: Serialize>(&self, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                // Send only fails after shutdown, when there is nothing
                // left to persist to.
                let _ = self.tx.send(Job::Write(json));
            }
            Err(e) => tracing::error!(key = self.key, error = %e, "failed to serialize store snapshot"),
        }
    }

    /// Waits until every previously queued write has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Takes the most recent write failure, clearing the slot.
    pub fn take_error(&self) -> Option<StorageError> {
        self.last_error.lock().take()
    }

    pub fn has_error(&self) -> bool {
        self.last_error.lock().is_some()
    }
}
