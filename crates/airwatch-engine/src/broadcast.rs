//! Snapshot fan-out to live viewers.
//!
//! Each subscriber owns a bounded mpsc queue of `Arc<Snapshot>`. Publishing
//! try-sends into every queue and never waits: a viewer whose queue is full
//! has fallen [`buffer`] ticks behind and is dropped from the set so it
//! cannot stall the tick driver or the other viewers. A viewer that went
//! away without unsubscribing is detected the same way (closed channel) and
//! cleaned up on the next publish.
//!
//! [`buffer`]: Broadcaster::new

use std::collections::HashMap;
use std::sync::Arc;

use airwatch_domain::Snapshot;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};
use uuid::Uuid;

/// A viewer's receiving end of the snapshot stream.
///
/// Dropping it is equivalent to unsubscribing; the broadcaster notices the
/// closed channel on its next publish.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::Receiver<Arc<Snapshot>>,
}

impl Subscription {
    /// Identity of this subscription, usable with
    /// [`Broadcaster::unsubscribe`] and in logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next snapshot, in publish order. `None` once the stream is over:
    /// either the engine stopped or this subscriber was dropped for falling
    /// behind.
    pub async fn recv(&mut self) -> Option<Arc<Snapshot>> {
        self.receiver.recv().await
    }
}

/// Fan-out hub owned by the engine task.
#[derive(Debug)]
pub struct Broadcaster {
    buffer: usize,
    subscribers: HashMap<Uuid, mpsc::Sender<Arc<Snapshot>>>,
}

impl Broadcaster {
    /// `buffer` is the per-subscriber queue depth in snapshots.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer: buffer.max(1),
            subscribers: HashMap::new(),
        }
    }

    /// Register a new viewer. It starts receiving from the next published
    /// snapshot; there is no backfill, and a reconnect is indistinguishable
    /// from a fresh viewer.
    pub fn subscribe(&mut self) -> Subscription {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(self.buffer);
        self.subscribers.insert(id, tx);
        debug!(subscriber = %id, total = self.subscribers.len(), "viewer subscribed");
        Subscription { id, receiver: rx }
    }

    /// Deregister a viewer. Idempotent; unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: Uuid) {
        if self.subscribers.remove(&id).is_some() {
            debug!(subscriber = %id, total = self.subscribers.len(), "viewer unsubscribed");
        }
    }

    /// Deliver one snapshot to every live subscriber.
    ///
    /// Never blocks. Subscribers with a full queue or a closed receiver are
    /// removed from the set; everyone else keeps receiving in publish order
    /// with no gaps or duplicates.
    pub fn publish(&mut self, snapshot: &Arc<Snapshot>) {
        self.subscribers.retain(|id, tx| {
            match tx.try_send(Arc::clone(snapshot)) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber = %id, "viewer cannot keep up, dropping it");
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(subscriber = %id, "viewer gone, releasing slot");
                    false
                }
            }
        });
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
