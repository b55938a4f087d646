use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{
    Mutex,
    mpsc::{self, error::TrySendError},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::{match_state::MatchState, store::StateStore};

/// Identifier assigned to every viewer subscription.
pub type SubscriberId = Uuid;

/// Serialized snapshot as delivered to viewers.
pub type Payload = Arc<str>;

type Registry = DashMap<SubscriberId, mpsc::Sender<Payload>>;

/// Fan-out of full state snapshots to every connected viewer.
///
/// Each viewer owns a bounded queue. Delivery never awaits a viewer: one whose
/// queue is full is disconnected so it cannot stall the others, and it gets a
/// fresh snapshot when it reconnects.
pub struct Broadcaster {
    store: Arc<StateStore>,
    subscribers: Arc<Registry>,
    /// Orders subscribe and publish so snapshots leave in the order they were read.
    gate: Mutex<()>,
    capacity: usize,
}

impl Broadcaster {
    /// Build a broadcaster reading from `store` with `capacity` queued snapshots per viewer.
    pub fn new(store: Arc<StateStore>, capacity: usize) -> Self {
        Self {
            store,
            subscribers: Arc::new(DashMap::new()),
            gate: Mutex::new(()),
            capacity: capacity.max(1),
        }
    }

    /// Register a viewer and queue the current snapshot as its first message.
    pub async fn subscribe(&self) -> Subscription {
        let _gate = self.gate.lock().await;
        let (tx, rx) = mpsc::channel(self.capacity);

        if let Some(payload) = encode(&self.store.read().await) {
            // Fresh queue with capacity >= 1, cannot be full.
            let _ = tx.try_send(payload);
        }

        let id = Uuid::new_v4();
        self.subscribers.insert(id, tx);
        debug!(subscriber = %id, "viewer subscribed");

        Subscription {
            id,
            receiver: rx,
            registry: self.subscribers.clone(),
        }
    }

    /// Remove a viewer. Already queued snapshots stay readable, then the queue ends.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Snapshot the store and queue it to every viewer, returning how many accepted it.
    ///
    /// The state lock is only held for the copy; serialization and delivery
    /// happen after it is released.
    pub async fn publish(&self) -> usize {
        let _gate = self.gate.lock().await;
        let snapshot = self.store.read().await;
        let Some(payload) = encode(&snapshot) else {
            return 0;
        };

        let mut delivered = 0;
        let mut stale = Vec::new();
        for entry in self.subscribers.iter() {
            match entry.value().try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber = %entry.key(), "viewer queue full; disconnecting");
                    stale.push(*entry.key());
                }
                Err(TrySendError::Closed(_)) => stale.push(*entry.key()),
            }
        }

        for id in stale {
            self.subscribers.remove(&id);
        }

        delivered
    }

    /// Number of currently registered viewers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving end of a viewer registration. Dropping it unsubscribes.
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<Payload>,
    registry: Arc<Registry>,
}

impl Subscription {
    /// Identifier of this viewer.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next snapshot; `None` once the viewer has been removed and drained.
    pub async fn recv(&mut self) -> Option<Payload> {
        self.receiver.recv().await
    }

    /// Take a queued snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<Payload> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.registry.remove(&self.id).is_some() {
            debug!(subscriber = %self.id, "viewer unsubscribed");
        }
    }
}

fn encode(state: &MatchState) -> Option<Payload> {
    match serde_json::to_string(state) {
        Ok(json) => Some(Arc::from(json)),
        Err(err) => {
            warn!(error = %err, "failed to serialize match state");
            None
        }
    }
}
