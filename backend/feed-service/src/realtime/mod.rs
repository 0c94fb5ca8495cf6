/// Real-time fan-out of feed change events
///
/// Every successful create/update/delete publishes exactly one event, after
/// the repository commit. The registry is explicit state constructed at
/// server start and cloned into whatever emits or consumes events; there is
/// no process-wide singleton.
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    RwLock,
};
use uuid::Uuid;

use crate::models::Post;

pub mod socket;

/// A change to the feed, as delivered to connected viewers
///
/// Serializes to `{"action": "create"|"update"|"delete", ...}` with the post
/// snapshot for create/update and the bare id for delete.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum FeedEvent {
    Create {
        post: Post,
    },
    Update {
        post: Post,
    },
    Delete {
        #[serde(rename = "postId")]
        post_id: Uuid,
    },
}

/// Unique identifier for a connected viewer channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of currently connected viewer channels
///
/// The write lock held across `publish` gives events a single global order:
/// every viewer observes broadcasts in the order the triggering operations
/// committed. Sends are non-blocking, so a slow viewer never delays the
/// others or the publishing operation.
#[derive(Default, Clone)]
pub struct FeedBroadcaster {
    inner: Arc<RwLock<HashMap<SubscriberId, UnboundedSender<String>>>>,
}

impl FeedBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a viewer channel; returns its id and the receiving end
    pub async fn subscribe(&self) -> (SubscriberId, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded_channel();
        let id = SubscriberId::new();

        let mut guard = self.inner.write().await;
        guard.insert(id, tx);
        tracing::debug!(?id, subscribers = guard.len(), "viewer subscribed");

        (id, rx)
    }

    /// Remove a viewer channel; must be called when its connection closes
    pub async fn unsubscribe(&self, id: SubscriberId) {
        let mut guard = self.inner.write().await;
        if guard.remove(&id).is_some() {
            tracing::debug!(?id, subscribers = guard.len(), "viewer unsubscribed");
        }
    }

    /// Deliver an event to every registered viewer
    ///
    /// Dead channels (disconnected receivers) are dropped from the registry
    /// as a side effect.
    pub async fn publish(&self, event: &FeedEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!("failed to serialize feed event: {}", err);
                return;
            }
        };

        let mut guard = self.inner.write().await;
        let before = guard.len();
        guard.retain(|_, sender| sender.send(payload.clone()).is_ok());
        let dropped = before - guard.len();
        if dropped > 0 {
            tracing::debug!(dropped, active = guard.len(), "cleaned up dead viewers");
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
