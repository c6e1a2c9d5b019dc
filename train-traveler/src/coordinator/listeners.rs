//! Subscriber fan-out.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::JourneySnapshot;

/// Receives every snapshot a coordinator publishes.
pub trait Listener: Send + Sync {
    fn on_update(&self, snapshot: &Arc<JourneySnapshot>);
}

impl<F> Listener for F
where
    F: Fn(&Arc<JourneySnapshot>) + Send + Sync,
{
    fn on_update(&self, snapshot: &Arc<JourneySnapshot>) {
        self(snapshot)
    }
}

/// Handle returned on registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners of one coordinator.
#[derive(Default)]
pub struct Listeners {
    next_id: AtomicU64,
    entries: RwLock<Vec<(ListenerId, Arc<dyn Listener>)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, listener: Arc<dyn Listener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.write().await.push((id, listener));
        id
    }

    /// Unregister a listener. Returns false if `id` was not registered.
    pub async fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Call every listener once, in registration order.
    ///
    /// The list is copied first so a listener may register or remove
    /// listeners without deadlocking.
    pub async fn notify(&self, snapshot: &Arc<JourneySnapshot>) {
        let entries: Vec<Arc<dyn Listener>> = self
            .entries
            .read()
            .await
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        debug!(listeners = entries.len(), "notifying listeners");
        for listener in entries {
            listener.on_update(snapshot);
        }
    }
}
