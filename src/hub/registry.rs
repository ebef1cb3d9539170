use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use bytes::Bytes;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;

use super::subscriber::{Delivery, SubscriberId, SubscriptionGuard};

/// In-process fan-out broker.
///
/// Holds the subscriber registry and broadcasts raw payloads to every
/// registered delivery queue. Delivery is best-effort by design: a slow
/// subscriber loses events rather than slowing the publisher or its peers.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use streamhub::hub::{Hub, SubscriberId};
///
/// # async fn demo() {
/// let hub = Hub::new(8);
/// let (mut delivery, guard) = hub.subscribe(SubscriberId::fresh());
/// hub.publish(Bytes::from_static(b"payload"));
/// assert_eq!(delivery.recv().await.as_deref(), Some(b"payload".as_ref()));
/// guard.release();
/// # }
/// ```
#[derive(Debug)]
pub struct Hub {
    registry: RwLock<FxHashMap<SubscriberId, mpsc::Sender<Bytes>>>,
    queue_capacity: usize,
    published: AtomicU64,
    dropped: AtomicU64,
}

impl Hub {
    /// Queue capacity used by [`Hub::with_default_capacity`].
    pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

    /// Create an empty hub whose subscribers each get a bounded queue of
    /// `queue_capacity` payloads. Capacity is clamped to at least 1.
    pub fn new(queue_capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            registry: RwLock::new(FxHashMap::default()),
            queue_capacity: queue_capacity.max(1),
            published: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        })
    }

    pub fn with_default_capacity() -> Arc<Self> {
        Self::new(Self::DEFAULT_QUEUE_CAPACITY)
    }

    /// Register a new subscriber under `id`.
    ///
    /// Never fails and imposes no subscriber cap. Returns the readable end
    /// of the subscriber's queue plus a guard that removes the registry
    /// entry — explicitly via [`SubscriptionGuard::release`] or implicitly
    /// on drop, so every session exit path unregisters exactly once.
    ///
    /// Ids are expected to be fresh per connection; registering a duplicate
    /// id displaces the previous entry and closes its queue.
    pub fn subscribe(self: &Arc<Self>, id: SubscriberId) -> (Delivery, SubscriptionGuard) {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        {
            let mut registry = self.registry.write().expect("registry poisoned");
            registry.insert(id.clone(), tx);
        }
        tracing::debug!(subscriber = %id, "hub: subscriber registered");
        (
            Delivery::new(rx),
            SubscriptionGuard::new(Arc::clone(self), id),
        )
    }

    /// Remove `id` from the registry and close its queue.
    ///
    /// Safe to call for an id that was never registered or was already
    /// removed. An in-flight drain loop observes end-of-stream after the
    /// remaining buffered payloads.
    pub fn unsubscribe(&self, id: &SubscriberId) {
        let removed = {
            let mut registry = self.registry.write().expect("registry poisoned");
            registry.remove(id)
        };
        if removed.is_some() {
            tracing::debug!(subscriber = %id, "hub: subscriber removed");
        }
        // Dropping the sender here closes the queue.
    }

    /// Broadcast `payload` to every currently registered subscriber.
    ///
    /// Non-blocking regardless of subscriber count or queue fullness: a
    /// full queue drops the payload for that subscriber only, with a warn
    /// diagnostic. Publishing to zero subscribers is a no-op. Payloads
    /// published in sequence land in each subscriber's queue in that order.
    pub fn publish(&self, payload: Bytes) {
        self.published.fetch_add(1, Ordering::Relaxed);
        let registry = self.registry.read().expect("registry poisoned");
        for (id, queue) in registry.iter() {
            match queue.try_send(payload.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(subscriber = %id, "hub: subscriber queue full, dropping event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    // Entry mid-teardown; unsubscribe takes it out of the map.
                }
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.read().expect("registry poisoned").len()
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Snapshot of the hub's counters.
    pub fn metrics(&self) -> HubMetrics {
        HubMetrics {
            subscribers: self.subscriber_count(),
            published: self.published.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time hub statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HubMetrics {
    /// Currently registered subscribers.
    pub subscribers: usize,
    /// Total publish calls since the hub was created.
    pub published: u64,
    /// Payloads dropped because a subscriber queue was full.
    pub dropped: u64,
}
