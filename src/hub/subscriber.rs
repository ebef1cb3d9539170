use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::registry::Hub;

/// Opaque identifier for one live streaming client.
///
/// Generated fresh per connection via [`SubscriberId::fresh`] and never
/// reused. Cheap to clone.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriberId(Arc<str>);

impl SubscriberId {
    /// Mint a fresh random identifier (UUID v4).
    pub fn fresh() -> Self {
        Self(Arc::from(Uuid::new_v4().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriberId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for SubscriberId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

/// Readable end of a subscriber's bounded delivery queue.
///
/// The hub is the sole producer; the owning session is the sole consumer.
#[derive(Debug)]
pub struct Delivery {
    rx: mpsc::Receiver<Bytes>,
}

impl Delivery {
    pub(crate) fn new(rx: mpsc::Receiver<Bytes>) -> Self {
        Self { rx }
    }

    /// Await the next payload.
    ///
    /// Returns `None` once the subscriber has been removed from the registry
    /// and all buffered payloads have been drained (end-of-stream).
    pub async fn recv(&mut self) -> Option<Bytes> {
        self.rx.recv().await
    }

    /// Take a payload without awaiting.
    pub fn try_recv(&mut self) -> Result<Bytes, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }
}

/// Releases a subscriber's registry entry exactly once.
///
/// Dropping the guard unregisters the subscriber, so a session cleans up on
/// every exit path — normal completion, cancellation, or a send error —
/// without tracking which path it took. Release is idempotent: a second
/// [`Hub::unsubscribe`] for the same id is a no-op.
#[derive(Debug)]
pub struct SubscriptionGuard {
    hub: Arc<Hub>,
    id: SubscriberId,
    released: bool,
}

impl SubscriptionGuard {
    pub(crate) fn new(hub: Arc<Hub>, id: SubscriberId) -> Self {
        Self {
            hub,
            id,
            released: false,
        }
    }

    pub fn subscriber_id(&self) -> &SubscriberId {
        &self.id
    }

    /// Remove the registry entry now instead of waiting for drop.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.hub.unsubscribe(&self.id);
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.release_once();
    }
}
