//! Streaming session: the per-client loop that drains a subscriber's queue
//! and forwards decoded events to a transport.
//!
//! A session moves through three states: attached (just subscribed),
//! delivering (waiting on either the queue or the cancellation signal), and
//! closed. Cancellation and a closed queue end the session cleanly; only a
//! transport send failure propagates as an error. The registry entry is
//! released on every exit path.

pub mod transport;

pub use transport::{ChannelTransport, EventTransport, TransportError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::envelope;
use crate::hub::{Hub, SubscriberId};

/// One client's delivery loop.
///
/// Created per streaming RPC request; the transport's request-scoped
/// cancellation token drives shutdown.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use streamhub::hub::Hub;
/// use streamhub::session::{ChannelTransport, StreamingSession};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn handle_request() {
/// let hub = Hub::with_default_capacity();
/// let (mut transport, _events) = ChannelTransport::pair();
/// let cancel = CancellationToken::new();
///
/// let session = StreamingSession::new(Arc::clone(&hub));
/// session.run(&mut transport, &cancel).await.unwrap();
/// # }
/// ```
#[derive(Debug)]
pub struct StreamingSession {
    hub: Arc<Hub>,
    id: SubscriberId,
    scopes: Vec<String>,
}

impl StreamingSession {
    /// Create a session with a fresh subscriber id and no scope interest.
    pub fn new(hub: Arc<Hub>) -> Self {
        Self::with_scopes(hub, Vec::new())
    }

    /// Create a session recording the client's requested scope identifiers.
    ///
    /// Scopes are advisory: the reference behavior forwards every event to
    /// every subscriber. They are kept (and logged) as the extension point
    /// for server-side filtering.
    pub fn with_scopes(hub: Arc<Hub>, scopes: Vec<String>) -> Self {
        Self {
            hub,
            id: SubscriberId::fresh(),
            scopes,
        }
    }

    pub fn subscriber_id(&self) -> &SubscriberId {
        &self.id
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Run the delivery loop until the client disconnects, the queue is
    /// closed, or a transport send fails.
    ///
    /// Returns `Ok(())` on cancellation or queue close; the only error that
    /// propagates is a transport send failure, after which continuing the
    /// loop for this client would be pointless. Payloads that decode as
    /// neither wire encoding are skipped with a diagnostic, not retried.
    pub async fn run<T>(
        self,
        transport: &mut T,
        cancel: &CancellationToken,
    ) -> Result<(), TransportError>
    where
        T: EventTransport,
    {
        let (mut delivery, _guard) = self.hub.subscribe(self.id.clone());
        tracing::info!(
            subscriber = %self.id,
            scopes = ?self.scopes,
            "streaming: client connected"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(subscriber = %self.id, "streaming: client disconnected");
                    return Ok(());
                }
                message = delivery.recv() => {
                    let Some(payload) = message else {
                        tracing::info!(subscriber = %self.id, "streaming: delivery queue closed");
                        return Ok(());
                    };
                    let event = match envelope::decode(&payload) {
                        Ok(event) => event,
                        Err(err) => {
                            tracing::warn!(
                                subscriber = %self.id,
                                error = %err,
                                "streaming: dropping unparseable event"
                            );
                            continue;
                        }
                    };
                    if let Err(err) = transport.send(event).await {
                        tracing::error!(subscriber = %self.id, error = %err, "streaming: send failed");
                        return Err(err);
                    }
                }
            }
        }
        // _guard drops on every return path above, removing the registry entry.
    }
}
