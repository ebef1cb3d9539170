use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::envelope::Event;

/// Abstraction over the RPC runtime's per-event send primitive.
///
/// The session calls `send` once per decoded event; a returned error is
/// terminal for the session.
#[async_trait]
pub trait EventTransport: Send {
    async fn send(&mut self, event: Event) -> Result<(), TransportError>;
}

/// Errors a transport can report when forwarding an event.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("client stream closed")]
    Closed,
    #[error("transport send failed: {0}")]
    Other(String),
}

impl TransportError {
    pub fn other(error: impl Into<String>) -> Self {
        Self::Other(error.into())
    }
}

/// Channel-based transport for tests and in-process consumers (e.g. an SSE
/// handler draining decoded events).
///
/// Fails with [`TransportError::Closed`] once the receiver is dropped.
#[derive(Debug)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Event>,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { tx }
    }

    /// Create a transport/receiver pair.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl EventTransport for ChannelTransport {
    async fn send(&mut self, event: Event) -> Result<(), TransportError> {
        self.tx.send(event).map_err(|_| TransportError::Closed)
    }
}
