use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

/// Abstraction over the external bus subscription the bridge drains.
///
/// Implementations wrap a connected bus client's wildcard subscription over
/// the event namespace. Returning `None` signals the subscription ended and
/// the bridge task should exit.
#[async_trait]
pub trait BusSource: Send {
    /// Await the next raw message body.
    async fn next_message(&mut self) -> Option<Bytes>;
}

/// Channel-backed source for tests and direct injection.
///
/// # Example
/// ```no_run
/// use streamhub::bridge::{ChannelSource, IngestionBridge};
/// use streamhub::hub::Hub;
/// use tokio_util::sync::CancellationToken;
///
/// let hub = Hub::with_default_capacity();
/// let (injector, source) = ChannelSource::pair();
/// let shutdown = CancellationToken::new();
/// IngestionBridge::new(hub).spawn(source, shutdown.clone());
///
/// injector.send(bytes::Bytes::from_static(b"raw payload")).unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::UnboundedReceiver<Bytes>,
}

impl ChannelSource {
    pub fn new(rx: mpsc::UnboundedReceiver<Bytes>) -> Self {
        Self { rx }
    }

    /// Create an injector/source pair.
    pub fn pair() -> (mpsc::UnboundedSender<Bytes>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl BusSource for ChannelSource {
    async fn next_message(&mut self) -> Option<Bytes> {
        self.rx.recv().await
    }
}
