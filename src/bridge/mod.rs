//! Ingestion bridge: the single long-lived task that relays bus messages
//! into the hub.
//!
//! The bridge owns the bus subscription for the lifetime of the process and
//! hands each inbound payload straight to [`Hub::publish`] without decoding.
//! Decoding is deferred to the per-session consumer so a buggy or slow
//! session cannot stall ingestion. Once a payload reaches `publish` it is
//! considered consumed — there is no retry or redelivery.

pub mod source;

pub use source::{BusSource, ChannelSource};

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::hub::Hub;

/// Relays raw bus payloads into the hub.
///
/// Apart from this bridge (and direct [`Hub::publish`] injection in tests),
/// no component publishes to the hub.
#[derive(Debug)]
pub struct IngestionBridge {
    hub: Arc<Hub>,
}

impl IngestionBridge {
    pub fn new(hub: Arc<Hub>) -> Self {
        Self { hub }
    }

    /// Spawn the bridge task.
    ///
    /// Runs until `shutdown` is cancelled or the source reports
    /// end-of-stream. Never blocks on a slow subscriber — guaranteed by the
    /// hub's non-blocking publish contract.
    pub fn spawn<S>(self, mut source: S, shutdown: CancellationToken) -> JoinHandle<()>
    where
        S: BusSource + 'static,
    {
        tokio::spawn(async move {
            tracing::info!("ingestion bridge started");
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::info!("ingestion bridge shutting down");
                        break;
                    }
                    message = source.next_message() => match message {
                        Some(payload) => {
                            tracing::trace!(bytes = payload.len(), "bridge: forwarding bus payload");
                            self.hub.publish(payload);
                        }
                        None => {
                            tracing::info!("bus source closed, ingestion bridge exiting");
                            break;
                        }
                    },
                }
            }
        })
    }
}
