//! # Streamhub: In-process Event Fan-out Hub
//!
//! Streamhub receives raw byte events from an external message bus and
//! redistributes them to many concurrently connected streaming clients,
//! each with its own bounded delivery queue. Delivery is best-effort by
//! design: a slow client loses events instead of slowing the publisher or
//! its peers.
//!
//! ## Core Concepts
//!
//! - **Hub**: the fan-out broker holding the subscriber registry
//! - **Ingestion Bridge**: the long-lived task relaying bus messages into the hub
//! - **Streaming Session**: the per-client loop draining a queue into a transport
//! - **Envelope Codec**: binary-primary, JSON-fallback event decoding
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use streamhub::bridge::{ChannelSource, IngestionBridge};
//! use streamhub::config::HubConfig;
//! use streamhub::hub::Hub;
//! use streamhub::session::{ChannelTransport, StreamingSession};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
//! streamhub::telemetry::init_tracing();
//! let config = HubConfig::from_env()?;
//! let hub = Hub::new(config.queue_capacity);
//!
//! // One bridge per process, fed by the bus subscription.
//! let (_injector, source) = ChannelSource::pair();
//! let shutdown = CancellationToken::new();
//! IngestionBridge::new(Arc::clone(&hub)).spawn(source, shutdown.clone());
//!
//! // One session per streaming RPC request.
//! let (mut transport, _events) = ChannelTransport::pair();
//! let cancel = shutdown.child_token();
//! StreamingSession::new(Arc::clone(&hub))
//!     .run(&mut transport, &cancel)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Delivery Semantics
//!
//! Publish never blocks: a full subscriber queue drops the payload for that
//! subscriber only, with a warn diagnostic. Per-subscriber order matches
//! publish order; there is no ordering guarantee across subscribers, no
//! persistence, and no replay.
//!
//! ## Module Guide
//!
//! - [`hub`] - Subscriber registry and non-blocking fan-out
//! - [`bridge`] - Bus-to-hub ingestion task and source abstraction
//! - [`session`] - Per-client delivery loop and transport abstraction
//! - [`envelope`] - Event model and dual-encoding codec
//! - [`config`] - Environment-driven settings
//! - [`telemetry`] - Tracing subscriber setup

pub mod bridge;
pub mod config;
pub mod envelope;
pub mod hub;
pub mod session;
pub mod telemetry;
