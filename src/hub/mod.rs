//! Fan-out hub: a concurrency-safe registry of subscribers, each holding a
//! bounded delivery queue.
//!
//! The hub is the only component with shared mutable state. Registry
//! mutations (subscribe/unsubscribe) take the write lock; publish iterates
//! under the read lock and enqueues without blocking, dropping the payload
//! for any subscriber whose queue is full. One hub instance per process,
//! shared by handle with the ingestion bridge and every streaming session.

pub mod registry;
pub mod subscriber;

pub use registry::{Hub, HubMetrics};
pub use subscriber::{Delivery, SubscriberId, SubscriptionGuard};
