//! Environment-driven configuration for the hub and its bus attachment.

use thiserror::Error;

use crate::hub::Hub;

/// Wildcard subject covering the whole event namespace.
pub const DEFAULT_NAMESPACE: &str = "events.>";

/// Settings read at process start.
///
/// `namespace` is consumed by the collaborator that establishes the bus
/// subscription handed to the ingestion bridge; the hub itself only needs
/// the queue capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HubConfig {
    /// Bounded queue capacity for each subscriber.
    pub queue_capacity: usize,
    /// Bus subject the ingestion bridge's subscription covers.
    pub namespace: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            queue_capacity: Hub::DEFAULT_QUEUE_CAPACITY,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl HubConfig {
    /// Load configuration from the environment with sensible defaults.
    ///
    /// Reads `HUB_QUEUE_CAPACITY` and `EVENT_NAMESPACE`, loading a `.env`
    /// file first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let queue_capacity = parse_capacity(std::env::var("HUB_QUEUE_CAPACITY").ok().as_deref())?;
        let namespace = std::env::var("EVENT_NAMESPACE")
            .unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());
        Ok(Self {
            queue_capacity,
            namespace,
        })
    }
}

fn parse_capacity(raw: Option<&str>) -> Result<usize, ConfigError> {
    match raw {
        None | Some("") => Ok(Hub::DEFAULT_QUEUE_CAPACITY),
        Some(value) => value.parse().map_err(|source| ConfigError::InvalidInt {
            var: "HUB_QUEUE_CAPACITY",
            source,
        }),
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {source}")]
    InvalidInt {
        var: &'static str,
        source: std::num::ParseIntError,
    },
}
