use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single distributed event.
///
/// The hub treats events as opaque byte payloads; this structured form only
/// exists at the edges — producers encode it before publishing to the bus,
/// and each streaming session decodes it before forwarding to its client.
///
/// # Example
///
/// ```
/// use streamhub::envelope::{Event, EventKind};
///
/// let event = Event::new("evt-42", EventKind::Created, "project-7", b"hello".as_ref());
/// assert_eq!(event.kind.label(), "created");
/// assert_eq!(event.scope_id, "project-7");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// Producer-supplied identifier, unique per logical event.
    pub id: String,
    /// Classification of the event; `Unspecified` for dev/unclassified events.
    #[serde(default)]
    pub kind: EventKind,
    /// Owning-scope identifier. Advisory today: sessions record requested
    /// scopes but the hub broadcasts every event to every subscriber.
    pub scope_id: String,
    /// Opaque application payload.
    pub payload: Bytes,
    /// When the producer observed the event.
    pub occurred_at: DateTime<Utc>,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        kind: EventKind,
        scope_id: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            scope_id: scope_id.into(),
            payload: payload.into(),
            occurred_at: Utc::now(),
        }
    }

    /// Replace the occurrence timestamp (producers replaying historic data).
    #[must_use]
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {}] {} ({} bytes)",
            self.kind.label(),
            self.scope_id,
            self.id,
            self.payload.len()
        )
    }
}

/// Enumerated event classification.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Unclassified or development-only events.
    #[default]
    Unspecified,
    Created,
    Updated,
    Deleted,
}

impl EventKind {
    /// Stable lowercase label, matching the serde wire names.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Unspecified => "unspecified",
            EventKind::Created => "created",
            EventKind::Updated => "updated",
            EventKind::Deleted => "deleted",
        }
    }
}

impl AsRef<str> for EventKind {
    fn as_ref(&self) -> &str {
        self.label()
    }
}
