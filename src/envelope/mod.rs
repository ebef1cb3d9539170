//! Event envelope: the structured event record and its dual-encoding codec.
//!
//! Payloads arrive from the bus as opaque bytes. The binary encoding is the
//! primary wire form; a JSON fallback is attempted only when the binary
//! decode fails, so ad-hoc producers (curl, test scripts) can publish the
//! textual form. Payloads that match neither encoding are dropped by the
//! consumer with a diagnostic, never surfaced as a pipeline error.

pub mod codec;
pub mod event;

pub use codec::{decode, encode_binary, encode_json, CodecError, DecodeError};
pub use event::{Event, EventKind};
