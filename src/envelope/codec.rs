use bytes::Bytes;
use thiserror::Error;

use super::event::Event;

/// Errors produced while encoding an [`Event`] for the wire.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised when a payload matches neither wire encoding.
///
/// Carries both underlying failures so diagnostics can show why each
/// decoder rejected the payload.
#[derive(Debug, Error)]
#[error("payload matches neither binary nor json encoding (binary: {binary}; json: {json})")]
pub struct DecodeError {
    pub binary: bincode::Error,
    pub json: serde_json::Error,
}

/// Decode a raw payload into an [`Event`].
///
/// Binary is the primary encoding; JSON is attempted only after the binary
/// decode fails. This is a tolerance policy for ad-hoc producers, not a
/// protocol negotiation.
pub fn decode(payload: &[u8]) -> Result<Event, DecodeError> {
    match bincode::deserialize::<Event>(payload) {
        Ok(event) => Ok(event),
        Err(binary) => match serde_json::from_slice::<Event>(payload) {
            Ok(event) => Ok(event),
            Err(json) => Err(DecodeError { binary, json }),
        },
    }
}

/// Encode an event in the primary binary wire form.
pub fn encode_binary(event: &Event) -> Result<Bytes, CodecError> {
    Ok(Bytes::from(bincode::serialize(event)?))
}

/// Encode an event in the textual fallback form.
pub fn encode_json(event: &Event) -> Result<Bytes, CodecError> {
    Ok(Bytes::from(serde_json::to_vec(event)?))
}
