//! Protocol error types.

use thiserror::Error;

/// Errors raised while building wire frames.
///
/// Decoding never fails from the caller's point of view: malformed input
/// degrades to [`crate::Inbound::Text`]. Only encoding reports errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// JSON encoding of an outbound frame failed.
    #[error("JSON encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
