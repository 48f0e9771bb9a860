//! Error types for document persistence.

use thiserror::Error;

/// Errors surfaced by document encode/decode.
///
/// Everything else in the engine degrades to neutral defaults instead
/// of erroring; only persistence can genuinely fail.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode document: {0}")]
    Decode(#[source] serde_json::Error),
}
