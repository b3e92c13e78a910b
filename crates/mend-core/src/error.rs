//! Error types for `mend-core`.

use thiserror::Error;

/// Failures surfaced by the data-access layer.
///
/// Backends return these directly so the HTTP boundary can translate each
/// variant into a response status without peeling back an opaque backend
/// error type.
#[derive(Debug, Error)]
pub enum Error {
  /// A uniqueness constraint was violated on create; nothing was inserted.
  #[error("duplicate {field}: {value:?}")]
  Duplicate { field: &'static str, value: String },

  #[error("client not found: {0:?}")]
  ClientNotFound(String),

  #[error("trigger not found: {0:?}")]
  TriggerNotFound(String),

  /// A full name did not split into exactly two tokens.
  #[error("malformed full name {0:?}: expected \"First Last\"")]
  MalformedName(String),

  /// A required input field was missing or empty.
  #[error("validation error: {0}")]
  Validation(String),

  /// Storage-layer I/O failure; unrecoverable for the call that hit it.
  #[error("storage i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
