//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] mend_core::Error),
}

/// Every data-access failure maps onto a response status: name resolution
/// misses are 404, constraint and input problems are 400 (matching the
/// upstream clients), and only storage-layer failures surface as 500.
impl From<mend_core::Error> for ApiError {
  fn from(err: mend_core::Error) -> Self {
    use mend_core::Error as E;
    match err {
      E::ClientNotFound(_) | E::TriggerNotFound(_) => ApiError::NotFound(err.to_string()),
      E::Duplicate { .. } | E::MalformedName(_) | E::Validation(_) => {
        ApiError::BadRequest(err.to_string())
      }
      E::Io(_) | E::Serialization(_) => ApiError::Store(err),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
