//! JSON REST API for mend.
//!
//! Exposes an axum [`Router`] backed by any
//! [`mend_core::store::HealthStore`]. CORS, TLS, and transport concerns are
//! the caller's responsibility; the `mend-server` binary wires them up.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = mend_api::router(Arc::new(store));
//! ```

pub mod clients;
pub mod error;
pub mod moods;
pub mod occurrences;
pub mod triggers;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use mend_core::store::HealthStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `MEND_*` environment variables. Every field has a default suitable for
/// local single-user use.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  /// The single shared JSON file holding every table.
  #[serde(default = "default_store_path")]
  pub store_path:   PathBuf,
  /// Browser origins allowed by the CORS layer; empty means any origin.
  #[serde(default)]
  pub cors_origins: Vec<String>,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  5000
}

fn default_store_path() -> PathBuf {
  PathBuf::from("data/db.json")
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: HealthStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Clients
    .route("/client", post(clients::create::<S>))
    .route("/client/{full_name}", get(clients::get_by_name::<S>))
    .route("/clients", get(clients::list::<S>))
    // Triggers
    .route("/trigger", post(triggers::create::<S>))
    .route("/triggers", get(triggers::list::<S>))
    // Mood history
    .route("/mood", post(moods::create::<S>))
    .route("/mood-history/{full_name}", get(moods::history::<S>))
    // Trigger history
    .route("/trigger-history", post(occurrences::create::<S>))
    .route("/trigger-history/batch", post(occurrences::create_batch::<S>))
    .route("/trigger-history/{full_name}", get(occurrences::history::<S>))
    .route("/chart-data/{full_name}", get(occurrences::chart_data::<S>))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use mend_store_json::JsonStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn app() -> Router {
    router(Arc::new(JsonStore::open_in_memory()))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        builder.body(Body::from(json.to_string())).unwrap()
      }
      None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn john_smith() -> Value {
    json!({
      "first_name": "John",
      "last_name": "Smith",
      "email": "john@example.com",
      "phone_number": "555-0001",
    })
  }

  // ── Clients ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_client_returns_201_and_business_key() {
    let app = app();
    let (status, body) = send(&app, "POST", "/client", Some(john_smith())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["client_id"], 1);
  }

  #[tokio::test]
  async fn duplicate_email_returns_400() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;

    let (status, body) = send(
      &app,
      "POST",
      "/client",
      Some(json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "john@example.com",
        "phone_number": "555-0002",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"), "body: {body}");
  }

  #[tokio::test]
  async fn get_client_by_name_is_case_insensitive() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;

    let (status, body) = send(&app, "GET", "/client/john%20smith", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client_id"], 1);
    assert_eq!(body["first_name"], "John");
  }

  #[tokio::test]
  async fn unknown_client_returns_404() {
    let app = app();
    let (status, _) = send(&app, "GET", "/client/Jane%20Doe", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn single_token_name_returns_400() {
    let app = app();
    let (status, body) = send(&app, "GET", "/client/Cher", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("malformed"), "body: {body}");
  }

  #[tokio::test]
  async fn list_clients_returns_all() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;

    let (status, body) = send(&app, "GET", "/clients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
  }

  // ── Mood history ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn mood_round_trip_through_the_api() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;

    let (status, body) = send(&app, "POST", "/mood", Some(json!({ "mood": 7 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mood_id"], 1);

    let (status, body) = send(&app, "GET", "/mood-history/John%20Smith", None).await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["mood"], 7);
    assert!(history[0]["date"].is_string(), "entry_date was defaulted: {body}");
  }

  // ── Trigger history ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_trigger_returns_404_and_inserts_nothing() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;

    let (status, _) = send(
      &app,
      "POST",
      "/trigger-history",
      Some(json!({ "trigger_name": "Unknown", "intensity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/trigger-history/John%20Smith", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn occurrence_round_trip_includes_trigger_details() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;
    send(
      &app,
      "POST",
      "/trigger",
      Some(json!({ "name": "Stress", "feelings": ["anxious", "tired"] })),
    )
    .await;

    let (status, body) = send(
      &app,
      "POST",
      "/trigger-history",
      Some(json!({ "trigger_name": "stress", "intensity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["history_id"], 1);

    let (_, body) = send(&app, "GET", "/trigger-history/John%20Smith", None).await;
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["trigger_name"], "Stress");
    assert_eq!(history[0]["intensity"], 5);
    assert_eq!(history[0]["feelings"], json!(["anxious", "tired"]));
  }

  #[tokio::test]
  async fn batch_with_unknown_name_persists_nothing() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;
    send(&app, "POST", "/trigger", Some(json!({ "name": "Stress" }))).await;

    let (status, _) = send(
      &app,
      "POST",
      "/trigger-history/batch",
      Some(json!({
        "triggers": [
          { "trigger_name": "Stress", "intensity": 5 },
          { "trigger_name": "Unknown", "intensity": 2 },
        ],
      })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/trigger-history/John%20Smith", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn batch_returns_every_new_id() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;
    send(&app, "POST", "/trigger", Some(json!({ "name": "Stress" }))).await;
    send(&app, "POST", "/trigger", Some(json!({ "name": "Crowds" }))).await;

    let (status, body) = send(
      &app,
      "POST",
      "/trigger-history/batch",
      Some(json!({
        "triggers": [
          { "trigger_name": "Stress", "intensity": 5 },
          { "trigger_name": "Crowds", "intensity": 3 },
        ],
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["history_ids"], json!([1, 2]));
  }

  // ── Chart data ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn chart_data_returns_both_series() {
    let app = app();
    send(&app, "POST", "/client", Some(john_smith())).await;
    send(&app, "POST", "/trigger", Some(json!({ "name": "Stress" }))).await;
    send(&app, "POST", "/mood", Some(json!({ "mood": 4 }))).await;
    send(
      &app,
      "POST",
      "/trigger-history",
      Some(json!({ "trigger_name": "Stress", "intensity": 5 })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/chart-data/John%20Smith", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"].as_array().unwrap().len(), 1);
    assert_eq!(body["triggers"].as_array().unwrap().len(), 1);
  }

  // ── Listings ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn listing_triggers_twice_is_identical() {
    let app = app();
    for name in ["Stress", "Crowds"] {
      send(&app, "POST", "/trigger", Some(json!({ "name": name }))).await;
    }

    let (_, first) = send(&app, "GET", "/triggers", None).await;
    let (_, second) = send(&app, "GET", "/triggers", None).await;
    assert_eq!(first, second);
    assert_eq!(first.as_array().unwrap().len(), 2);
  }
}
