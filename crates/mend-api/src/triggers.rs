//! Handlers for trigger endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/trigger` | Body: [`NewTrigger`]; returns 201 + `{"trigger_id": n}` |
//! | `GET`  | `/triggers` | All triggers, in insertion order |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use mend_core::{
  store::HealthStore,
  trigger::{NewTrigger, Trigger},
};
use serde_json::json;

use crate::error::ApiError;

/// `POST /trigger` — body: `{"name":..., "description":..., "feelings":[...]}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewTrigger>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HealthStore,
{
  let trigger = store.create_trigger(body).await?;
  Ok((StatusCode::CREATED, Json(json!({ "trigger_id": trigger.trigger_id }))))
}

/// `GET /triggers`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Trigger>>, ApiError>
where
  S: HealthStore,
{
  Ok(Json(store.list_triggers().await?))
}
