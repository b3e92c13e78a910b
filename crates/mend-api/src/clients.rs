//! Handlers for client endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/client` | Body: [`NewClient`]; returns 201 + `{"client_id": n}` |
//! | `GET`  | `/client/:full_name` | 404 if no case-insensitive match |
//! | `GET`  | `/clients` | All clients, in insertion order |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use mend_core::{
  Error,
  client::{Client, NewClient},
  store::HealthStore,
};
use serde_json::json;

use crate::error::ApiError;

/// `POST /client` — body: `{"first_name":..., "last_name":..., "email":..., "phone_number":...}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewClient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HealthStore,
{
  let client = store.create_client(body).await?;
  Ok((StatusCode::CREATED, Json(json!({ "client_id": client.client_id }))))
}

/// `GET /client/:full_name` — e.g. `/client/John%20Smith`
pub async fn get_by_name<S>(
  State(store): State<Arc<S>>,
  Path(full_name): Path<String>,
) -> Result<Json<Client>, ApiError>
where
  S: HealthStore,
{
  let client = store
    .find_client_by_name(&full_name)
    .await?
    .ok_or_else(|| Error::ClientNotFound(full_name.clone()))?;
  Ok(Json(client))
}

/// `GET /clients`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Client>>, ApiError>
where
  S: HealthStore,
{
  Ok(Json(store.list_clients().await?))
}
