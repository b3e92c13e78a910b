//! Handlers for mood endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/mood` | Body: [`NewMoodEntry`]; returns 201 + `{"mood_id": n}` |
//! | `GET`  | `/mood-history/:full_name` | `[{date, mood}]` for the resolved client |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use mend_core::{Error, entry::NewMoodEntry, store::HealthStore};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;

/// One point of a client's mood series.
#[derive(Debug, Clone, Serialize)]
pub struct MoodPoint {
  pub date: DateTime<Utc>,
  pub mood: i64,
}

/// `POST /mood` — body: `{"client_id": 1, "mood": 7}`; `client_id` optional.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewMoodEntry>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HealthStore,
{
  let entry = store.record_mood(body).await?;
  Ok((StatusCode::CREATED, Json(json!({ "mood_id": entry.id }))))
}

/// `GET /mood-history/:full_name`
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Path(full_name): Path<String>,
) -> Result<Json<Vec<MoodPoint>>, ApiError>
where
  S: HealthStore,
{
  let points = mood_points(store.as_ref(), &full_name).await?;
  Ok(Json(points))
}

/// Resolve a client by full name and shape their mood history. Shared with
/// the chart-data handler.
pub(crate) async fn mood_points<S>(store: &S, full_name: &str) -> Result<Vec<MoodPoint>, ApiError>
where
  S: HealthStore,
{
  let client = store
    .find_client_by_name(full_name)
    .await?
    .ok_or_else(|| Error::ClientNotFound(full_name.to_string()))?;

  let history = store.mood_history(client.client_id).await?;
  Ok(
    history
      .into_iter()
      .map(|entry| MoodPoint { date: entry.entry_date, mood: entry.mood })
      .collect(),
  )
}
