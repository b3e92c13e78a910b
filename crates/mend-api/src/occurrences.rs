//! Handlers for trigger-history endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/trigger-history` | Body: [`Occurrence`]; 404 when the trigger name is unknown |
//! | `POST` | `/trigger-history/batch` | Body: `{"triggers": [...]}`; all-or-nothing |
//! | `GET`  | `/trigger-history/:full_name` | `[{date, trigger_name, intensity, feelings}]` |
//! | `GET`  | `/chart-data/:full_name` | Both history series in one payload |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use mend_core::{
  Error,
  entry::{Occurrence, TriggerReport},
  store::HealthStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{error::ApiError, moods::MoodPoint};

/// `POST /trigger-history` — body: `{"trigger_name": "Stress", "intensity": 5}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Occurrence>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HealthStore,
{
  let entry = store.record_occurrence(body).await?;
  Ok((StatusCode::CREATED, Json(json!({ "history_id": entry.id }))))
}

/// JSON body accepted by `POST /trigger-history/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchBody {
  pub triggers: Vec<Occurrence>,
}

/// `POST /trigger-history/batch` — one unknown trigger name fails the whole
/// batch; nothing is persisted.
pub async fn create_batch<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<BatchBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HealthStore,
{
  let entries = store.record_occurrences(body.triggers).await?;
  let ids: Vec<u64> = entries.iter().map(|entry| entry.id).collect();
  Ok((StatusCode::CREATED, Json(json!({ "history_ids": ids }))))
}

/// `GET /trigger-history/:full_name`
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Path(full_name): Path<String>,
) -> Result<Json<Vec<TriggerReport>>, ApiError>
where
  S: HealthStore,
{
  let reports = trigger_reports(store.as_ref(), &full_name).await?;
  Ok(Json(reports))
}

// ─── Chart data ──────────────────────────────────────────────────────────────

/// Both history series for a client, as consumed by the charting frontend.
#[derive(Debug, Serialize)]
pub struct ChartData {
  pub mood:     Vec<MoodPoint>,
  pub triggers: Vec<TriggerReport>,
}

/// `GET /chart-data/:full_name`
pub async fn chart_data<S>(
  State(store): State<Arc<S>>,
  Path(full_name): Path<String>,
) -> Result<Json<ChartData>, ApiError>
where
  S: HealthStore,
{
  let mood = crate::moods::mood_points(store.as_ref(), &full_name).await?;
  let triggers = trigger_reports(store.as_ref(), &full_name).await?;
  Ok(Json(ChartData { mood, triggers }))
}

/// Resolve a client by full name and fetch their enriched trigger history.
pub(crate) async fn trigger_reports<S>(
  store: &S,
  full_name: &str,
) -> Result<Vec<TriggerReport>, ApiError>
where
  S: HealthStore,
{
  let client = store
    .find_client_by_name(full_name)
    .await?
    .ok_or_else(|| Error::ClientNotFound(full_name.to_string()))?;
  Ok(store.trigger_history(client.client_id).await?)
}
