//! History entries — mood ratings and trigger occurrences over time.
//!
//! Entries reference clients and triggers by business key. The referent's
//! existence is not checked at write time; reads tolerate a dangling key by
//! skipping the entry rather than failing the whole response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The client written to when a caller does not name one.
///
/// The system is effectively single-user; several write paths record
/// against one implicit client.
pub const DEFAULT_CLIENT_ID: u64 = 1;

// ─── Mood ────────────────────────────────────────────────────────────────────

/// A single mood rating for a client at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
  pub id:         u64,
  pub client_id:  u64,
  pub mood:       i64,
  /// Set once at creation; never updated afterwards.
  pub entry_date: DateTime<Utc>,
}

/// Input to [`HealthStore::record_mood`](crate::store::HealthStore::record_mood).
/// `entry_date` defaults to the moment of recording when absent; `client_id`
/// defaults to [`DEFAULT_CLIENT_ID`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewMoodEntry {
  pub client_id:  Option<u64>,
  pub mood:       i64,
  pub entry_date: Option<DateTime<Utc>>,
}

// ─── Trigger occurrences ─────────────────────────────────────────────────────

/// A recorded occurrence of a trigger, with its intensity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEntry {
  pub id:         u64,
  pub client_id:  u64,
  pub trigger_id: u64,
  pub intensity:  i64,
  pub entry_date: DateTime<Utc>,
}

/// A trigger occurrence as submitted by callers: the trigger is named, not
/// keyed. Resolution to a `trigger_id` happens inside the store, before
/// anything is inserted.
#[derive(Debug, Clone, Deserialize)]
pub struct Occurrence {
  pub trigger_name: String,
  pub intensity:    i64,
  pub client_id:    Option<u64>,
  pub entry_date:   Option<DateTime<Utc>>,
}

/// A trigger-history entry joined with its trigger's name and feelings,
/// shaped for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerReport {
  pub date:         DateTime<Utc>,
  pub trigger_name: String,
  pub intensity:    i64,
  pub feelings:     Vec<String>,
}
