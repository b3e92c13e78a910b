//! Trigger — a named situation tied to an emotional reaction.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named situation/stimulus and the feelings it evokes. Intensity ratings
/// are attached later as [`TriggerEntry`](crate::entry::TriggerEntry)
/// records referencing `trigger_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
  pub trigger_id:  u64,
  /// Unique disregarding case; lookups lowercase both sides.
  pub name:        String,
  pub description: Option<String>,
  /// Ordered list of feelings associated with this trigger.
  #[serde(default)]
  pub feelings:    Vec<String>,
}

/// Input to [`HealthStore::create_trigger`](crate::store::HealthStore::create_trigger).
/// `trigger_id` is always assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrigger {
  pub name:        String,
  pub description: Option<String>,
  #[serde(default)]
  pub feelings:    Vec<String>,
}

impl NewTrigger {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::Validation("name must not be empty".into()));
    }
    Ok(())
  }
}
