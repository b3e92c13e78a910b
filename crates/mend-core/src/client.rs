//! Client — the person whose moods and triggers are being tracked.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A tracked client.
///
/// `client_id` is the application-assigned sequential business key,
/// independent of the record's storage-internal id. Email and phone number
/// are each unique across all clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
  pub client_id:    u64,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub phone_number: String,
}

/// Input to [`HealthStore::create_client`](crate::store::HealthStore::create_client).
/// `client_id` is always assigned by the store; it is not accepted from
/// callers.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub phone_number: String,
}

impl NewClient {
  /// Reject empty required fields before any store work happens.
  pub fn validate(&self) -> Result<()> {
    for (field, value) in [
      ("first_name", &self.first_name),
      ("last_name", &self.last_name),
      ("email", &self.email),
      ("phone_number", &self.phone_number),
    ] {
      if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
      }
    }
    Ok(())
  }
}
