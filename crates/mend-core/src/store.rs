//! The `HealthStore` trait — the seam between the data-access layer and
//! everything that serves it.
//!
//! The trait is implemented by storage backends (e.g. `mend-store-json`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  Result,
  client::{Client, NewClient},
  entry::{MoodEntry, NewMoodEntry, Occurrence, TriggerEntry, TriggerReport},
  trigger::{NewTrigger, Trigger},
};

/// Abstraction over a mend storage backend.
///
/// All writes are append-only: entities are created once and never updated
/// or deleted. Backends must serialise mutating operations so that
/// business-key allocation stays race-free when callers overlap.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait HealthStore: Send + Sync {
  // ── Clients ───────────────────────────────────────────────────────────

  /// Create and persist a client, enforcing email and phone-number
  /// uniqueness. Fails with [`Error::Duplicate`](crate::Error::Duplicate)
  /// before anything is inserted.
  fn create_client(
    &self,
    input: NewClient,
  ) -> impl Future<Output = Result<Client>> + Send + '_;

  /// Retrieve a client by business key. `None` if not found.
  fn get_client(
    &self,
    client_id: u64,
  ) -> impl Future<Output = Result<Option<Client>>> + Send + '_;

  /// Resolve a `"First Last"` string to a client, case-insensitively.
  /// First match wins; `None` if no client matches.
  fn find_client_by_name<'a>(
    &'a self,
    full_name: &'a str,
  ) -> impl Future<Output = Result<Option<Client>>> + Send + 'a;

  /// Every client, in insertion order.
  fn list_clients(&self) -> impl Future<Output = Result<Vec<Client>>> + Send + '_;

  // ── Triggers ──────────────────────────────────────────────────────────

  /// Create and persist a trigger, enforcing case-insensitive name
  /// uniqueness.
  fn create_trigger(
    &self,
    input: NewTrigger,
  ) -> impl Future<Output = Result<Trigger>> + Send + '_;

  /// Resolve a trigger by name, case-insensitively. `None` if no trigger
  /// matches.
  fn find_trigger_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Trigger>>> + Send + 'a;

  /// Every trigger, in insertion order.
  fn list_triggers(&self) -> impl Future<Output = Result<Vec<Trigger>>> + Send + '_;

  // ── History — append-only writes ──────────────────────────────────────

  /// Record a mood entry. `entry_date` defaults to now; the referenced
  /// client is not checked for existence.
  fn record_mood(
    &self,
    input: NewMoodEntry,
  ) -> impl Future<Output = Result<MoodEntry>> + Send + '_;

  /// Record one trigger occurrence, resolving its trigger by name first.
  /// Fails with [`Error::TriggerNotFound`](crate::Error::TriggerNotFound)
  /// and inserts nothing when the name does not resolve.
  fn record_occurrence(
    &self,
    input: Occurrence,
  ) -> impl Future<Output = Result<TriggerEntry>> + Send + '_;

  /// Record a batch of occurrences. Every name is resolved before the
  /// first insert; one unknown name fails the whole batch with zero
  /// entries persisted.
  fn record_occurrences(
    &self,
    inputs: Vec<Occurrence>,
  ) -> impl Future<Output = Result<Vec<TriggerEntry>>> + Send + '_;

  // ── History — reads ───────────────────────────────────────────────────

  /// All mood entries for a client, in insertion order.
  fn mood_history(
    &self,
    client_id: u64,
  ) -> impl Future<Output = Result<Vec<MoodEntry>>> + Send + '_;

  /// All trigger occurrences for a client, each joined with its trigger's
  /// name and feelings. Entries whose trigger no longer resolves are
  /// skipped rather than failing the response.
  fn trigger_history(
    &self,
    client_id: u64,
  ) -> impl Future<Output = Result<Vec<TriggerReport>>> + Send + '_;
}
