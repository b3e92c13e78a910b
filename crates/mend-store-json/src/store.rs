//! [`JsonStore`] — the single-file JSON implementation of [`HealthStore`].

use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::Utc;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use mend_core::{
  Error, Result,
  client::{Client, NewClient},
  entry::{DEFAULT_CLIENT_ID, MoodEntry, NewMoodEntry, Occurrence, TriggerEntry, TriggerReport},
  lookup::{FullName, normalize},
  store::HealthStore,
  trigger::{NewTrigger, Trigger},
};

use crate::tables::{CLIENTS, InternalId, MOOD_HISTORY, TRIGGER_HISTORY, TRIGGERS, TableSet};

// ─── Indexes ─────────────────────────────────────────────────────────────────

/// In-memory secondary indexes over the client and trigger tables: a
/// normalised key maps to the internal id of the first record inserted with
/// it. Rebuilt from the tables on load, maintained on insert.
///
/// Uniqueness checks and name lookups read these instead of scanning;
/// history queries still scan with predicates.
#[derive(Debug, Default)]
struct Indexes {
  client_email: HashMap<String, InternalId>,
  client_phone: HashMap<String, InternalId>,
  client_name:  HashMap<FullName, InternalId>,
  trigger_name: HashMap<String, InternalId>,
}

impl Indexes {
  fn add_client(&mut self, client: &Client, id: InternalId) {
    self.client_email.entry(client.email.clone()).or_insert(id);
    self.client_phone.entry(client.phone_number.clone()).or_insert(id);
    let name = FullName {
      first: normalize(&client.first_name),
      last:  normalize(&client.last_name),
    };
    // First insert wins, preserving first-match resolution for clients
    // that share a name.
    self.client_name.entry(name).or_insert(id);
  }

  fn add_trigger(&mut self, trigger: &Trigger, id: InternalId) {
    self.trigger_name.entry(normalize(&trigger.name)).or_insert(id);
  }

  fn rebuild(tables: &TableSet) -> Self {
    let mut indexes = Self::default();
    for (id, record) in tables.table(CLIENTS).all() {
      if let Ok(client) = decode::<Client>(record) {
        indexes.add_client(&client, id);
      }
    }
    for (id, record) in tables.table(TRIGGERS).all() {
      if let Ok(trigger) = decode::<Trigger>(record) {
        indexes.add_trigger(&trigger, id);
      }
    }
    indexes
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

struct Inner {
  tables:  TableSet,
  indexes: Indexes,
  /// `None` for an in-memory store; nothing is persisted.
  path:    Option<PathBuf>,
}

/// A mend store backed by a single JSON file.
///
/// All state sits behind one writer lock, taken for the full duration of
/// every operation. That serialises mutating callers, so the scan-based
/// key allocator in [`crate::tables::Table::next_key`] cannot hand out the
/// same key twice. No lock is held across an await point.
///
/// Cloning is cheap — the inner state is reference-counted.
#[derive(Clone)]
pub struct JsonStore {
  inner: Arc<Mutex<Inner>>,
}

impl JsonStore {
  /// Open (or create) a store persisted at `path`. Parent directories are
  /// created as needed and the file is written immediately so a fresh
  /// store is visible on disk.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent)?;
    }

    let tables: TableSet = if path.exists() {
      serde_json::from_str(&fs::read_to_string(&path)?)?
    } else {
      TableSet::default()
    };

    let indexes = Indexes::rebuild(&tables);
    let inner = Inner { tables, indexes, path: Some(path) };
    inner.persist()?;
    Ok(Self { inner: Arc::new(Mutex::new(inner)) })
  }

  /// Open a store that lives only in memory — useful for testing.
  pub fn open_in_memory() -> Self {
    Self {
      inner: Arc::new(Mutex::new(Inner {
        tables:  TableSet::default(),
        indexes: Indexes::default(),
        path:    None,
      })),
    }
  }

  /// Insert a raw record, bypassing models and indexes. Lets tests set up
  /// states the public API cannot produce (e.g. dangling foreign keys).
  #[cfg(test)]
  pub(crate) fn insert_raw(&self, table: &str, record: Value) {
    let mut guard = self.inner.lock();
    let inner = &mut *guard;
    inner.tables.table_mut(table).insert(record);
  }
}

impl Inner {
  /// Rewrite the whole backing file. Called after every mutation; there is
  /// no batching and no transaction spanning multiple inserts.
  fn persist(&self) -> Result<()> {
    if let Some(path) = &self.path {
      fs::write(path, serde_json::to_string_pretty(&self.tables)?)?;
    }
    Ok(())
  }

  /// Resolve a trigger name to its stored record via the name index.
  fn trigger_by_name(&self, name: &str) -> Result<Option<Trigger>> {
    let Some(&id) = self.indexes.trigger_name.get(&normalize(name)) else {
      return Ok(None);
    };
    self.tables.table(TRIGGERS).get(id).map(decode).transpose()
  }

  /// Insert one trigger entry and persist. The trigger must already be
  /// resolved; the client is deliberately not checked for existence.
  fn insert_occurrence(&mut self, trigger_id: u64, input: Occurrence) -> Result<TriggerEntry> {
    let table = self.tables.table_mut(TRIGGER_HISTORY);
    let entry = TriggerEntry {
      id: table.next_key("id"),
      client_id: input.client_id.unwrap_or(DEFAULT_CLIENT_ID),
      trigger_id,
      intensity: input.intensity,
      entry_date: input.entry_date.unwrap_or_else(Utc::now),
    };
    table.insert(serde_json::to_value(&entry)?);
    self.persist()?;
    Ok(entry)
  }
}

fn decode<T: DeserializeOwned>(record: &Value) -> Result<T> {
  Ok(serde_json::from_value(record.clone())?)
}

/// Does the record's `field` hold this unsigned integer?
fn field_eq(record: &Value, field: &str, expected: u64) -> bool {
  record.get(field).and_then(Value::as_u64) == Some(expected)
}

// ─── HealthStore impl ────────────────────────────────────────────────────────

impl HealthStore for JsonStore {
  // ── Clients ───────────────────────────────────────────────────────────────

  async fn create_client(&self, input: NewClient) -> Result<Client> {
    input.validate()?;

    let mut guard = self.inner.lock();
    let inner = &mut *guard;
    if inner.indexes.client_email.contains_key(&input.email) {
      return Err(Error::Duplicate { field: "email", value: input.email });
    }
    if inner.indexes.client_phone.contains_key(&input.phone_number) {
      return Err(Error::Duplicate { field: "phone_number", value: input.phone_number });
    }

    let table = inner.tables.table_mut(CLIENTS);
    let client = Client {
      client_id:    table.next_key("client_id"),
      first_name:   input.first_name,
      last_name:    input.last_name,
      email:        input.email,
      phone_number: input.phone_number,
    };
    let id = table.insert(serde_json::to_value(&client)?);
    inner.indexes.add_client(&client, id);
    inner.persist()?;
    Ok(client)
  }

  async fn get_client(&self, client_id: u64) -> Result<Option<Client>> {
    let inner = self.inner.lock();
    inner
      .tables
      .table(CLIENTS)
      .get_first(|record| field_eq(record, "client_id", client_id))
      .map(decode)
      .transpose()
  }

  async fn find_client_by_name(&self, full_name: &str) -> Result<Option<Client>> {
    let name = FullName::parse(full_name)?;
    let inner = self.inner.lock();
    let Some(&id) = inner.indexes.client_name.get(&name) else {
      return Ok(None);
    };
    inner.tables.table(CLIENTS).get(id).map(decode).transpose()
  }

  async fn list_clients(&self) -> Result<Vec<Client>> {
    let inner = self.inner.lock();
    inner
      .tables
      .table(CLIENTS)
      .all()
      .map(|(_, record)| decode(record))
      .collect()
  }

  // ── Triggers ──────────────────────────────────────────────────────────────

  async fn create_trigger(&self, input: NewTrigger) -> Result<Trigger> {
    input.validate()?;

    let mut guard = self.inner.lock();
    let inner = &mut *guard;
    if inner.indexes.trigger_name.contains_key(&normalize(&input.name)) {
      return Err(Error::Duplicate { field: "name", value: input.name });
    }

    let table = inner.tables.table_mut(TRIGGERS);
    let trigger = Trigger {
      trigger_id:  table.next_key("trigger_id"),
      name:        input.name,
      description: input.description,
      feelings:    input.feelings,
    };
    let id = table.insert(serde_json::to_value(&trigger)?);
    inner.indexes.add_trigger(&trigger, id);
    inner.persist()?;
    Ok(trigger)
  }

  async fn find_trigger_by_name(&self, name: &str) -> Result<Option<Trigger>> {
    self.inner.lock().trigger_by_name(name)
  }

  async fn list_triggers(&self) -> Result<Vec<Trigger>> {
    let inner = self.inner.lock();
    inner
      .tables
      .table(TRIGGERS)
      .all()
      .map(|(_, record)| decode(record))
      .collect()
  }

  // ── History — append-only writes ──────────────────────────────────────────

  async fn record_mood(&self, input: NewMoodEntry) -> Result<MoodEntry> {
    let mut guard = self.inner.lock();
    let inner = &mut *guard;
    let table = inner.tables.table_mut(MOOD_HISTORY);
    let entry = MoodEntry {
      id:         table.next_key("id"),
      client_id:  input.client_id.unwrap_or(DEFAULT_CLIENT_ID),
      mood:       input.mood,
      entry_date: input.entry_date.unwrap_or_else(Utc::now),
    };
    table.insert(serde_json::to_value(&entry)?);
    inner.persist()?;
    Ok(entry)
  }

  async fn record_occurrence(&self, input: Occurrence) -> Result<TriggerEntry> {
    let mut guard = self.inner.lock();
    let inner = &mut *guard;
    let trigger = inner
      .trigger_by_name(&input.trigger_name)?
      .ok_or_else(|| Error::TriggerNotFound(input.trigger_name.clone()))?;
    inner.insert_occurrence(trigger.trigger_id, input)
  }

  async fn record_occurrences(&self, inputs: Vec<Occurrence>) -> Result<Vec<TriggerEntry>> {
    let mut guard = self.inner.lock();
    let inner = &mut *guard;

    // Resolve every name before touching the history table, so one unknown
    // trigger fails the batch with zero inserts.
    let mut resolved = Vec::with_capacity(inputs.len());
    for input in inputs {
      let trigger = inner
        .trigger_by_name(&input.trigger_name)?
        .ok_or_else(|| Error::TriggerNotFound(input.trigger_name.clone()))?;
      resolved.push((trigger.trigger_id, input));
    }

    let mut entries = Vec::with_capacity(resolved.len());
    for (trigger_id, input) in resolved {
      entries.push(inner.insert_occurrence(trigger_id, input)?);
    }
    Ok(entries)
  }

  // ── History — reads ───────────────────────────────────────────────────────

  async fn mood_history(&self, client_id: u64) -> Result<Vec<MoodEntry>> {
    let inner = self.inner.lock();
    inner
      .tables
      .table(MOOD_HISTORY)
      .search(|record| field_eq(record, "client_id", client_id))
      .into_iter()
      .map(decode)
      .collect()
  }

  async fn trigger_history(&self, client_id: u64) -> Result<Vec<TriggerReport>> {
    let inner = self.inner.lock();
    let triggers = inner.tables.table(TRIGGERS);

    let mut reports = Vec::new();
    for record in inner
      .tables
      .table(TRIGGER_HISTORY)
      .search(|record| field_eq(record, "client_id", client_id))
    {
      let entry: TriggerEntry = decode(record)?;
      // A dangling trigger_id is tolerated: skip the entry rather than
      // failing the whole history.
      let Some(trigger_record) =
        triggers.get_first(|record| field_eq(record, "trigger_id", entry.trigger_id))
      else {
        continue;
      };
      let trigger: Trigger = decode(trigger_record)?;
      reports.push(TriggerReport {
        date:         entry.entry_date,
        trigger_name: trigger.name,
        intensity:    entry.intensity,
        feelings:     trigger.feelings,
      });
    }
    Ok(reports)
  }
}
