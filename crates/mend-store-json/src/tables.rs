//! Schemaless document tables and the business-key allocator.
//!
//! A [`Table`] holds raw JSON records keyed by a per-table internal id,
//! mirroring the on-disk layout `{"<table>": {"<internal_id>": {record}}}`.
//! Queries at this level are order-preserving full scans driven by
//! caller-supplied predicates; indexing happens a layer up.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Table names, as they appear in the persisted file.
pub const CLIENTS: &str = "clients";
pub const TRIGGERS: &str = "triggers";
pub const MOOD_HISTORY: &str = "mood_history";
pub const TRIGGER_HISTORY: &str = "trigger_history";

/// A record's storage-internal id, distinct from any business key carried
/// inside the record itself.
pub type InternalId = u64;

// ─── Table ───────────────────────────────────────────────────────────────────

/// One named collection of schemaless records.
///
/// The `BTreeMap` keeps records in internal-id order, which is insertion
/// order: scans and listings are stable across calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
  records: BTreeMap<InternalId, Value>,
}

impl Table {
  /// Insert a record, returning its newly assigned internal id. Internal
  /// ids start at 1 and are never reused.
  pub fn insert(&mut self, record: Value) -> InternalId {
    let id = self.records.last_key_value().map_or(1, |(id, _)| id + 1);
    self.records.insert(id, record);
    id
  }

  /// Retrieve a record by internal id.
  pub fn get(&self, id: InternalId) -> Option<&Value> {
    self.records.get(&id)
  }

  /// All records matching `predicate`, in insertion order.
  pub fn search<P>(&self, predicate: P) -> Vec<&Value>
  where
    P: Fn(&Value) -> bool,
  {
    self.records.values().filter(|record| predicate(record)).collect()
  }

  /// The first record matching `predicate`, scanning in insertion order.
  pub fn get_first<P>(&self, predicate: P) -> Option<&Value>
  where
    P: Fn(&Value) -> bool,
  {
    self.records.values().find(|record| predicate(record))
  }

  /// Every record with its internal id, in insertion order.
  pub fn all(&self) -> impl Iterator<Item = (InternalId, &Value)> {
    self.records.iter().map(|(id, record)| (*id, record))
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Compute the next business key for `key_field`: scan every record,
  /// read the field as an unsigned integer (0 when absent or non-numeric),
  /// take the maximum, add one. An empty table yields 1.
  ///
  /// Only safe while the owning store holds its writer lock; two unlocked
  /// callers could compute the same key.
  pub fn next_key(&self, key_field: &str) -> u64 {
    self
      .records
      .values()
      .map(|record| record.get(key_field).and_then(Value::as_u64).unwrap_or(0))
      .max()
      .unwrap_or(0)
      + 1
  }
}

// ─── TableSet ────────────────────────────────────────────────────────────────

/// The full set of named tables persisted in one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet {
  tables: BTreeMap<String, Table>,
}

impl TableSet {
  /// Read access to a table; an unknown name reads as an empty table.
  pub fn table(&self, name: &str) -> &Table {
    static EMPTY: Table = Table { records: BTreeMap::new() };
    self.tables.get(name).unwrap_or(&EMPTY)
  }

  /// Write access to a table, creating it if absent.
  pub fn table_mut(&mut self, name: &str) -> &mut Table {
    self.tables.entry(name.to_string()).or_default()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn next_key_on_empty_table_is_one() {
    let table = Table::default();
    assert_eq!(table.next_key("client_id"), 1);
  }

  #[test]
  fn next_key_is_max_plus_one_regardless_of_insertion_order() {
    let mut table = Table::default();
    table.insert(json!({ "id": 7 }));
    table.insert(json!({ "id": 3 }));
    table.insert(json!({ "id": 5 }));
    assert_eq!(table.next_key("id"), 8);
  }

  #[test]
  fn next_key_treats_missing_field_as_zero() {
    let mut table = Table::default();
    table.insert(json!({ "unrelated": true }));
    assert_eq!(table.next_key("id"), 1);
  }

  #[test]
  fn internal_ids_are_sequential_from_one() {
    let mut table = Table::default();
    assert_eq!(table.insert(json!({})), 1);
    assert_eq!(table.insert(json!({})), 2);
    assert_eq!(table.insert(json!({})), 3);
  }

  #[test]
  fn search_preserves_insertion_order() {
    let mut table = Table::default();
    table.insert(json!({ "n": 1 }));
    table.insert(json!({ "n": 2 }));
    table.insert(json!({ "n": 3 }));

    let odd = table.search(|r| r["n"].as_i64().is_some_and(|n| n % 2 == 1));
    let ns: Vec<i64> = odd.iter().filter_map(|r| r["n"].as_i64()).collect();
    assert_eq!(ns, vec![1, 3]);
  }

  #[test]
  fn tableset_round_trips_through_json() {
    let mut tables = TableSet::default();
    tables.table_mut(CLIENTS).insert(json!({ "client_id": 1 }));
    tables.table_mut(TRIGGERS).insert(json!({ "trigger_id": 1, "name": "Stress" }));

    let text = serde_json::to_string(&tables).unwrap();
    let reloaded: TableSet = serde_json::from_str(&text).unwrap();

    assert_eq!(reloaded.table(CLIENTS).len(), 1);
    assert_eq!(
      reloaded.table(TRIGGERS).get(1).and_then(|r| r["name"].as_str()),
      Some("Stress"),
    );
  }
}
