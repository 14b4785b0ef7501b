//! Record storage access.
//!
//! Ticket data lives in a host-owned record/metadata store. [`RecordStore`]
//! is the narrow read-only window the resolver needs into it: the storage
//! kind of a record, its metadata values, and an unbounded metadata equality
//! query. [`MemoryStore`] is a deterministic in-memory implementation for
//! tests and embedding without a real store.

use std::collections::BTreeMap;

/// Read-only access to the record store backing the ticket providers.
///
/// Implementations are supplied by the embedding host. All methods are
/// fail-soft: unknown records yield `None` or empty collections, never
/// errors.
pub trait RecordStore: Send + Sync {
    /// Returns the storage kind of a record, or `None` when the record does
    /// not exist.
    fn kind_of(&self, id: i64) -> Option<String>;

    /// Returns the first stored value of a metadata field.
    fn meta(&self, id: i64, key: &str) -> Option<String>;

    /// Returns every stored value of a metadata field, in storage order.
    fn meta_all(&self, id: i64, key: &str) -> Vec<String>;

    /// Returns the ids of all records of `kind` whose `key` metadata equals
    /// `value`.
    ///
    /// The result is the complete match set, never a page of it.
    fn find_by_meta(&self, kind: &str, key: &str, value: &str) -> Vec<i64>;
}

/// An in-memory [`RecordStore`].
///
/// Records are kept ordered by id, so queries return deterministic results.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<i64, MemoryRecord>,
}

#[derive(Debug, Clone, Default)]
struct MemoryRecord {
    kind: String,
    meta: BTreeMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a record with the given storage kind.
    pub fn with_record(mut self, id: i64, kind: impl Into<String>) -> Self {
        self.records.entry(id).or_default().kind = kind.into();
        self
    }

    /// Builder method to append a metadata value to a record.
    ///
    /// A record created this way alone has no storage kind; combine with
    /// [`MemoryStore::with_record`].
    pub fn with_meta(mut self, id: i64, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records
            .entry(id)
            .or_default()
            .meta
            .entry(key.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Returns the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn kind_of(&self, id: i64) -> Option<String> {
        self.records
            .get(&id)
            .map(|record| record.kind.clone())
            .filter(|kind| !kind.is_empty())
    }

    fn meta(&self, id: i64, key: &str) -> Option<String> {
        self.records.get(&id)?.meta.get(key)?.first().cloned()
    }

    fn meta_all(&self, id: i64, key: &str) -> Vec<String> {
        self.records
            .get(&id)
            .and_then(|record| record.meta.get(key))
            .cloned()
            .unwrap_or_default()
    }

    fn find_by_meta(&self, kind: &str, key: &str, value: &str) -> Vec<i64> {
        self.records
            .iter()
            .filter(|(_, record)| record.kind == kind)
            .filter(|(_, record)| {
                record
                    .meta
                    .get(key)
                    .is_some_and(|values| values.iter().any(|v| v == value))
            })
            .map(|(id, _)| *id)
            .collect()
    }
}
