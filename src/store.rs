/// Feature record storage

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use dashmap::DashMap;
use crate::record::FeatureRecord;

/// A record together with the identifier it was stored under
#[derive(Debug, Clone)]
pub struct StoredFeature {
    pub id: String,
    pub record: Arc<FeatureRecord>,
}

/// Backing store for ingested records
///
/// Identifiers are 24 lowercase hex digits and increase with insertion
/// order, so sorting by id lists records oldest first.
pub trait FeatureStore: Send + Sync {
    /// Stores a record and returns its new id
    fn insert(&self, record: FeatureRecord) -> String;

    /// Stores records in order and returns their ids
    fn insert_many(&self, records: Vec<FeatureRecord>) -> Vec<String> {
        records.into_iter().map(|record| self.insert(record)).collect()
    }

    /// All records, oldest first
    fn list(&self) -> Vec<StoredFeature>;

    fn get(&self, id: &str) -> Option<StoredFeature>;

    /// The oldest record still stored
    fn first(&self) -> Option<StoredFeature> {
        self.list().into_iter().next()
    }

    /// Removes every record and returns how many were removed
    fn delete_all(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store backed by a concurrent map
#[derive(Default)]
pub struct MemoryStore {
    records: Arc<DashMap<String, Arc<FeatureRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{:024x}", n)
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl FeatureStore for MemoryStore {
    fn insert(&self, record: FeatureRecord) -> String {
        let id = self.allocate_id();
        self.records.insert(id.clone(), Arc::new(record));
        id
    }

    fn list(&self) -> Vec<StoredFeature> {
        let mut all: Vec<StoredFeature> = self
            .records
            .iter()
            .map(|entry| StoredFeature {
                id: entry.key().clone(),
                record: Arc::clone(entry.value()),
            })
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    fn get(&self, id: &str) -> Option<StoredFeature> {
        self.records.get(id).map(|entry| StoredFeature {
            id: entry.key().clone(),
            record: Arc::clone(entry.value()),
        })
    }

    fn first(&self) -> Option<StoredFeature> {
        self.records
            .iter()
            .min_by(|a, b| a.key().cmp(b.key()))
            .map(|entry| StoredFeature {
                id: entry.key().clone(),
                record: Arc::clone(entry.value()),
            })
    }

    fn delete_all(&self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
