//! In-memory record storage.
//!
//! This module provides:
//! - [`MemoryStore`] — Thread-safe append-only record storage
//! - [`MemoryStoreConfig`] — Capacity configuration
//! - [`SharedStore`] — `Arc` handle used by the HTTP layer
//!
//! Each query is a pure function of the filter and the store snapshot;
//! writes take the lock briefly so a record and its metadata appear
//! atomically to concurrent readers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::filter::FilterSpec;
use crate::traits::RecordStore;
use crate::types::{LogRecord, NewLogRecord, RecordId};

/// Configuration for the in-memory store.
#[derive(Debug, Clone, Copy)]
pub struct MemoryStoreConfig {
    /// Maximum number of records accepted before inserts are rejected.
    pub max_records: usize,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_records: 1_000_000,
        }
    }
}

/// Thread-safe in-memory record store.
///
/// Records are kept in insertion order, which is also the natural order
/// queries return them in. Identities are assigned from a monotonic
/// counter starting at 1 and never reused.
pub struct MemoryStore {
    config: MemoryStoreConfig,
    records: RwLock<Vec<LogRecord>>,
    next_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MemoryStoreConfig::default())
    }

    /// Creates a store with the given configuration.
    #[must_use]
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            config,
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MemoryStoreConfig {
        &self.config
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, record: NewLogRecord) -> Result<RecordId, StoreError> {
        let mut records = self.records.write();
        if records.len() >= self.config.max_records {
            return Err(StoreError::CapacityExceeded);
        }

        let id = RecordId(self.next_id.fetch_add(1, Ordering::Relaxed));
        // Record and metadata land in one push under the write lock, so
        // no reader ever observes a half-written pair.
        records.push(LogRecord::from_new(id, record));

        debug!(id = id.0, total = records.len(), "record stored");
        Ok(id)
    }

    fn search(&self, filter: &FilterSpec) -> Result<Vec<LogRecord>, StoreError> {
        let records = self.records.read();
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn get(&self, id: RecordId) -> Option<LogRecord> {
        let records = self.records.read();
        // Ids are assigned in insertion order, so binary search works.
        records
            .binary_search_by_key(&id, |record| record.id)
            .ok()
            .map(|index| records[index].clone())
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.records.write().clear();
        Ok(())
    }
}

/// Shared store handle.
pub type SharedStore = Arc<dyn RecordStore>;

/// Creates a shared in-memory store with the default configuration.
#[must_use]
pub fn shared_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}
