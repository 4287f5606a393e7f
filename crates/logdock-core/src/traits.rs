//! Trait for record store backends.
//!
//! The query engine treats storage as an abstract queryable collection;
//! this trait is the seam. The in-memory [`crate::store::MemoryStore`]
//! is the only backend shipped here, but the HTTP layer and tests only
//! depend on the trait.

use crate::error::StoreError;
use crate::filter::FilterSpec;
use crate::types::{LogRecord, NewLogRecord, RecordId};

/// Abstract queryable collection of log records.
///
/// Implementors must make each insert atomic: a record and its optional
/// metadata become visible together or not at all.
pub trait RecordStore: Send + Sync {
    /// Persists a new record, assigning and returning its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot accept the record.
    fn insert(&self, record: NewLogRecord) -> Result<RecordId, StoreError>;

    /// Returns every record satisfying the filter, in the store's
    /// natural (insertion) order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot execute the query; the
    /// whole request fails, no partial results are returned.
    fn search(&self, filter: &FilterSpec) -> Result<Vec<LogRecord>, StoreError>;

    /// Looks up a single record by identity.
    fn get(&self, id: RecordId) -> Option<LogRecord>;

    /// Returns the number of stored records.
    fn len(&self) -> usize;

    /// Returns true if the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all records.
    ///
    /// # Errors
    ///
    /// Returns an error if clearing fails.
    fn clear(&self) -> Result<(), StoreError>;
}
