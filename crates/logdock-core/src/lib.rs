//! # logdock-core
//!
//! Log record model, query-filter engine, and record store for logdock.
//!
//! This crate provides:
//!
//! - [`LogRecord`] / [`NewLogRecord`] — Structured log records with
//!   optional nested metadata
//! - [`FilterSpec`] — Normalized, validated filter criteria
//! - [`SearchParams`] / [`BrowseParams`] — The two raw query-parameter
//!   shapes and their filter builders
//! - [`RecordStore`] — Abstract queryable collection of records
//! - [`MemoryStore`] — Thread-safe in-memory backend
//!
//! ## Example
//!
//! ```rust
//! use logdock_core::{MemoryStore, NewLogRecord, RecordStore, SearchParams};
//! use chrono::{TimeZone, Utc};
//!
//! let store = MemoryStore::new();
//! store.insert(NewLogRecord {
//!     level: "ERROR".to_string(),
//!     message: "disk full".to_string(),
//!     ..NewLogRecord::at(Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap())
//! })?;
//!
//! let params = SearchParams {
//!     level: Some("error".to_string()),
//!     ..SearchParams::default()
//! };
//! let results = store.search(&params.to_filter()?)?;
//! assert_eq!(results.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod query;
pub mod store;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{FilterError, StoreError};
pub use filter::{FilterSpec, TextFilter, TextMatch, TimeRange};
pub use query::{BrowseParams, SearchParams};
pub use store::{MemoryStore, MemoryStoreConfig, SharedStore, shared_store};
pub use traits::RecordStore;
pub use types::{LogRecord, Metadata, NewLogRecord, RecordId};
