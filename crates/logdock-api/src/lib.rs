//! HTTP API for the logdock log store.
//!
//! Exposes log ingestion and the two query surfaces over REST:
//!
//! - `POST /api/logdata` ingests a single log record
//! - `GET /api/query_search` runs a full-text search with precise
//!   date bounds
//! - `GET /api/logs` browses records with year-granular date bounds
//! - `GET /api/health` reports server health and uptime
//!
//! Built on axum with a shared [`logdock_core`] record store behind
//! the handlers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::ApiServer;
pub use state::AppState;
