//! Vocabulary lookup backend
//!
//! Discovers word/definition/example tables in a MySQL server whose schema
//! is not known in advance, then answers word lookups over HTTP.
//!
//! - [`inspector`] builds the startup snapshot of candidate tables
//! - [`search`] probes candidates, falling back to a loose full rescan
//! - [`database`] holds the pool and the `SchemaCatalog` seam
//! - `api` (feature `server`) exposes the REST endpoints

pub mod config;
pub mod database;
pub mod error;
pub mod inspector;
pub mod search;

#[cfg(feature = "server")]
pub mod api;

pub use config::AppConfig;
pub use database::{DatabaseConfig, DatabaseManager, SchemaCatalog};
pub use error::{CatalogError, ConfigError, LookupError};
pub use inspector::{inspect, CandidateTable, InspectionSummary, Vocabulary};
pub use search::{SearchEngine, SearchLimits, SearchResult};
