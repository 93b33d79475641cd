pub mod aggregate;
pub mod backend;
pub mod codec;
pub mod content;
pub mod ingest;
pub mod migrations;
pub mod schema;

pub use backend::DuckDbBackend;

/// Re-export the `duckdb` crate so consumers (especially tests) can use
/// `folio_duckdb::duckdb::params!` without an extra dependency.
pub use duckdb;
