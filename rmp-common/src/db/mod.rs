//! Database initialization and the SQLite-backed entity store

pub mod init;
pub mod sql_store;

pub use init::*;
pub use sql_store::SqlStore;
