//! # RMP Common Library
//!
//! Shared code for the Research Match Platform services including:
//! - Entity models (departments, disciplines, majors, faculty, students, projects)
//! - The `EntityStore` accessor contract and its SQLite implementation
//! - Common error types
//! - Configuration resolution

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use error::{Error, Result};
pub use store::{EntityStore, Role};
