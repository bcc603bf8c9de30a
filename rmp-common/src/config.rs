//! Configuration resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Compiled default (fallback)

use std::path::PathBuf;

/// Default HTTP port for the rmp-api service
pub const DEFAULT_PORT: u16 = 5850;

/// Environment variable naming the database file
pub const DATABASE_ENV_VAR: &str = "RMP_DATABASE";

/// Default database file name, relative to the working directory
pub const DEFAULT_DATABASE: &str = "rmp.db";

/// Resolve the database path from CLI argument, environment, or default.
pub fn resolve_database_path(cli_arg: Option<&str>) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    PathBuf::from(DEFAULT_DATABASE)
}
