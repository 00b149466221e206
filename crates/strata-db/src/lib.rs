//! Strata local persistence layer.
//!
//! A SQLite-backed string key-value store. Each persisted sub-collection of an
//! analysis lives under its own key.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};

use std::path::Path;

/// Open the database at `db_path` and bring its schema up to date.
pub fn init_pool(db_path: &Path) -> DbResult<DbPool> {
    let pool = DbPool::open(db_path)?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}

/// In-memory database with the schema applied.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
