//! Storage - Database session and transaction scope
//!
//! Wraps the catalog with session identity (current role, security switch)
//! and a snapshot-based transaction scope that rolls catalog mutations back
//! on abort.

mod database;
mod error;

pub use database::Database;
pub use error::StorageError;
