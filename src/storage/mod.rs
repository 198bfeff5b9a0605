//! Storage layer for the FBRef dashboard CLI
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Upserts, filtered fetches, and reference lists

pub mod models;
pub mod queries;
pub mod schema;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use queries::IdCaches;
pub use schema::StatsDatabase;
