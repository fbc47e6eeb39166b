//! Database module for frequency-backfill
//!
//! Provides PostgreSQL operations on the dictionary `words` table.

pub mod connection;
pub mod models;
pub mod words;

pub use connection::{create_pool, create_pool_from_env, ping, DbPool};
pub use models::*;
pub use words::{PgWordStore, WordStore};
