//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and the progress document
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the user/progress repository

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbUser, Progress, ProgressUpdate};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, UserStorage};
