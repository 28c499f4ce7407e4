//! SQL DDL for initializing the user store.

/// SQLite schema with:
/// - `username` TEXT PRIMARY KEY (the only uniqueness guarantee)
/// - `password` hex digest of the password
/// - `progress` JSON document, may be NULL on rows created by older builds
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password TEXT,
    progress TEXT
);
"#;

/// Added to tables created before progress tracking existed.
pub const ADD_PROGRESS_COLUMN: &str = "ALTER TABLE users ADD COLUMN progress TEXT";
