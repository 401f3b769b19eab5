//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. `seq` preserves insertion order for
//! listing; `contact_id` is the hex identifier handed to clients.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id  TEXT NOT NULL UNIQUE,   -- 24 lowercase hex digits
    document    TEXT NOT NULL           -- JSON object, without _id
);

PRAGMA user_version = 1;
";
