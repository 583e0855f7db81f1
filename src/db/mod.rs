//! Database layer (SQLite).

pub mod sqlite;

pub use sqlite::SqliteDb;

/// Account created on first run so the app can be tried without signing up.
pub mod demo_user {
    pub const USERNAME: &str = "test";
    pub const PASSWORD: &str = "pass";
}
