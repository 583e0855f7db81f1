// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite store with typed operations.
//!
//! Provides operations for:
//! - Users (accounts, looked up by username)
//! - Exercises (workouts owned by a user)
//!
//! The schema is created on open and every statement in it is idempotent,
//! so reopening an existing file is safe.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::db::demo_user;
use crate::error::{AppError, Result};
use crate::models::{Exercise, User};
use crate::time_utils::STORAGE_FORMAT;

/// SQLite database handle.
pub struct SqliteDb {
    conn: Connection,
}

impl SqliteDb {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            AppError::Database(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let db = Self::init(conn)?;

        tracing::info!(path = %path.display(), "Opened database");
        Ok(db)
    }

    /// Open a private in-memory database (tests, dry runs).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by exact (case-sensitive) username.
    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(User {
                        id: Some(row.get(0)?),
                        username: row.get(1)?,
                        password: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Insert a new user and return it with its storage id.
    ///
    /// Fails if the username is already taken.
    pub fn create_user(&self, user: &User) -> Result<User> {
        self.conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![user.username, user.password],
        )?;

        let mut created = user.clone();
        created.id = Some(self.conn.last_insert_rowid());
        tracing::debug!(username = %created.username, id = ?created.id, "Stored user");
        Ok(created)
    }

    /// Create the demo account if it does not exist yet.
    ///
    /// Returns `true` if the account was created.
    pub fn seed_demo_user(&self) -> Result<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO users (username, password) VALUES (?1, ?2)",
            params![demo_user::USERNAME, demo_user::PASSWORD],
        )?;
        if inserted > 0 {
            tracing::info!(username = demo_user::USERNAME, "Created demo user");
        }
        Ok(inserted > 0)
    }

    /// Number of stored users.
    pub fn count_users(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// Get all exercises owned by `user`, most recent first.
    ///
    /// Exercises with the same timestamp are ordered most recently
    /// inserted first.
    pub fn find_exercises_by_user(&self, user: &User) -> Result<Vec<Exercise>> {
        let user_id = stored_id(user)?;

        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, duration, distance FROM exercises
             WHERE user_id = ?1
             ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, timestamp, duration, distance)| -> Result<Exercise> {
                let timestamp = NaiveDateTime::parse_from_str(&timestamp, STORAGE_FORMAT)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Invalid timestamp '{}' in exercise {}: {}",
                            timestamp, id, e
                        ))
                    })?;
                let exercise = Exercise::new(timestamp, duration, distance).map_err(|e| {
                    AppError::Database(format!("Invalid stored exercise {}: {}", id, e))
                })?;
                Ok(exercise.with_ids(id, user_id))
            })
            .collect()
    }

    /// Store an exercise for `user` and return it with its storage ids.
    pub fn create_exercise(&self, exercise: &Exercise, user: &User) -> Result<Exercise> {
        let user_id = stored_id(user)?;

        self.conn.execute(
            "INSERT INTO exercises (user_id, timestamp, duration, distance)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                exercise.timestamp().format(STORAGE_FORMAT).to_string(),
                exercise.duration_secs(),
                exercise.distance_km(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(user_id, id, "Stored exercise");
        Ok(exercise.clone().with_ids(id, user_id))
    }

    /// Delete one of `user`'s exercises.
    ///
    /// Matches on storage id when the exercise has one, otherwise deletes
    /// the oldest stored exercise equal by value. Returns `false` if nothing
    /// matched.
    pub fn delete_exercise(&self, exercise: &Exercise, user: &User) -> Result<bool> {
        let user_id = stored_id(user)?;

        let deleted = match exercise.id {
            Some(id) => self.conn.execute(
                "DELETE FROM exercises WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
            )?,
            None => self.conn.execute(
                "DELETE FROM exercises WHERE id = (
                     SELECT id FROM exercises
                     WHERE user_id = ?1 AND timestamp = ?2 AND duration = ?3 AND distance = ?4
                     ORDER BY id LIMIT 1
                 )",
                params![
                    user_id,
                    exercise.timestamp().format(STORAGE_FORMAT).to_string(),
                    exercise.duration_secs(),
                    exercise.distance_km(),
                ],
            )?,
        };

        Ok(deleted > 0)
    }

    /// Number of stored exercises across all users.
    pub fn count_exercises(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Storage id of a user that must already be persisted.
fn stored_id(user: &User) -> Result<i64> {
    user.id
        .ok_or_else(|| AppError::NotFound(format!("User {} has not been stored", user)))
}
