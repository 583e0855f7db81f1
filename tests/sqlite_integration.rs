// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests against an on-disk SQLite file.

use runit::db::SqliteDb;
use runit::{AppError, Tracker};
use rusqlite::{params, Connection};
use tempfile::tempdir;

mod common;
use common::make_exercise;

#[test]
fn test_open_creates_file() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("database.db");

    let db = SqliteDb::open(&db_path);

    assert!(db.is_ok(), "Database creation failed: {:?}", db.err().map(|e| e.to_string()));
    assert!(db_path.exists());
}

#[test]
fn test_data_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("database.db");

    {
        let mut tracker = Tracker::new(SqliteDb::open(&db_path).unwrap());
        assert!(tracker.signup_user("alice", "secret").unwrap().is_success());
        tracker
            .add_exercise(make_exercise("2018-01-31 10:10", 3600, 10.0))
            .unwrap();
    }

    // Reopening re-runs the schema without touching existing rows
    let mut tracker = Tracker::new(SqliteDb::open(&db_path).unwrap());
    assert!(tracker.user().is_none());
    assert!(tracker.login_user("alice", "secret").unwrap().is_success());

    let history = tracker.history().unwrap();
    assert_eq!(history, vec![make_exercise("2018-01-31 10:10", 3600, 10.0)]);
}

#[test]
fn test_seed_demo_user_idempotent_across_restarts() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("database.db");

    assert!(SqliteDb::open(&db_path).unwrap().seed_demo_user().unwrap());

    let db = SqliteDb::open(&db_path).unwrap();
    assert!(!db.seed_demo_user().unwrap());
    assert_eq!(db.count_users().unwrap(), 1);
}

#[test]
fn test_open_fails_in_missing_directory() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("no-such-dir").join("database.db");

    let result = SqliteDb::open(&db_path);

    assert!(matches!(result, Err(AppError::Database(_))));
}

#[test]
fn test_signup_taken_does_not_duplicate_rows() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("database.db");
    let mut tracker = Tracker::new(SqliteDb::open(&db_path).unwrap());
    tracker.signup_user("alice", "secret").unwrap();
    tracker.logout();

    tracker.signup_user("alice", "other").unwrap();

    assert_eq!(SqliteDb::open(&db_path).unwrap().count_users().unwrap(), 1);
}

#[test]
fn test_corrupt_row_reports_database_error_and_keeps_session() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("database.db");
    let mut tracker = Tracker::new(SqliteDb::open(&db_path).unwrap());
    assert!(tracker.signup_user("alice", "secret").unwrap().is_success());
    tracker
        .add_exercise(make_exercise("2018-01-31 10:10", 3600, 10.0))
        .unwrap();
    let user_id = tracker.user().and_then(|u| u.id).unwrap();

    // Another writer stores a row this crate cannot read back
    let other = Connection::open(&db_path).unwrap();
    other
        .execute(
            "INSERT INTO exercises (user_id, timestamp, duration, distance)
             VALUES (?1, 'last tuesday', 60, 1.0)",
            params![user_id],
        )
        .unwrap();
    drop(other);

    assert!(matches!(tracker.history(), Err(AppError::Database(_))));
    assert!(matches!(tracker.statistics(), Err(AppError::Database(_))));
    assert_eq!(tracker.user().map(|u| u.username.as_str()), Some("alice"));

    // Still usable: new rows go through, only reads of the bad row fail
    tracker
        .add_exercise(make_exercise("2018-02-01 10:10", 1800, 5.0))
        .unwrap();
    assert_eq!(tracker.user().map(|u| u.username.as_str()), Some("alice"));
}

#[test]
fn test_failed_user_insert_leaves_session_unchanged() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("database.db");
    let mut tracker = Tracker::new(SqliteDb::open(&db_path).unwrap());
    assert!(tracker.signup_user("alice", "secret").unwrap().is_success());

    // Block inserts into `users` so signup fails inside storage
    let other = Connection::open(&db_path).unwrap();
    other
        .execute_batch(
            "CREATE TRIGGER reject_users BEFORE INSERT ON users
             BEGIN SELECT RAISE(ABORT, 'read-only'); END;",
        )
        .unwrap();
    drop(other);

    let result = tracker.signup_user("bob", "secret");

    assert!(matches!(result, Err(AppError::Database(_))));
    assert_eq!(tracker.user().map(|u| u.username.as_str()), Some("alice"));
}
