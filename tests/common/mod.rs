// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use runit::db::SqliteDb;
use runit::models::Exercise;
use runit::Tracker;

/// Create an in-memory test database.
#[allow(dead_code)]
pub fn test_db() -> SqliteDb {
    SqliteDb::open_in_memory().expect("Failed to open in-memory database")
}

/// Create a tracker with a fresh database and nobody logged in.
#[allow(dead_code)]
pub fn test_tracker() -> Tracker {
    Tracker::new(test_db())
}

/// Create a tracker with `username` signed up and logged in.
#[allow(dead_code)]
pub fn logged_in_tracker(username: &str) -> Tracker {
    let mut tracker = test_tracker();
    let outcome = tracker
        .signup_user(username, "secret")
        .expect("Signup failed");
    assert!(outcome.is_success(), "Signup rejected: {:?}", outcome);
    tracker
}

/// Build an exercise from `yyyy-MM-dd HH:mm` text.
#[allow(dead_code)]
pub fn make_exercise(timestamp: &str, duration_secs: i64, distance_km: f64) -> Exercise {
    let timestamp = Tracker::create_timestamp(timestamp).expect("Invalid test timestamp");
    Exercise::new(timestamp, duration_secs, distance_km).expect("Invalid test exercise")
}
