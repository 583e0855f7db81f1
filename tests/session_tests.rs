// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, signup and logout flows.

use runit::db::SqliteDb;
use runit::models::Session;
use runit::{LoginOutcome, SignupOutcome, Tracker};

mod common;

#[test]
fn test_signup_logs_user_in() {
    let mut tracker = common::test_tracker();

    let outcome = tracker.signup_user("alice", "secret").unwrap();

    assert_eq!(outcome, SignupOutcome::Success);
    assert_eq!(tracker.user().map(|u| u.username.as_str()), Some("alice"));
    assert!(tracker.user().and_then(|u| u.id).is_some());
}

#[test]
fn test_signup_rejects_short_credentials_without_storing() {
    let db = common::test_db();
    let mut tracker = Tracker::new(db);

    assert_eq!(
        tracker.signup_user("ab", "secret").unwrap(),
        SignupOutcome::TooShort
    );
    assert_eq!(
        tracker.signup_user("alice", "s").unwrap(),
        SignupOutcome::TooShort
    );
    assert_eq!(tracker.session(), &Session::LoggedOut);

    // Neither attempt left a record behind
    assert_eq!(
        tracker.login_user("ab", "secret").unwrap(),
        LoginOutcome::UnknownUser
    );
    assert_eq!(
        tracker.login_user("alice", "s").unwrap(),
        LoginOutcome::UnknownUser
    );
}

#[test]
fn test_signup_rejects_long_credentials() {
    let mut tracker = common::test_tracker();

    assert_eq!(
        tracker.signup_user(&"a".repeat(33), "secret").unwrap(),
        SignupOutcome::TooLong
    );
    assert_eq!(
        tracker.signup_user("alice", &"s".repeat(33)).unwrap(),
        SignupOutcome::TooLong
    );
    assert!(tracker.user().is_none());
}

#[test]
fn test_signup_boundaries_accepted() {
    let mut tracker = common::test_tracker();
    assert!(tracker.signup_user("abc", "pw").unwrap().is_success());

    tracker.logout();
    assert!(tracker
        .signup_user(&"a".repeat(32), &"p".repeat(32))
        .unwrap()
        .is_success());
}

#[test]
fn test_signup_taken_username() {
    let db = SqliteDb::open_in_memory().unwrap();
    db.create_user(&runit::models::User::new("alice", "first"))
        .unwrap();
    let mut tracker = Tracker::new(db);

    let outcome = tracker.signup_user("alice", "second").unwrap();

    assert_eq!(outcome, SignupOutcome::UsernameTaken);
    assert!(tracker.user().is_none());

    // Original password still works, the new one does not
    assert_eq!(
        tracker.login_user("alice", "second").unwrap(),
        LoginOutcome::WrongPassword
    );
    assert_eq!(
        tracker.login_user("alice", "first").unwrap(),
        LoginOutcome::Success
    );
}

#[test]
fn test_login_and_logout() {
    let mut tracker = common::logged_in_tracker("alice");
    tracker.logout();
    assert_eq!(tracker.session(), &Session::LoggedOut);

    let outcome = tracker.login_user("alice", "secret").unwrap();

    assert!(outcome.is_success());
    assert!(tracker.session().is_logged_in());
    assert_eq!(tracker.user().unwrap().to_string(), "alice");

    let logged_out = tracker.logout();
    assert_eq!(logged_out.map(|u| u.username), Some("alice".to_string()));
    assert!(tracker.user().is_none());
}

#[test]
fn test_login_wrong_password_stays_logged_out() {
    let mut tracker = common::logged_in_tracker("alice");
    tracker.logout();

    let outcome = tracker.login_user("alice", "Secret").unwrap();

    assert_eq!(outcome, LoginOutcome::WrongPassword);
    assert_eq!(tracker.session(), &Session::LoggedOut);
}

#[test]
fn test_login_is_case_sensitive() {
    let mut tracker = common::logged_in_tracker("alice");
    tracker.logout();

    assert_eq!(
        tracker.login_user("Alice", "secret").unwrap(),
        LoginOutcome::UnknownUser
    );
}

#[test]
fn test_logout_when_logged_out_is_noop() {
    let mut tracker = common::test_tracker();

    assert!(tracker.logout().is_none());
    assert!(tracker.logout().is_none());
    assert_eq!(tracker.session(), &Session::LoggedOut);
}

#[test]
fn test_demo_user_can_log_in() {
    let db = common::test_db();
    db.seed_demo_user().unwrap();
    let mut tracker = Tracker::new(db);

    assert!(tracker.login_user("test", "pass").unwrap().is_success());
}
