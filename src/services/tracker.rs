// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise tracking service.
//!
//! Owns the login session and the store, and handles the core workflow:
//! 1. Sign up or log in
//! 2. Parse and record exercises for the logged-in user
//! 3. List or delete recorded exercises
//! 4. Compute statistics over the user's history
//!
//! Operations take `&mut self` whenever they change the session, so session
//! transitions are serialized by the borrow checker.

use chrono::NaiveDateTime;

use crate::db::SqliteDb;
use crate::error::{AppError, Result};
use crate::models::{Credentials, Exercise, LengthViolation, Session, Statistics, User};
use crate::time_utils::{parse_distance, parse_duration, parse_timestamp};

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    UnknownUser,
    WrongPassword,
}

impl LoginOutcome {
    pub fn is_success(self) -> bool {
        self == LoginOutcome::Success
    }

    pub fn message(self) -> &'static str {
        match self {
            LoginOutcome::Success => "Login successful",
            LoginOutcome::UnknownUser => "User does not exist",
            LoginOutcome::WrongPassword => "Wrong password",
        }
    }
}

/// Result of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    /// User created and logged in
    Success,
    TooShort,
    TooLong,
    UsernameTaken,
}

impl SignupOutcome {
    pub fn is_success(self) -> bool {
        self == SignupOutcome::Success
    }

    pub fn message(self) -> &'static str {
        match self {
            SignupOutcome::Success => "New user created",
            SignupOutcome::TooShort => "Username or password too short",
            SignupOutcome::TooLong => "Username or password too long",
            SignupOutcome::UsernameTaken => "Username taken",
        }
    }
}

/// Session-aware front door to the exercise log.
pub struct Tracker {
    db: SqliteDb,
    session: Session,
}

impl Tracker {
    pub fn new(db: SqliteDb) -> Self {
        Self {
            db,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    // ─── Session ─────────────────────────────────────────────────

    /// Log in with plain-text credentials.
    ///
    /// A rejected login leaves any current session untouched.
    pub fn login_user(&mut self, username: &str, password: &str) -> Result<LoginOutcome> {
        let Some(user) = self.db.find_user_by_username(username)? else {
            tracing::info!(username, "Login failed: unknown user");
            return Ok(LoginOutcome::UnknownUser);
        };

        if user.password != password {
            tracing::info!(username, "Login failed: wrong password");
            return Ok(LoginOutcome::WrongPassword);
        }

        tracing::info!(username, "User logged in");
        self.session = Session::LoggedIn(user);
        Ok(LoginOutcome::Success)
    }

    /// Create an account and log it in.
    ///
    /// Length checks run before storage is touched.
    pub fn signup_user(&mut self, username: &str, password: &str) -> Result<SignupOutcome> {
        let credentials = Credentials::new(username, password);
        if let Some(violation) = credentials.length_violation() {
            let outcome = match violation {
                LengthViolation::TooShort => SignupOutcome::TooShort,
                LengthViolation::TooLong => SignupOutcome::TooLong,
            };
            tracing::info!(username, ?outcome, "Signup rejected");
            return Ok(outcome);
        }

        if self.db.find_user_by_username(username)?.is_some() {
            tracing::info!(username, "Signup rejected: username taken");
            return Ok(SignupOutcome::UsernameTaken);
        }

        let user = self.db.create_user(&credentials.into_user())?;
        tracing::info!(username, "User signed up");
        self.session = Session::LoggedIn(user);
        Ok(SignupOutcome::Success)
    }

    /// End the session. A no-op when nobody is logged in.
    ///
    /// Returns the user that was logged out.
    pub fn logout(&mut self) -> Option<User> {
        let user = self.session.end();
        if let Some(user) = &user {
            tracing::info!(username = %user, "User logged out");
        }
        user
    }

    fn require_user(&self) -> Result<&User> {
        self.session.user().ok_or(AppError::NotLoggedIn)
    }

    // ─── Exercises ───────────────────────────────────────────────

    /// Store an exercise for the logged-in user.
    pub fn add_exercise(&self, exercise: Exercise) -> Result<Exercise> {
        let user = self.require_user()?;
        let stored = self.db.create_exercise(&exercise, user)?;
        tracing::info!(
            username = %user,
            id = ?stored.id,
            exercise = %stored,
            "Exercise added"
        );
        Ok(stored)
    }

    /// Parse raw form fields and store the resulting exercise.
    ///
    /// Fields: date `yyyy-MM-dd`, time `HH:mm`, duration `HH:MM:SS`,
    /// distance in km.
    pub fn record_exercise(
        &self,
        date: &str,
        time: &str,
        duration: &str,
        distance: &str,
    ) -> Result<Exercise> {
        self.require_user()?;

        let timestamp = Self::create_timestamp(&format!("{} {}", date.trim(), time.trim()))?;
        let duration_secs = Self::create_duration(duration)?;
        let distance_km = Self::create_distance(distance)?;

        let exercise = Exercise::new(timestamp, i64::from(duration_secs), distance_km)?;
        self.add_exercise(exercise)
    }

    /// Delete one of the logged-in user's exercises.
    pub fn delete_exercise(&self, exercise: &Exercise) -> Result<()> {
        let user = self.require_user()?;

        if !self.db.delete_exercise(exercise, user)? {
            return Err(AppError::NotFound(format!("Exercise {}", exercise)));
        }

        tracing::info!(username = %user, id = ?exercise.id, "Exercise deleted");
        Ok(())
    }

    /// The logged-in user's exercises, most recent first.
    pub fn history(&self) -> Result<Vec<Exercise>> {
        let user = self.require_user()?;
        self.db.find_exercises_by_user(user)
    }

    /// Statistics over the full history, recomputed on each call.
    pub fn statistics(&self) -> Result<Statistics> {
        let history = self.history()?;
        Ok(Statistics::new(&history))
    }

    // ─── Input Parsing ───────────────────────────────────────────

    /// Parse `yyyy-MM-dd HH:mm` text.
    pub fn create_timestamp(text: &str) -> Result<NaiveDateTime> {
        parse_timestamp(text)
    }

    /// Parse `HH:MM:SS` text into seconds.
    pub fn create_duration(text: &str) -> Result<u32> {
        parse_duration(text)
    }

    /// Parse decimal kilometers.
    pub fn create_distance(text: &str) -> Result<f64> {
        parse_distance(text)
    }
}
