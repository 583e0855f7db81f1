// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.
//!
//! Login and signup rejections are not errors: they are reported through
//! [`crate::services::LoginOutcome`] and [`crate::services::SignupOutcome`].

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An entity could not be constructed from the given values.
    #[error("Invalid value: {0}")]
    Validation(String),

    /// User input text could not be parsed.
    #[error("Could not parse {0}")]
    Parse(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Whether the error was caused by the caller's input rather than by
    /// the system, i.e. whether a corrective message is all that is needed.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, AppError::Database(_))
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, AppError>;
