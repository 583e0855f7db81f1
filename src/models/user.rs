//! User model for storage and sessions.

use serde::Serialize;
use std::fmt;
use validator::{Validate, ValidationError};

/// User account stored in the `users` table.
///
/// Passwords are stored and compared as plain text.
#[derive(Clone, Serialize)]
pub struct User {
    /// Storage row id (None until persisted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Unique, case-sensitive login name
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}

impl Eq for User {}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Which length bound a rejected [`Credentials`] broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthViolation {
    TooShort,
    TooLong,
}

/// Signup form input, checked against the account length bounds
/// (username 3-32 characters, password 2-32).
#[derive(Validate)]
pub struct Credentials {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 2, max = 32))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Check both fields, `None` if they are within bounds.
    ///
    /// A field below its minimum wins over one above its maximum.
    pub fn length_violation(&self) -> Option<LengthViolation> {
        let errors = self.validate().err()?;

        let too_short = errors.field_errors().iter().any(|(field, field_errors)| {
            let len = match &**field {
                "username" => char_len(&self.username),
                "password" => char_len(&self.password),
                _ => return false,
            };
            field_errors.iter().any(|e| below_min(e, len))
        });

        Some(if too_short {
            LengthViolation::TooShort
        } else {
            LengthViolation::TooLong
        })
    }

    pub fn into_user(self) -> User {
        User::new(self.username, self.password)
    }
}

fn char_len(s: &str) -> u64 {
    s.chars().count() as u64
}

fn below_min(error: &ValidationError, len: u64) -> bool {
    error
        .params
        .get("min")
        .and_then(serde_json::Value::as_u64)
        .is_some_and(|min| len < min)
}
