// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod exercise;
pub mod session;
pub mod stats;
pub mod user;

pub use exercise::Exercise;
pub use session::Session;
pub use stats::{AverageExercise, Statistics};
pub use user::{Credentials, LengthViolation, User};
