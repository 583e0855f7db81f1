// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! runIT: a personal exercise log.
//!
//! Users sign up or log in, record workouts (start time, duration,
//! distance), browse their history and review totals and averages. Data is
//! kept in a local SQLite file.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use error::{AppError, Result};
pub use services::{LoginOutcome, SignupOutcome, Tracker};
