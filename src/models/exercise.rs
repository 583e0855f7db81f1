// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise model: one logged workout.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{AppError, Result};
use crate::time_utils::{format_duration, truncate_to_seconds, DISPLAY_FORMAT};

/// Seconds per hour, for km/h conversions.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Years that format as exactly four digits, keeping stored timestamps
/// in chronological order when sorted as text.
const SUPPORTED_YEARS: RangeInclusive<i32> = 0..=9999;

/// A single workout entry.
///
/// Equality compares timestamp, duration and distance only; storage id and
/// owner are ignored.
#[derive(Debug, Clone, Serialize)]
pub struct Exercise {
    /// Storage row id (None until persisted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Owning user's storage id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// When the workout started (second precision)
    timestamp: NaiveDateTime,
    /// Duration in seconds
    duration_secs: u32,
    /// Distance in kilometers
    distance_km: f64,
}

impl Exercise {
    /// Create an exercise from already-parsed values.
    ///
    /// Fails with [`AppError::Validation`] on a year outside `0..=9999`, a
    /// negative (or out of range) duration, or a negative or non-finite
    /// distance.
    pub fn new(timestamp: NaiveDateTime, duration_secs: i64, distance_km: f64) -> Result<Self> {
        if !SUPPORTED_YEARS.contains(&timestamp.year()) {
            return Err(AppError::Validation(format!(
                "year must be between {} and {}, got {}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end(),
                timestamp.year()
            )));
        }
        let duration_secs = u32::try_from(duration_secs).map_err(|_| {
            AppError::Validation(format!("duration must be non-negative, got {}", duration_secs))
        })?;
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(AppError::Validation(format!(
                "distance must be a non-negative number, got {}",
                distance_km
            )));
        }

        Ok(Self {
            id: None,
            user_id: None,
            timestamp: truncate_to_seconds(timestamp),
            duration_secs,
            distance_km,
        })
    }

    /// Attach storage identity (used when reconstructing stored rows).
    pub fn with_ids(mut self, id: i64, user_id: i64) -> Self {
        self.id = Some(id);
        self.user_id = Some(user_id);
        self
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Average speed in km/h. A zero duration yields `0.0`.
    pub fn avg_speed(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.distance_km / (f64::from(self.duration_secs) / SECONDS_PER_HOUR)
    }

    /// Duration as zero-padded `HH:MM:SS`.
    pub fn duration_to_string(&self) -> String {
        format_duration(u64::from(self.duration_secs))
    }
}

impl PartialEq for Exercise {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.duration_secs == other.duration_secs
            && self.distance_km == other.distance_km
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, duration {}, avgSpeed {:.2} km/h, distance {:.2} km",
            self.timestamp.format(DISPLAY_FORMAT),
            self.duration_to_string(),
            self.avg_speed(),
            self.distance_km
        )
    }
}
