// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for parsing and formatting user-entered times, durations
//! and distances.

use chrono::{NaiveDateTime, Timelike};

use crate::error::{AppError, Result};

/// Format of the date field of the entry form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format of the time field of the entry form.
pub const TIME_FORMAT: &str = "%H:%M";
/// Minute-precision timestamp format used for display.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Second-precision timestamp format used for storage.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Parse `yyyy-MM-dd HH:mm` (or with trailing `:ss`) into a timestamp.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, DISPLAY_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, STORAGE_FORMAT))
        .map_err(|_| {
            AppError::Parse(format!(
                "timestamp '{}': expected yyyy-MM-dd HH:mm",
                text
            ))
        })
}

/// Drop sub-second precision.
pub fn truncate_to_seconds(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}

/// Parse `HH:MM:SS` into total seconds.
///
/// The hour field may have any number of digits; minutes and seconds are
/// exactly two digits in `00..=59`.
pub fn parse_duration(text: &str) -> Result<u32> {
    let text = text.trim();
    let invalid = || AppError::Parse(format!("duration '{}': expected HH:MM:SS", text));

    let parts: Vec<&str> = text.split(':').collect();
    let [hours, minutes, seconds] = parts[..] else {
        return Err(invalid());
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || minutes.len() != 2 || seconds.len() != 2 {
        return Err(invalid());
    }
    if !all_digits(minutes) || !all_digits(seconds) {
        return Err(invalid());
    }

    let hours: u64 = hours.parse().map_err(|_| invalid())?;
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
    if minutes >= SECONDS_PER_MINUTE || seconds >= SECONDS_PER_MINUTE {
        return Err(invalid());
    }

    hours
        .checked_mul(SECONDS_PER_HOUR)
        .map(|total| total + minutes * SECONDS_PER_MINUTE + seconds)
        .and_then(|total| u32::try_from(total).ok())
        .ok_or_else(invalid)
}

/// Format total seconds as zero-padded `HH:MM:SS`. Hours are not capped.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parse a decimal distance in kilometers.
pub fn parse_distance(text: &str) -> Result<f64> {
    let text = text.trim();
    let invalid = || {
        AppError::Parse(format!(
            "distance '{}': expected a non-negative number of kilometers",
            text
        ))
    };

    let distance: f64 = text.parse().map_err(|_| invalid())?;
    if !distance.is_finite() || distance < 0.0 {
        return Err(invalid());
    }
    Ok(distance)
}
