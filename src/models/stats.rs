// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise statistics: totals and averages over a user's history.
//!
//! Statistics are recomputed from the full exercise list on every request
//! and never stored.

use serde::Serialize;
use std::fmt;

use crate::models::Exercise;
use crate::time_utils::format_duration;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Aggregates over a sequence of exercises.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of exercises
    pub total_exercises: usize,
    /// Sum of distances (km)
    pub total_distance: f64,
    /// Sum of durations (seconds)
    pub total_duration: u64,
    /// Mean exercise
    pub avg_exercise: AverageExercise,
}

/// Synthetic "mean" exercise.
///
/// Duration is the truncated integer mean of all durations. Speed is total
/// distance over total time, not the mean of per-exercise speeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AverageExercise {
    /// Mean duration (seconds, truncated)
    pub duration_secs: u64,
    /// Mean distance (km)
    pub distance_km: f64,
    /// Overall speed (km/h)
    pub avg_speed: f64,
}

impl Statistics {
    pub fn new(exercises: &[Exercise]) -> Self {
        let total_exercises = exercises.len();
        let total_distance: f64 = exercises.iter().map(Exercise::distance_km).sum();
        let total_duration: u64 = exercises
            .iter()
            .map(|e| u64::from(e.duration_secs()))
            .sum();

        // Empty input gives a zero-valued average
        let avg_exercise = if total_exercises == 0 {
            AverageExercise::default()
        } else {
            let count = total_exercises as u64;
            AverageExercise {
                duration_secs: total_duration / count,
                distance_km: total_distance / count as f64,
                avg_speed: overall_speed(total_distance, total_duration),
            }
        };

        Self {
            total_exercises,
            total_distance,
            total_duration,
            avg_exercise,
        }
    }

    pub fn total_exercises(&self) -> usize {
        self.total_exercises
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    pub fn avg_exercise(&self) -> &AverageExercise {
        &self.avg_exercise
    }
}

impl AverageExercise {
    pub fn avg_speed(&self) -> f64 {
        self.avg_speed
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_to_string(&self) -> String {
        format_duration(self.duration_secs)
    }
}

fn overall_speed(distance_km: f64, duration_secs: u64) -> f64 {
    if duration_secs == 0 {
        return 0.0;
    }
    distance_km / (duration_secs as f64 / SECONDS_PER_HOUR)
}

impl fmt::Display for AverageExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duration {}, avgSpeed {:.2} km/h, distance {:.2} km",
            self.duration_to_string(),
            self.avg_speed,
            self.distance_km
        )
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total exercises:   {}", self.total_exercises)?;
        writeln!(f, "Total distance:    {:.2} km", self.total_distance)?;
        writeln!(f, "Total duration:    {}", format_duration(self.total_duration))?;
        writeln!(f, "Average speed:     {:.2} km/h", self.avg_exercise.avg_speed)?;
        writeln!(f, "Average duration:  {}", self.avg_exercise.duration_to_string())?;
        write!(f, "Average distance:  {:.2} km", self.avg_exercise.distance_km)
    }
}
