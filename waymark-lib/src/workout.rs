use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A position on the map, in decimal degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    /// Capitalized form used in list headers and map popups.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }
}

impl TryFrom<&str> for WorkoutType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            _ => anyhow::bail!("Invalid workout type string: {}", value),
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutType::Running => write!(f, "running"),
            WorkoutType::Cycling => write!(f, "cycling"),
        }
    }
}

/// Type-specific fields. The derived metric is computed once at
/// construction and stored, never recomputed on display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running { cadence: f64, pace_min_per_km: f64 },
    Cycling { elevation_gain_m: f64, speed_kmh: f64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub point: GeoPoint,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl Workout {
    /// Creates a running workout, deriving pace as duration / distance.
    #[must_use]
    pub fn running(point: GeoPoint, distance_km: f64, duration_min: f64, cadence: f64) -> Self {
        Workout {
            id: new_workout_id(),
            date: Utc::now(),
            point,
            distance_km,
            duration_min,
            details: WorkoutDetails::Running {
                cadence,
                pace_min_per_km: duration_min / distance_km,
            },
        }
    }

    /// Creates a cycling workout, deriving speed as distance over hours.
    #[must_use]
    pub fn cycling(
        point: GeoPoint,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Workout {
            id: new_workout_id(),
            date: Utc::now(),
            point,
            distance_km,
            duration_min,
            details: WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_kmh: distance_km / (duration_min / 60.0),
            },
        }
    }

    #[must_use]
    pub fn workout_type(&self) -> WorkoutType {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutType::Running,
            WorkoutDetails::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// Display heading like "Running on April 14".
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{} on {}",
            self.workout_type().label(),
            self.date.format("%B %-d")
        )
    }
}

fn new_workout_id() -> String {
    Uuid::new_v4().simple().to_string()
}
