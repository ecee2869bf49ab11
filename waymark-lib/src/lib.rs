use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// --- Declare modules ---
mod config;
mod locate;
mod storage;
mod validate;
mod workout;

// --- Expose public types ---
pub use config::{
    get_config_path, load_config, parse_color, save_config, Config, ConfigError, LocationConfig,
    StandardColor, Theme,
};
pub use locate::{ConfigLocator, LocateError, LocationProvider, POSITION_ENV_VAR};
pub use storage::{get_data_path, Storage, StorageError};
pub use validate::{is_numeric_format, is_positive};
pub use workout::{GeoPoint, Workout, WorkoutDetails, WorkoutType};

#[derive(Error, Debug)]
pub enum CreateWorkoutError {
    #[error("Invalid Input provided!!")]
    InvalidInput,
    #[error("Click the map to choose a location first.")]
    NoLocationSelected,
    #[error("Failed to persist workout list: {0}")]
    Persist(#[from] StorageError),
}

/// Raw form values as entered, not yet validated.
#[derive(Debug, Clone)]
pub struct WorkoutDraft {
    pub workout_type: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

pub struct AppService {
    pub config: Config,
    pub config_path: PathBuf,
    workouts: Vec<Workout>,
    storage: Storage,
}

impl AppService {
    /// Initializes the application service.
    /// # Errors
    /// Returns `anyhow::Error` if config or data path determination or loading fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load_config(&config_path)
            .context(format!("Failed to load config from {config_path:?}"))?;

        let data_path = storage::get_data_path().context("Failed to determine data file path")?;

        info!(
            config = %config_path.display(),
            data = %data_path.display(),
            "service initialized"
        );

        Ok(Self::new(config, config_path, Storage::new(data_path)))
    }

    #[must_use]
    pub fn new(config: Config, config_path: PathBuf, storage: Storage) -> Self {
        Self {
            config,
            config_path,
            workouts: Vec::new(),
            storage,
        }
    }

    /// Workouts recorded this session, in creation order.
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    #[must_use]
    pub fn data_path(&self) -> &Path {
        self.storage.path()
    }

    /// Creates a workout from raw form input at the clicked location.
    ///
    /// Validation mirrors the form rules: running requires distance,
    /// duration and cadence to be numeric and positive; cycling requires
    /// distance, duration and elevation to be numeric but checks
    /// positivity only for distance and duration, since a descent ride
    /// carries a negative elevation gain.
    ///
    /// On success the workout is appended to the session list and the
    /// whole list is persisted. A failed persist rolls the append back,
    /// so the list and the stored copy never disagree.
    /// # Errors
    /// - `CreateWorkoutError::NoLocationSelected` if no map click preceded the submit.
    /// - `CreateWorkoutError::InvalidInput` if validation fails.
    /// - `CreateWorkoutError::Persist` if the list could not be written.
    pub fn create_workout(
        &mut self,
        draft: &WorkoutDraft,
        point: Option<GeoPoint>,
    ) -> Result<Workout, CreateWorkoutError> {
        let point = point.ok_or(CreateWorkoutError::NoLocationSelected)?;

        let distance = draft.distance.as_str();
        let duration = draft.duration.as_str();

        let workout = match draft.workout_type {
            WorkoutType::Running => {
                let cadence = draft.cadence.as_str();
                if !validate::is_numeric_format(&[distance, duration, cadence])
                    || !validate::is_positive(&[distance, duration, cadence])
                {
                    return Err(CreateWorkoutError::InvalidInput);
                }
                Workout::running(
                    point,
                    parse_value(distance),
                    parse_value(duration),
                    parse_value(cadence),
                )
            }
            WorkoutType::Cycling => {
                let elevation = draft.elevation.as_str();
                if !validate::is_numeric_format(&[distance, duration, elevation])
                    || !validate::is_positive(&[distance, duration])
                {
                    return Err(CreateWorkoutError::InvalidInput);
                }
                Workout::cycling(
                    point,
                    parse_value(distance),
                    parse_value(duration),
                    parse_value(elevation),
                )
            }
        };

        self.workouts.push(workout.clone());
        if let Err(err) = self.storage.save(&self.workouts) {
            self.workouts.pop();
            return Err(err.into());
        }

        debug!(
            id = %workout.id,
            kind = %workout.workout_type(),
            lat = workout.point.latitude,
            lng = workout.point.longitude,
            "workout recorded"
        );
        Ok(workout)
    }
}

// --- Helper Functions ---

// Inputs reaching this point already passed the format check, so a
// parse failure cannot happen for them.
fn parse_value(input: &str) -> f64 {
    input.parse().unwrap_or_default()
}
