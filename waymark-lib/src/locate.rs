//! One-shot position lookup used to center the map at startup.

use std::env;
use thiserror::Error;

use crate::config::LocationConfig;
use crate::workout::GeoPoint;

/// Overrides every other position source when set. Format: "lat,lng".
pub const POSITION_ENV_VAR: &str = "WAYMARK_POSITION";

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("No position is configured. Set [location] latitude/longitude in the config file or export {POSITION_ENV_VAR}=\"lat,lng\".")]
    Unavailable,
    #[error("Position lookups are disabled in the configuration.")]
    Disabled,
    #[error("Could not parse position {0:?}: expected \"lat,lng\" in decimal degrees")]
    Malformed(String),
}

pub trait LocationProvider {
    /// Resolves the current position once.
    /// # Errors
    /// Returns `LocateError` if no position source yields a usable point.
    fn current_position(&self) -> Result<GeoPoint, LocateError>;
}

/// Resolves the position from the environment override, then from the
/// `[location]` section of the config file.
pub struct ConfigLocator {
    location: LocationConfig,
}

impl ConfigLocator {
    #[must_use]
    pub fn new(location: LocationConfig) -> Self {
        ConfigLocator { location }
    }
}

impl LocationProvider for ConfigLocator {
    fn current_position(&self) -> Result<GeoPoint, LocateError> {
        if let Ok(raw) = env::var(POSITION_ENV_VAR) {
            return parse_position(&raw);
        }
        if !self.location.enabled {
            return Err(LocateError::Disabled);
        }
        match (self.location.latitude, self.location.longitude) {
            (Some(latitude), Some(longitude)) => Ok(GeoPoint {
                latitude,
                longitude,
            }),
            _ => Err(LocateError::Unavailable),
        }
    }
}

fn parse_position(raw: &str) -> Result<GeoPoint, LocateError> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| LocateError::Malformed(raw.to_string()))?;
    let latitude = lat
        .trim()
        .parse()
        .map_err(|_| LocateError::Malformed(raw.to_string()))?;
    let longitude = lng
        .trim()
        .parse()
        .map_err(|_| LocateError::Malformed(raw.to_string()))?;
    Ok(GeoPoint {
        latitude,
        longitude,
    })
}
