use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::warn;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "waymark";
const CONFIG_ENV_VAR: &str = "WAYMARK_CONFIG_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
}

// Standard terminal colors, iterable so they can be parsed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Grey,
}

// Helper to parse a string into our StandardColor enum
pub fn parse_color(color_str: &str) -> Result<StandardColor, ConfigError> {
    for color in StandardColor::iter() {
        if format!("{:?}", color).eq_ignore_ascii_case(color_str) {
            return Ok(color);
        }
    }
    Err(ConfigError::InvalidColor(color_str.to_string()))
}

/// Position source used when no environment override is present.
/// Missing coordinates mean no position has been granted yet.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub enabled: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        LocationConfig {
            latitude: None,
            longitude: None,
            enabled: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    pub running_color: String,
    pub cycling_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            running_color: "Green".to_string(),
            cycling_color: "Yellow".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    pub location: LocationConfig,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: LocationConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    fn new_default() -> Self {
        Self::default()
    }
}

/// Determines the path to the configuration file.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir_override = std::env::var(CONFIG_ENV_VAR).ok();

    let config_dir_path = if let Some(path_str) = config_dir_override {
        let path = PathBuf::from(path_str);
        if !path.is_dir() {
            warn!(
                var = CONFIG_ENV_VAR,
                path = %path.display(),
                "environment override is not a directory, trying to create it"
            );
            fs::create_dir_all(&path)?;
        }
        path
    } else {
        let base_config_dir = dirs::config_dir().ok_or(ConfigError::CannotDetermineConfigDir)?;
        base_config_dir.join(APP_CONFIG_DIR)
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the TOML file at the given path.
/// A missing file is replaced with the defaults, which are also saved.
pub fn load_config(config_path: &Path) -> Result<Config, ConfigError> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content).map_err(ConfigError::TomlParse)?;
        Ok(config)
    } else {
        let default_config = Config::new_default();
        save_config(config_path, &default_config)?;
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
pub fn save_config(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config).map_err(ConfigError::TomlSerialize)?;
    fs::write(config_path, config_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_saved_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");

        let config = load_config(&path)?;
        assert!(path.exists());
        assert!(config.location.enabled);
        assert!(config.location.latitude.is_none());
        assert_eq!(config.theme.running_color, "Green");
        Ok(())
    }

    #[test]
    fn saved_config_round_trips() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.location.latitude = Some(41.39);
        config.location.longitude = Some(2.16);
        config.theme.cycling_color = "Magenta".to_string();
        save_config(&path, &config)?;

        let loaded = load_config(&path)?;
        assert_eq!(loaded.location.latitude, Some(41.39));
        assert_eq!(loaded.location.longitude, Some(2.16));
        assert_eq!(loaded.theme.cycling_color, "Magenta");
        Ok(())
    }

    #[test]
    fn partial_file_falls_back_to_field_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[location]\nlatitude = 48.85\nlongitude = 2.35\n")?;

        let config = load_config(&path)?;
        assert_eq!(config.location.latitude, Some(48.85));
        assert!(config.location.enabled);
        assert_eq!(config.theme.running_color, "Green");
        Ok(())
    }

    #[test]
    fn color_names_parse_case_insensitively() {
        assert_eq!(parse_color("green").ok(), Some(StandardColor::Green));
        assert_eq!(parse_color("DARKGREY").ok(), Some(StandardColor::DarkGrey));
        let err = parse_color("turquoise").unwrap_err();
        assert!(err.to_string().contains("Invalid color name"));
    }
}
