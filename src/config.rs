//! Simulation configuration
//!
//! Everything here parameterizes the simulated platform and companion, not
//! the face logic itself. Missing file or missing fields fall back to
//! defaults; a malformed file is reported and ignored.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::resources::ScreenShape;

pub const CONFIG_FILE: &str = "sundial.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Panel shape reported through the window insets.
    #[serde(default = "default_shape")]
    pub screen_shape: ScreenShape,
    /// Report a low-bit ambient panel.
    #[serde(default)]
    pub low_bit_ambient: bool,
    /// Seconds between weather pushes from the simulated phone.
    #[serde(default = "default_sync_period")]
    pub sync_period_secs: u64,
    /// Seconds between ambient mode toggles; 0 stays interactive.
    #[serde(default = "default_ambient_toggle")]
    pub ambient_toggle_secs: u64,
    /// UTC offset broadcast mid-run as a timezone change.
    #[serde(default)]
    pub timezone_shift_secs: Option<i32>,
    /// Stop the simulation after this many seconds; unset runs forever.
    #[serde(default)]
    pub run_secs: Option<u64>,
}

fn default_shape() -> ScreenShape {
    ScreenShape::Round
}

fn default_sync_period() -> u64 {
    25
}

fn default_ambient_toggle() -> u64 {
    45
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_shape: default_shape(),
            low_bit_ambient: false,
            sync_period_secs: default_sync_period(),
            ambient_toggle_secs: default_ambient_toggle(),
            timezone_shift_secs: None,
            run_secs: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

/// Load the config file; an absent file is simply the defaults.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

pub fn load_or_default() -> Config {
    match load(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{CONFIG_FILE}: {e}; using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_parses() {
        let config: Config = toml::from_str(
            r#"
            screen_shape = "square"
            low_bit_ambient = true
            sync_period_secs = 10
            ambient_toggle_secs = 0
            timezone_shift_secs = 7200
            run_secs = 120
            "#,
        )
        .unwrap();

        assert_eq!(config.screen_shape, ScreenShape::Square);
        assert!(config.low_bit_ambient);
        assert_eq!(config.sync_period_secs, 10);
        assert_eq!(config.ambient_toggle_secs, 0);
        assert_eq!(config.timezone_shift_secs, Some(7_200));
        assert_eq!(config.run_secs, Some(120));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = toml::from_str("screen_shape = \"round\"").unwrap();
        assert_eq!(config.sync_period_secs, default_sync_period());
        assert_eq!(config.run_secs, None);
        assert!(!config.low_bit_ambient);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("brightness = 3").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let config = load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.sync_period_secs, Config::default().sync_period_secs);
    }
}
