//! Engine settings read from the environment.
//!
//! | Variable                      | Default                          |
//! |-------------------------------|----------------------------------|
//! | `TZGRID_MODE`                 | `live` (or `development`)        |
//! | `TZGRID_REFRESH_SECS`         | 5 (1 in development mode)        |
//! | `TZGRID_LAYOUT`               | built-in layout                  |
//! | `TZGRID_WEATHER_BASE_URL`     | `https://api.openweathermap.org` |
//! | `TZGRID_WEATHER_REFRESH_SECS` | 600                              |
//! | `TZGRID_STORAGE_PATH`         | platform config dir              |
//! | `OPENWEATHER_API_KEY`         | unset                            |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::openweather::DEFAULT_OPENWEATHER_BASE_URL;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Where the board's "now" comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshMode {
    /// Real wall-clock time.
    #[default]
    Live,
    /// Simulated time advancing one hour per tick.
    Development,
}

impl FromStr for RefreshMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub mode: RefreshMode,
    pub refresh_interval: Duration,
    pub layout_path: Option<PathBuf>,
    pub weather_base_url: String,
    pub weather_refresh_interval: Duration,
    pub storage_path: Option<PathBuf>,
    /// Key supplied through the environment, saved to the credential store on startup.
    pub weather_api_key: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mode: RefreshMode::Live,
            refresh_interval: Duration::from_secs(5),
            layout_path: None,
            weather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            weather_refresh_interval: Duration::from_secs(600),
            storage_path: None,
            weather_api_key: None,
        }
    }
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let mode = match get("TZGRID_MODE") {
            Some(value) => value.parse::<RefreshMode>().map_err(|_| SettingsError::Invalid {
                key: "TZGRID_MODE",
                value,
            })?,
            None => RefreshMode::Live,
        };

        let refresh_interval = match get("TZGRID_REFRESH_SECS") {
            Some(value) => parse_secs("TZGRID_REFRESH_SECS", value)?,
            None if mode == RefreshMode::Development => Duration::from_secs(1),
            None => defaults.refresh_interval,
        };

        let weather_refresh_interval = match get("TZGRID_WEATHER_REFRESH_SECS") {
            Some(value) => parse_secs("TZGRID_WEATHER_REFRESH_SECS", value)?,
            None => defaults.weather_refresh_interval,
        };

        Ok(Self {
            mode,
            refresh_interval,
            layout_path: get("TZGRID_LAYOUT").map(PathBuf::from),
            weather_base_url: get("TZGRID_WEATHER_BASE_URL").unwrap_or(defaults.weather_base_url),
            weather_refresh_interval,
            storage_path: get("TZGRID_STORAGE_PATH").map(PathBuf::from),
            weather_api_key: get("OPENWEATHER_API_KEY"),
        })
    }
}

fn parse_secs(key: &'static str, value: String) -> Result<Duration, SettingsError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(SettingsError::Invalid { key, value }),
    }
}
