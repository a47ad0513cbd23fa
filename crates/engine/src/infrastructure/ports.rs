//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Time (real clock, simulated clock for development, fixed clock for tests)
//! - Weather lookups (could swap OpenWeather -> other provider)
//! - Credential storage (could swap JSON file -> OS keychain)
//! - Presentation (could swap terminal -> anything that can draw a board)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tzgrid_domain::BoardView;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Failed to write credentials to {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode credentials: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// Infrastructure Types
// =============================================================================

/// Current conditions for one location, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub icon_url: String,
    /// "Reading: light rain, feels like 12.5℃."
    pub tooltip: String,
}

/// Weather reports keyed by location display name.
pub type WeatherIcons = HashMap<String, WeatherReport>;

// =============================================================================
// Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    async fn current(&self, city: &str, api_key: &str) -> Result<WeatherReport, WeatherError>;
}

/// Persistent string key-value storage for user-supplied credentials.
///
/// A missing key is the normal "not configured" state, so `load` has no error.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Save a string value with the given key, durably.
    fn save(&self, key: &str, value: &str) -> Result<(), CredentialError>;

    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), CredentialError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PresenterPort: Send + Sync {
    fn present(&self, board: &BoardView, weather: &WeatherIcons);
}
