//! Refresh weather use case - best-effort icons for every location.

use futures_util::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tzgrid_domain::Location;

use crate::infrastructure::credential_store::WEATHER_API_KEY;
use crate::infrastructure::ports::{CredentialStore, WeatherIcons, WeatherPort};

/// Weather icons shared between the weather task and the board refresh.
pub type SharedWeatherIcons = Arc<RwLock<WeatherIcons>>;

/// Fetches current conditions for each location and stores them for the board.
///
/// Without a stored API key nothing is fetched and the icon cache is cleared.
/// A failed lookup only drops that location's icon.
pub struct RefreshWeather {
    weather: Arc<dyn WeatherPort>,
    credentials: Arc<dyn CredentialStore>,
    icons: SharedWeatherIcons,
}

impl RefreshWeather {
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        credentials: Arc<dyn CredentialStore>,
        icons: SharedWeatherIcons,
    ) -> Self {
        Self {
            weather,
            credentials,
            icons,
        }
    }

    /// Refresh icons for `locations`. Returns how many icons are now available.
    pub async fn execute(&self, locations: &[Location]) -> usize {
        let api_key = self
            .credentials
            .load(WEATHER_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let Some(api_key) = api_key else {
            tracing::debug!("No weather API key stored, skipping weather refresh");
            self.icons.write().await.clear();
            return 0;
        };

        // Locations repeated across sections are fetched once
        let mut seen = HashSet::new();
        let unique: Vec<&Location> = locations
            .iter()
            .filter(|l| seen.insert(l.display_name()))
            .collect();

        let fetches = unique.into_iter().map(|location| {
            let api_key = api_key.as_str();
            async move {
                let result = self.weather.current(location.weather_city(), api_key).await;
                (location, result)
            }
        });
        let results = join_all(fetches).await;

        let mut icons = self.icons.write().await;
        for (location, result) in results {
            match result {
                Ok(report) => {
                    icons.insert(location.display_name().to_string(), report);
                }
                Err(e) => {
                    tracing::warn!(
                        location = %location.display_name(),
                        city = %location.weather_city(),
                        error = %e,
                        "Weather lookup failed"
                    );
                    icons.remove(location.display_name());
                }
            }
        }

        tracing::debug!(count = icons.len(), "Weather icons refreshed");
        icons.len()
    }
}
