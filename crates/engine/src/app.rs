//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tzgrid_domain::{GridBuilder, Location, TimeLocalizer};

use crate::infrastructure::{
    clock::{SimulatedClock, SystemClock},
    credential_store::{FileCredentialStore, WEATHER_API_KEY},
    layout::Layout,
    openweather::OpenWeatherClient,
    ports::{ClockPort, CredentialStore, PresenterPort, WeatherPort},
    settings::{EngineSettings, RefreshMode},
};
use crate::use_cases::{RefreshBoard, RefreshWeather, SharedWeatherIcons};

/// Main application state.
///
/// Holds both use cases and the intervals they run on.
pub struct App {
    refresh: Arc<RefreshBoard>,
    weather: Arc<RefreshWeather>,
    locations: Vec<Location>,
    refresh_interval: Duration,
    weather_interval: Duration,
}

impl App {
    pub fn new(
        settings: &EngineSettings,
        layout: Layout,
        clock: Arc<dyn ClockPort>,
        presenter: Arc<dyn PresenterPort>,
        weather: Arc<dyn WeatherPort>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let icons = SharedWeatherIcons::default();
        let locations: Vec<Location> = layout.locations().cloned().collect();
        let builder = GridBuilder::new(TimeLocalizer::new(layout.localizer));

        Self {
            refresh: Arc::new(RefreshBoard::new(
                clock,
                presenter,
                builder,
                layout.sections,
                icons.clone(),
            )),
            weather: Arc::new(RefreshWeather::new(weather, credentials, icons)),
            locations,
            refresh_interval: settings.refresh_interval,
            weather_interval: settings.weather_refresh_interval,
        }
    }

    /// Wire real adapters from settings.
    pub fn from_settings(
        settings: &EngineSettings,
        layout: Layout,
        presenter: Arc<dyn PresenterPort>,
    ) -> Self {
        let clock: Arc<dyn ClockPort> = match settings.mode {
            RefreshMode::Live => Arc::new(SystemClock::new()),
            RefreshMode::Development => Arc::new(SimulatedClock::hourly(Utc::now())),
        };

        let credentials = match &settings.storage_path {
            Some(path) => FileCredentialStore::open(path),
            None => FileCredentialStore::open_default(),
        };
        if let Some(api_key) = &settings.weather_api_key {
            match credentials.save(WEATHER_API_KEY, api_key) {
                Ok(()) => {
                    tracing::info!(path = ?credentials.path(), "Stored weather API key from environment")
                }
                Err(e) => tracing::warn!(error = %e, "Failed to store weather API key"),
            }
        }

        let weather = Arc::new(OpenWeatherClient::new(&settings.weather_base_url));

        Self::new(
            settings,
            layout,
            clock,
            presenter,
            weather,
            Arc::new(credentials),
        )
    }

    /// Run until Ctrl-C.
    ///
    /// The board is redrawn on every refresh tick from the clock alone. Weather
    /// runs on its own task, so a slow provider never delays a redraw; icons
    /// show up on the first tick after they arrive.
    pub async fn run(self) -> anyhow::Result<()> {
        let weather = self.weather.clone();
        let locations = self.locations.clone();
        let weather_interval = self.weather_interval;
        let weather_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(weather_interval);
            loop {
                ticker.tick().await;
                weather.execute(&locations).await;
            }
        });

        let mut ticker = tokio::time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::info!(
            interval_ms = self.refresh_interval.as_millis() as u64,
            locations = self.locations.len(),
            "Starting board refresh"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh.execute().await;
                }
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Failed to listen for shutdown signal");
                    }
                    break;
                }
            }
        }

        weather_task.abort();
        tracing::info!("Board refresh stopped");
        Ok(())
    }
}
