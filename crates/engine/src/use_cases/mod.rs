//! Use cases - orchestration between the domain core and the ports.

pub mod refresh;
pub mod weather;

pub use refresh::RefreshBoard;
pub use weather::{RefreshWeather, SharedWeatherIcons};
