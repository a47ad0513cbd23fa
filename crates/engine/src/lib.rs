//! tzgrid Engine library.
//!
//! Runs the world-clock board: reads the clock, asks the domain core for a
//! fresh board every tick and hands it to a presenter.
//!
//! ## Structure
//!
//! - `use_cases/` - Board refresh and weather refresh
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition and the refresh loops

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
