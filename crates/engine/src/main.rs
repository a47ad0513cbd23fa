//! tzgrid - Main entry point.

use std::io::IsTerminal;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tzgrid_engine::infrastructure::{
    layout::Layout, settings::EngineSettings, terminal::TerminalPresenter,
};
use tzgrid_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(filename);
    }

    // Logs go to stderr; stdout belongs to the board
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tzgrid_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting tzgrid");

    let settings = EngineSettings::from_env()?;
    let layout = match &settings.layout_path {
        Some(path) => {
            tracing::info!(path = ?path, "Loading layout");
            Layout::load(path)?
        }
        None => Layout::builtin()?,
    };
    tracing::info!(
        mode = ?settings.mode,
        sections = layout.sections.len(),
        anchor = %layout.localizer.anchor_zone,
        day_reference = %layout.localizer.day_reference_zone,
        "Configuration loaded"
    );

    let presenter = Arc::new(TerminalPresenter::new(std::io::stdout().is_terminal()));
    let app = App::from_settings(&settings, layout, presenter);

    app.run().await
}
