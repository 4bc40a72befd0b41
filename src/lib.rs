pub mod ambient;
pub mod app;
mod config;
pub mod error;
pub mod logging;
pub mod marker;
pub mod menu;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;

pub use config::{load_app_config, AppConfig};
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary and other embedders.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting modeswitch");

    let app = app::App::new();
    app.start()?;

    tracing::info!("shutdown complete");
    Ok(())
}
