mod app;
mod config;
mod error;
mod logging;
mod ui;

use client::{FileStorage, HttpBackend, SessionStore};

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;

    let backend = HttpBackend::new(&config.base_url)?;
    let session = SessionStore::restore(FileStorage::new(config.state_dir.clone()));
    tracing::info!(base_url = %backend.base_url(), "starting");

    let mut app = app::App::new(&config, backend, session);
    app.run().await
}
