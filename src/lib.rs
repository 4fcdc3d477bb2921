//! lhdice - Log Horizon TRPG dice system
//!
//! Check rolls and the rulebook's random tables, usable as a library, from
//! the command line, or over HTTP.

pub mod api;
pub mod config;
pub mod dice;
pub mod locale;
pub mod system;
pub mod tables;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

pub use config::Config;
pub use dice::DiceSource;
pub use locale::{Locale, LocaleError};
pub use system::{LogHorizon, RollResult};
pub use tables::Catalog;

/// Build the game system from the configured locale
pub fn load_system(config: &Config) -> Result<LogHorizon, LocaleError> {
    let locale = Locale::load(config.locale_path.as_deref())?;
    let catalog = Catalog::from_locale(locale)?;
    Ok(LogHorizon::new(catalog).with_max_dice(config.max_dice))
}

/// The HTTP server instance
pub struct Server {
    config: Config,
    system: Arc<LogHorizon>,
    dice: Arc<DiceSource>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server instance, loading tables up front
    pub fn new(config: Config) -> Result<Self> {
        let system = load_system(&config)?;
        let dice = DiceSource::new(config.seed);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            system: Arc::new(system),
            dice: Arc::new(dice),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Build the router
    pub fn router(&self) -> Router {
        api::router(self.system.clone(), self.dice.clone())
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        info!(seeded = self.dice.is_seeded(), "lhdice listening on {}", local_addr);

        let router = self.router();
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("lhdice shutdown complete");
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
