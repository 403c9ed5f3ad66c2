//! Main application structure and lifecycle management

use crate::{
    api::ApiServer,
    database::Database,
    storage::{EventStore, SqliteEventStore},
};
use anyhow::{Context, Result};
use config::Config;
use std::sync::Arc;
use tracing::info;

/// Shared application state handed to every request handler
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn EventStore>,
}

/// Main application that coordinates all components
pub struct Application {
    database: Database,
    api_server: ApiServer,
}

impl Application {
    /// Create a new application instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing application components...");

        let database = Database::new(&config.database)
            .await
            .context("Failed to initialize database")?;

        database
            .migrate()
            .await
            .context("Failed to run database migrations")?;

        if config.database.migrating {
            info!("Process running in migration mode");
        }
        if config.database.seeding {
            info!("Process running in seed mode");
        }

        let store = Arc::new(SqliteEventStore::new(database.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            store,
        });

        let api_server = ApiServer::new(state).context("Failed to create API server")?;

        info!("Application components initialized successfully");

        Ok(Self {
            database,
            api_server,
        })
    }

    /// Run the application until the server exits
    pub async fn run(&mut self) -> Result<()> {
        self.api_server.run().await.context("API server error")
    }

    /// Shutdown the application gracefully
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down application...");

        self.api_server
            .shutdown()
            .await
            .context("Failed to shutdown API server")?;

        self.database
            .close()
            .await
            .context("Failed to close database")?;
        info!("Database connections closed");

        info!("Application shutdown complete");
        Ok(())
    }
}
