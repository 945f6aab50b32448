use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::cli::commands::initdb::apply_migrations;
use crate::config::{initialize_app_state, Settings};
use crate::router::create_router;

/// Command line overrides for `serve`
#[derive(Debug, Default)]
pub struct ServeOptions {
    pub config: Option<String>,
    pub database_url: Option<String>,
    pub bind_address: Option<String>,
}

pub async fn serve(options: ServeOptions) -> Result<()> {
    trace!("Entering serve function");
    info!("Notekeeper starting up");

    let mut settings = Settings::load(options.config.as_deref())?;
    if let Some(database_url) = options.database_url {
        settings.database.url = database_url;
    }
    if let Some(bind_address) = options.bind_address {
        settings.server.bind_address = bind_address;
    }
    debug!("Database URL: {}", settings.database.url);
    debug!("Bind address: {}", settings.server.bind_address);

    let state = match initialize_app_state(&settings).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Tables are created on every start if absent
    apply_migrations(&state.db).await?;

    trace!("Creating application router");
    let app = create_router(state);

    let bind_address = &settings.server.bind_address;
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Notekeeper running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
