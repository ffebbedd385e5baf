use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chirpy::{
    AppState,
    config::Settings,
    repositories::PgRepository,
    routes::create_router,
};
use common::database::{health_check, init_pool, run_migrations};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=info,tower_http=info".into()),
        )
        .init();

    info!("Starting Chirpy service");

    let settings = Settings::from_env()?;

    // Initialize database connection pool
    let pool = init_pool(&settings.database).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let state = AppState::new(
        Arc::new(PgRepository::new(pool)),
        &settings.api.jwt_secret,
        settings.api.platform.clone(),
        &settings.api.polka_key,
    );

    let app = create_router(state, &settings.api.fileserver_root);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.api.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Serving files from {} on port {}",
        settings.api.fileserver_root.display(),
        settings.api.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Chirpy service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = terminate => info!("Received SIGTERM, shutting down..."),
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("Received Ctrl+C, shutting down...");
    }
}
