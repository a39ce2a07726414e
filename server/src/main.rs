use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use scheduler_server::config::Config;
use scheduler_server::routes::create_routes;
use scheduler_server::state::AppState;
use scheduler_server::store::{connect_pool, run_migrations, PgStore};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let pool = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_pool(&config, database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Successfully connected to database");

            run_migrations(&pool)
                .await
                .expect("Failed to run migrations");
            tracing::info!("Migrations run successfully");

            Some(pool)
        }
        None => None,
    };

    let state = match &pool {
        Some(pool) => AppState::new(Arc::new(PgStore::new(pool.clone()))),
        None => AppState::unconfigured(),
    };

    let app: Router = create_routes(state, &config.cors_allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
