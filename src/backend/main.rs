/**
 * Social Backend Server Entry Point
 *
 * Loads `.env`, installs logging, reads the configuration and serves the
 * API until the process is stopped.
 */

use std::net::SocketAddr;

use social_backend::backend::server::{create_app, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let port = config.port;

    let app = create_app(config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is started at port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
