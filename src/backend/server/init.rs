/**
 * Server Initialization
 *
 * Opens the database (running migrations), builds the application state and
 * assembles the router. Used by the binary and by the integration tests.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, Config};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be opened or a migration fails. There is
/// no degraded mode without a database.
pub async fn create_app(config: Config) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing social backend");

    let db_pool = load_database(&config).await?;
    let app_state = AppState::new(db_pool, config);

    if app_state.config.token_ttl.is_none() {
        tracing::info!("Tokens are issued without expiry");
    }

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
