/**
 * Application State
 *
 * `AppState` is the single state value behind the router. Handlers extract
 * only the part they need (`State<SqlitePool>`, `State<TokenService>`,
 * `State<Arc<Config>>`) through the `FromRef` implementations below.
 *
 * Everything in here is immutable after startup and cheap to clone.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenService;
use crate::backend::server::config::Config;

#[derive(Clone, Debug)]
pub struct AppState {
    /// SQLite connection pool
    pub db_pool: SqlitePool,
    /// Mints and verifies session tokens
    pub tokens: TokenService,
    /// Settings the process started with
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        Self {
            db_pool,
            tokens: TokenService::new(&config),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
