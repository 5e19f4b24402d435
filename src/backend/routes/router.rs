/**
 * Router Configuration
 *
 * Combines the API routes with the welcome page, the 404 and 405 fallbacks
 * and the HTTP layers (request tracing and CORS).
 */

use axum::{response::Html, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

async fn welcome() -> Html<&'static str> {
    Html("<h2>Welcome to React Social Backend App</h2>")
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route Not Found")
}

async fn method_not_allowed() -> BackendError {
    BackendError::method_not_allowed("Method Not Allowed")
}

/// Create the Axum router with all routes configured
///
/// - `GET /` - welcome page
/// - `/api/users`, `/api/posts`, `/api/profiles` - see [`configure_api_routes`]
/// - known path with the wrong method - 405 in the error envelope
/// - anything else - 404 in the error envelope
///
/// CORS is open to every origin.
pub fn create_router(app_state: AppState) -> Router {
    let router = Router::new().route("/", get(welcome));
    let router = configure_api_routes(router, &app_state);

    // Only applies to routes already registered
    router
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
