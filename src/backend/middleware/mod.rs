//! Middleware Module
//!
//! HTTP middleware that runs before handlers.
//!
//! - **`auth`** - token check for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use social_backend::backend::auth::TokenService;
//! use social_backend::backend::middleware::auth_middleware;
//!
//! let tokens = TokenService::from_secret(b"secret", None);
//! let protected: Router = Router::new()
//!     .route("/api/users/me", get(|| async { "ok" }))
//!     .route_layer(middleware::from_fn_with_state(tokens, auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser, AUTH_HEADER};
