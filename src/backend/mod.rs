//! Backend Module
//!
//! The HTTP server for the social backend: users, posts and profiles over a
//! JSON REST API, stored in SQLite.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route tables and router assembly
//! ├── auth/           - Users, session tokens, /api/users handlers
//! ├── middleware/     - Token check for protected routes
//! ├── posts/          - Posts, likes and comments
//! ├── profiles/       - Profiles, experience, education, account deletion
//! ├── validation.rs   - Required-field checks and the JSON body extractor
//! └── error/          - BackendError and the error envelope
//! ```
//!
//! # Request Flow
//!
//! request → auth middleware (protected routes) → JSON body extraction →
//! field validation → database work → JSON envelope
//!
//! Every failure along the way is a `BackendError`, rendered as
//! `{ "errors": [{ "msg": ... }] }` with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Users and session tokens
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Posts, likes and comments
pub mod posts;

/// Profiles
pub mod profiles;

/// Request validation
pub mod validation;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::create_app;
