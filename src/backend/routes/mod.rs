//! Route Configuration Module
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports
//! ├── router.rs      - Main router, fallback and HTTP layers
//! └── api_routes.rs  - /api/users, /api/posts, /api/profiles
//! ```
//!
//! Protected routes carry the auth middleware as a route layer; the token is
//! read from the `x-auth-token` header.

/// Main router creation
pub mod router;

/// API route tables
pub mod api_routes;

pub use router::create_router;
