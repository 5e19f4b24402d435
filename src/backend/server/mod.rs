//! Server Module
//!
//! Startup code for the HTTP server.
//!
//! - **`config`** - `Config` from the environment, and the SQLite pool
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - `create_app`, which wires everything into a router
//!
//! # Example
//!
//! ```rust,no_run
//! use social_backend::backend::server::{create_app, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let app = create_app(config).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use config::{Config, ConfigError};
pub use init::create_app;
pub use state::AppState;
