//! Social Backend
//!
//! REST backend for a small social network: registration and login with
//! signed session tokens, developer profiles, and posts with likes and
//! comments.
//!
//! # Usage
//!
//! ```rust,no_run
//! use social_backend::backend::server::{create_app, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder()
//!     .jwt_secret("change-me")
//!     .database_url("sqlite::memory:")
//!     .build()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Variable         | Purpose                                  |
//! |------------------|------------------------------------------|
//! | `PORT`           | listen port (default 5000)               |
//! | `DATABASE_URL`   | SQLite URL (default `sqlite://social.db`)|
//! | `JWT_SECRET_KEY` | token signing secret (required)          |
//! | `TOKEN_TTL_SECS` | token lifetime; unset means no expiry    |
//! | `BCRYPT_COST`    | password hashing cost (default 10)       |

/// Backend server-side code
pub mod backend;
