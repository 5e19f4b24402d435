//! Posts Module
//!
//! Posts with likes and comments.
//!
//! ```text
//! posts/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Post document and request/response bodies
//! ├── db.rs        - SQLite queries
//! └── handlers.rs  - /api/posts handlers
//! ```

pub mod types;
pub mod db;
pub mod handlers;

pub use types::{Comment, Like, Post};
