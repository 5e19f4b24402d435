//! Profiles Module
//!
//! One profile per user, with experience and education entries and the
//! account deletion route.
//!
//! ```text
//! profiles/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Profile document, requests and their validation
//! ├── db.rs        - SQLite queries
//! └── handlers.rs  - /api/profiles handlers
//! ```

pub mod types;
pub mod db;
pub mod handlers;

pub use types::{Education, Experience, Profile, ProfileOwner, Social};
