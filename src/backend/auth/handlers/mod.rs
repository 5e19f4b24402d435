//! User Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Request and response types
//! ├── register.rs  - POST /api/users/register
//! ├── login.rs     - POST /api/users/login
//! └── me.rs        - GET /api/users/me
//! ```

/// Request and response types
pub mod types;

pub mod register;
pub mod login;
pub mod me;

pub use types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserEnvelope, UserResponse};

pub use register::register;
pub use login::login;
pub use me::get_me;
