//! Authentication Module
//!
//! User registration, login and session tokens.
//!
//! - **`users`** - credential store (user rows, account deletion)
//! - **`sessions`** - token minting and verification
//! - **`handlers`** - HTTP handlers for `/api/users`
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user stored, no token issued
//! 2. **Login**: email and password verified → signed token returned
//! 3. **Me**: token in `x-auth-token` → user record returned
//!
//! Passwords are stored as bcrypt hashes. Unknown emails and wrong passwords
//! get the same 401 response.

/// User data model and database operations
pub mod users;

/// Token generation and validation
pub mod sessions;

/// HTTP handlers for the user endpoints
pub mod handlers;

pub use handlers::{get_me, login, register};
pub use sessions::{Claim, ClaimUser, TokenError, TokenService};
