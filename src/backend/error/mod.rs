//! Backend Error Module
//!
//! This module defines the error type shared by every handler and the
//! conversion of that error into the JSON error envelope.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and ErrorDetail
//! └── conversion.rs - IntoResponse and JSON rejection mapping
//! ```
//!
//! Handlers return `Result<_, BackendError>` and use `?` on database,
//! hashing and token calls; the status code and body follow from the variant.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::ErrorEnvelope;
pub use types::{is_foreign_key_violation, is_unique_violation, BackendError, ErrorDetail};
