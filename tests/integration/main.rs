//! Integration tests
//!
//! Each test drives the full router against its own in-memory database.

#[path = "../common/mod.rs"]
mod common;
