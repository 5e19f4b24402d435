//! Property-based tests

mod tokens_proptest;
