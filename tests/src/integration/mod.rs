//! # Integration Tests
//!
//! End-to-end behaviour of the badge service over the in-memory identity
//! registry.

pub mod concurrency;
pub mod properties;
