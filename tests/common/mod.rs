//! Common test utilities and helpers
//!
//! Shared fixtures and an in-memory git double used across the integration tests.

#![allow(dead_code)]

pub mod fake_git;
pub mod test_fixtures;
