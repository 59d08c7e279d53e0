//! Integration test suite for depstamp
//!
//! End-to-end tests that run the compiled binary against temporary projects,
//! with a scripted package manager standing in for yarn/npm.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: argument handling, help and error reporting
//! - **generate**: the generate-version-file pipeline

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod generate;
