// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::string_slice
)]

//! Functional tests for the admission validation policies.
//!
//! These tests drive the full policy chain through the same entry point the
//! webhook uses, WITHOUT requiring a live Kubernetes cluster.
//!
//! ```bash
//! # Run all functional tests
//! cargo test --test functional
//!
//! # Run specific test
//! cargo test --test functional test_programmed_reference_is_frozen
//!
//! # Run with verbose output
//! cargo test --test functional -- --nocapture
//! ```
//!
//! ## Test Categories
//!
//! - **Scenario tests**: End-to-end validation walks (shape, immutability,
//!   tags, targets, cross-namespace grants)
//! - **Kind tests**: Per-kind rule coverage (required vs optional reference,
//!   KIC support, cluster scope)
//! - **Grant tests**: Grant matrix behavior against the snapshot index
//!
//! ## Design Principles
//!
//! - **No K8s Required**: Tests run without any cluster infrastructure
//! - **Fast Execution**: All tests complete in milliseconds
//! - **Executable Documentation**: Tests serve as documentation of expected behavior

#[path = "../common/mod.rs"]
mod common;

mod grant_tests;
mod kind_tests;
mod scenario_tests;

// Re-export for use in tests
pub use common::*;
