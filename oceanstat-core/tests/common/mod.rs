//! Common test utilities for engine integration tests
//!
//! This module provides:
//! - Seeded mock sample generators shaped like buoy data
//! - Pre-built scenarios with their expected outcomes

#![allow(dead_code)]

pub mod generators;
pub mod scenarios;

/// Tolerance for floating-point comparisons of derived figures
pub const EPSILON: f64 = 1e-9;

/// Assert two floats agree within [`EPSILON`]
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "{what}: expected {expected}, got {actual}"
    );
}
