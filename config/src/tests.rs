//! # Tests for Config
//!
//! Unit tests verifying configuration constants and the tolerance record.

use crate::constants::*;
use crate::tolerance::{ConfigError, Tolerance};

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_below_distance_tolerance() {
    assert!(
        EPSILON < DEFAULT_DIST_TOLERANCE,
        "magnitude comparisons must be stricter than the walk tolerance"
    );
}

// =============================================================================
// TOLERANCE TESTS
// =============================================================================

#[test]
fn test_default_tolerance_matches_converter_defaults() {
    let tol = Tolerance::default();
    assert_eq!(tol.dist, 0.0005);
    assert_eq!(tol.dist_sq, 0.0005 * 0.0005);
    assert_eq!(tol.perp, 1e-6);
    assert_eq!(tol.para, 1.0 - 1e-6);
}

#[test]
fn test_new_derives_square_and_parallel() {
    let tol = Tolerance::new(0.25, 0.001).unwrap();
    assert_eq!(tol.dist_sq, 0.0625);
    assert_eq!(tol.para, 0.999);
}

#[test]
fn test_new_rejects_bad_distance() {
    assert_eq!(
        Tolerance::new(0.0, 1e-6).unwrap_err(),
        ConfigError::InvalidDistance(0.0)
    );
    assert_eq!(
        Tolerance::new(-1.0, 1e-6).unwrap_err(),
        ConfigError::InvalidDistance(-1.0)
    );
    assert!(Tolerance::new(f64::NAN, 1e-6).is_err());
    assert!(Tolerance::new(f64::INFINITY, 1e-6).is_err());
}

#[test]
fn test_new_rejects_bad_perpendicularity() {
    assert_eq!(
        Tolerance::new(0.1, 1.0).unwrap_err(),
        ConfigError::InvalidPerpendicularity(1.0)
    );
    assert!(Tolerance::new(0.1, 0.0).is_err());
}

#[test]
fn test_with_dist_keeps_angles() {
    let tol = Tolerance::new(0.1, 0.01).unwrap().with_dist(0.2).unwrap();
    assert_eq!(tol.dist, 0.2);
    assert_eq!(tol.perp, 0.01);
}

#[test]
fn test_error_display() {
    let err = ConfigError::InvalidDistance(-2.0);
    assert!(err.to_string().contains("distance tolerance"));
}
