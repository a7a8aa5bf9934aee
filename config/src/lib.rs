//! # Config Crate
//!
//! Centralized configuration for the CSG scene conversion pipeline.
//! All magic numbers and tunable parameters are defined here so the
//! database walker and the scene converter agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_equal, EPSILON};
//! use config::tolerance::Tolerance;
//!
//! // Use EPSILON for magnitude comparisons
//! assert!(approx_equal(2.0, 2.0 + EPSILON / 10.0));
//!
//! // Tolerances threaded read-only through a traversal
//! let tol = Tolerance::default();
//! assert_eq!(tol.dist_sq, tol.dist * tol.dist);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure values and validation only
//! - **Converter Compatible**: Defaults match the `g-*` family of database converters

pub mod constants;
pub mod tolerance;

#[cfg(test)]
mod tests;
