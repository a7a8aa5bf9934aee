//! # Configuration Constants
//!
//! Centralized constants for the conversion pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tolerances**: Default calculational tolerances for a traversal
//! - **Limits**: Recursion bounds for tree walking
//! - **Output**: Number formatting and default scene textures

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Fixed epsilon used when comparing vector magnitudes.
///
/// Independent of the traversal distance tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn same_radius(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(same_radius(2.0, 2.0 + 1e-12));
/// assert!(!same_radius(2.0, 2.0001));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// TOLERANCE CONSTANTS
// =============================================================================

/// Default linear distance tolerance, in model units.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_DIST_TOLERANCE;
///
/// let dist_sq = DEFAULT_DIST_TOLERANCE * DEFAULT_DIST_TOLERANCE;
/// assert!(dist_sq < DEFAULT_DIST_TOLERANCE);
/// ```
pub const DEFAULT_DIST_TOLERANCE: f64 = 0.0005;

/// Default perpendicularity tolerance (cosine of the angle from 90 degrees).
///
/// The parallelism tolerance is derived as `1 - perp`.
pub const DEFAULT_PERP_TOLERANCE: f64 = 1e-6;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate.
///
/// # Example
///
/// ```rust
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which `stacker` allocates a fresh segment.
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Maximum nesting depth of combinations during a walk.
///
/// Databases are expected to be acyclic; a self-referencing combination
/// would otherwise recurse forever.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_WALK_DEPTH;
///
/// let depth = 12;
/// assert!(depth < MAX_WALK_DEPTH);
/// ```
pub const MAX_WALK_DEPTH: usize = 1000;

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Significant digits used by `%g` style number formatting.
pub const G_FORMAT_PRECISION: usize = 6;

/// Pigment applied to tori, cylinders, cones, spheres and ellipsoids.
pub const DEFAULT_PIGMENT: &str = "LightBlue";

/// Pigment applied to general elliptical frustums.
pub const SUPERCONE_PIGMENT: &str = "color rgb<0.65,1,0>";

/// Pigment applied to triangle meshes built from 8-point solids.
pub const MESH_PIGMENT: &str = "rgb 0.8";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
