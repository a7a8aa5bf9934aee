//! Calculational tolerances threaded read-only through a traversal.
//!
//! The walker copies a [`Tolerance`] into every traversal state; nothing in
//! the conversion core mutates it.

use std::fmt;

use crate::constants::{DEFAULT_DIST_TOLERANCE, DEFAULT_PERP_TOLERANCE};

/// Distance and angular tolerances for one conversion run.
///
/// # Examples
/// ```
/// use config::tolerance::Tolerance;
/// let tol = Tolerance::new(0.01, 1e-6).expect("valid tolerance");
/// assert_eq!(tol.dist_sq, 0.01 * 0.01);
/// assert_eq!(tol.para, 1.0 - 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub dist: f64,
    /// Square of `dist`.
    pub dist_sq: f64,
    /// Perpendicularity threshold (cosine).
    pub perp: f64,
    /// Parallelism threshold, `1 - perp`.
    pub para: f64,
}

impl Tolerance {
    /// Builds a tolerance record, deriving `dist_sq` and `para`.
    pub fn new(dist: f64, perp: f64) -> Result<Self, ConfigError> {
        if !dist.is_finite() || dist <= 0.0 {
            return Err(ConfigError::InvalidDistance(dist));
        }
        if !(perp > 0.0 && perp < 1.0) {
            return Err(ConfigError::InvalidPerpendicularity(perp));
        }
        Ok(Self {
            dist,
            dist_sq: dist * dist,
            perp,
            para: 1.0 - perp,
        })
    }

    /// Returns a copy with a different distance tolerance, keeping the
    /// angular thresholds.
    ///
    /// # Examples
    /// ```
    /// use config::tolerance::Tolerance;
    /// let tol = Tolerance::default().with_dist(0.1).unwrap();
    /// assert_eq!(tol.dist, 0.1);
    /// assert_eq!(tol.perp, Tolerance::default().perp);
    /// ```
    pub fn with_dist(self, dist: f64) -> Result<Self, ConfigError> {
        Self::new(dist, self.perp)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            dist: DEFAULT_DIST_TOLERANCE,
            dist_sq: DEFAULT_DIST_TOLERANCE * DEFAULT_DIST_TOLERANCE,
            perp: DEFAULT_PERP_TOLERANCE,
            para: 1.0 - DEFAULT_PERP_TOLERANCE,
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dist={} dist_sq={} perp={} para={}",
            self.dist, self.dist_sq, self.perp, self.para
        )
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the distance tolerance is zero, negative or not finite.
    InvalidDistance(f64),
    /// Raised when the perpendicularity threshold is outside (0, 1).
    InvalidPerpendicularity(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDistance(value) => {
                write!(f, "distance tolerance must be positive: {value}")
            }
            ConfigError::InvalidPerpendicularity(value) => {
                write!(f, "perpendicularity tolerance must be in (0, 1): {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
