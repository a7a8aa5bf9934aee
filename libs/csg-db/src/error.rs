//! # Walk Errors
//!
//! Error types for database traversal.

use thiserror::Error;

/// Errors that abort a walk.
///
/// Per-object problems (a member name with no directory entry, a primitive
/// the converter cannot express) are not errors; they are logged and the
/// walk moves on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WalkError {
    /// A top-level object named by the caller is not in the database.
    #[error("Object not found in database: {name}")]
    ObjectNotFound {
        /// The missing name.
        name: String,
    },

    /// A combination tree carries an operator code with no meaning.
    #[error("Unrecognized boolean operator ({op}) at {path}")]
    UnrecognizedOp {
        /// The stored operator code.
        op: u16,
        /// Path of the combination holding it.
        path: String,
    },

    /// Combination nesting exceeded the configured limit.
    #[error("Combination nesting exceeds {max} levels at {path}")]
    DepthExceeded {
        /// Path where the limit was hit.
        path: String,
        /// The nesting limit.
        max: usize,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalkError::UnrecognizedOp {
            op: 13,
            path: "/top/wheel.c".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("(13)"));
        assert!(message.contains("/top/wheel.c"));
    }
}
