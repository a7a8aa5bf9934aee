//! # Conversion Errors
//!
//! Error types for scene conversion.

use csg_db::WalkError;
use thiserror::Error;

/// Errors that terminate a conversion run.
///
/// Primitives with no scene equivalent are not errors; they come back as
/// [`crate::scene::Conversion::Unsupported`] and the walk continues.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A combination tree holds an operator code the describer cannot render.
    #[error("Unrecognized boolean tree operator ({op})")]
    UnrecognizedOp {
        /// The stored operator code.
        op: u16,
    },

    /// The walker failed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// Writing the scene failed.
    #[error("Failed to write scene: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::UnrecognizedOp { op: 42 };
        assert!(err.to_string().contains("(42)"));
    }

    #[test]
    fn test_walk_error_is_transparent() {
        let err: ConvertError = WalkError::ObjectNotFound {
            name: "all.g".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Object not found in database: all.g");
    }
}
