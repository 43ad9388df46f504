//! Error types for scene operations.

use sky_ratio_tessellate::TessellateError;
use thiserror::Error;

/// Errors that can occur while mutating, querying or exporting a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Origins and directions must pair up one to one.
    #[error("ray count mismatch: {origins} origins, {directions} directions")]
    RayCountMismatch {
        /// Number of origins supplied.
        origins: usize,
        /// Number of directions supplied.
        directions: usize,
    },

    /// A submitted primitive was rejected.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] TessellateError),

    /// An I/O error occurred during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
