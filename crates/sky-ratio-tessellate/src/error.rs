//! Error types for tessellation.

use thiserror::Error;

/// Errors that can occur while declaring or tessellating primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TessellateError {
    /// A raw mesh must consist of whole triangles.
    #[error("raw mesh vertex count {0} is not a multiple of 3")]
    InvalidMeshVertexCount(usize),
}

/// Result type for tessellation operations.
pub type Result<T> = std::result::Result<T, TessellateError>;
