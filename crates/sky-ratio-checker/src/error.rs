//! Error types for sky ratio checks.

use sky_ratio_scene::SceneError;
use thiserror::Error;

/// Errors that abort a whole check.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The scene has primitives that were never built.
    #[error("scene has unbuilt primitives; call build() before checking")]
    SceneNotBuilt,

    /// The scene rejected a raycast.
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Errors loading a checker configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid TOML for [`crate::CheckerConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for checker operations.
pub type Result<T> = std::result::Result<T, CheckError>;
