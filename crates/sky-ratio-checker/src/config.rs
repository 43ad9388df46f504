//! Checker configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sampler::{sanitize_resolution, DEFAULT_RESOLUTION_DEG};

/// Parameters of a sky ratio check.
///
/// ```toml
/// ray_resolution = 5.0
/// use_safe_side = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Angular step in degrees, in (0, 180].
    pub ray_resolution: f64,
    /// Shift boundaries one step towards more obstruction.
    pub use_safe_side: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            ray_resolution: DEFAULT_RESOLUTION_DEG,
            use_safe_side: false,
        }
    }
}

impl CheckerConfig {
    /// Configuration as given; see [`sanitized`](Self::sanitized).
    pub fn new(ray_resolution: f64, use_safe_side: bool) -> Self {
        Self {
            ray_resolution,
            use_safe_side,
        }
    }

    /// Resolution actually used for sampling.
    pub fn effective_resolution(&self) -> f64 {
        sanitize_resolution(self.ray_resolution)
    }

    /// Copy with the resolution clamped to its effective value.
    pub fn sanitized(self) -> Self {
        let effective = self.effective_resolution();
        if effective != self.ray_resolution {
            log::warn!(
                "CheckerConfig: ray_resolution {} outside (0, 180], using {}",
                self.ray_resolution,
                effective
            );
        }
        Self {
            ray_resolution: effective,
            ..self
        }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        Ok(config.sanitized())
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.ray_resolution, 1.0);
        assert!(!config.use_safe_side);
    }

    #[test]
    fn test_parse_full() {
        let config = CheckerConfig::from_toml_str("ray_resolution = 5.0\nuse_safe_side = true\n")
            .unwrap();
        assert_eq!(config, CheckerConfig::new(5.0, true));
    }

    #[test]
    fn test_parse_partial_and_empty() {
        let config = CheckerConfig::from_toml_str("use_safe_side = true").unwrap();
        assert_eq!(config.ray_resolution, 1.0);
        assert!(config.use_safe_side);

        assert_eq!(CheckerConfig::from_toml_str("").unwrap(), CheckerConfig::default());
    }

    #[test]
    fn test_out_of_range_resolution_is_reset() {
        let config = CheckerConfig::from_toml_str("ray_resolution = 400.0").unwrap();
        assert_eq!(config.ray_resolution, 1.0);

        let config = CheckerConfig::new(-2.0, false);
        assert_eq!(config.effective_resolution(), 1.0);
        assert_eq!(config.sanitized().ray_resolution, 1.0);
    }

    #[test]
    fn test_parse_error() {
        let err = CheckerConfig::from_toml_str("ray_resolution = \"fine\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CheckerConfig::new(2.5, true);
        let text = config.to_toml_string().unwrap();
        assert_eq!(CheckerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CheckerConfig::load("/nonexistent/sky_ratio.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_file() {
        let path =
            std::env::temp_dir().join(format!("sky_ratio_config_{}.toml", std::process::id()));
        std::fs::write(&path, "ray_resolution = 10.0\n").unwrap();
        let config = CheckerConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, CheckerConfig::new(10.0, false));
    }
}
