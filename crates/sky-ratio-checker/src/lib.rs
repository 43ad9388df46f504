#![warn(missing_docs)]

//! Sky ratio checks.
//!
//! From each checkpoint, rays are cast over a hemisphere grid of elevation
//! `[20°, 89°]` and full azimuth. Per azimuth column the highest hit marks
//! the occlusion boundary, and the visible share of the orthographically
//! projected sky disk is integrated from those boundaries.
//!
//! ```
//! use sky_ratio_checker::{CheckerConfig, SkyRatioChecker};
//! use sky_ratio_math::{Point3, Vec3};
//! use sky_ratio_scene::Scene;
//!
//! let mut scene = Scene::new();
//! scene.add_box(Point3::new(0.0, 0.0, 5.0), Vec3::new(100.0, 100.0, 2.0), Vec3::zeros());
//!
//! let checker = SkyRatioChecker::with_checkpoints(
//!     vec![Point3::new(0.0, 0.0, 1.5)],
//!     CheckerConfig::new(5.0, false),
//! );
//! let ratios = checker.build_and_check(&mut scene).unwrap();
//! assert!(ratios[0] < 0.5);
//! ```

mod checker;
mod config;
mod error;
pub mod integrate;
pub mod sampler;

pub use checker::{check, SkyRatioChecker};
pub use config::CheckerConfig;
pub use error::{CheckError, ConfigError, Result};
pub use integrate::{sky_ratio, RESULT_SENTINEL};
pub use sampler::{generate_rays, RayGrid};
