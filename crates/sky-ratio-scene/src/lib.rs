#![warn(missing_docs)]

//! Obstruction scene for sky ratio checks.
//!
//! A [`Scene`] owns the declared primitives, the triangle soup derived from
//! them, and the spatial index built over that soup. Mutations mark the
//! scene dirty; [`Scene::build`] re-tessellates and re-indexes everything.
//!
//! # Example
//!
//! ```
//! use sky_ratio_math::{Point3, Vec3};
//! use sky_ratio_scene::Scene;
//!
//! let mut scene = Scene::new();
//! scene.add_box(Point3::new(0.0, 0.0, 5.0), Vec3::new(10.0, 10.0, 1.0), Vec3::zeros());
//! scene.build();
//!
//! let hits = scene.raycast(&[Point3::origin()], &[Vec3::z()]).unwrap();
//! assert!(hits[0].hit);
//! assert!((hits[0].distance - 4.5).abs() < 1e-9);
//! ```

mod error;
pub mod export;
mod scene;

pub use error::{Result, SceneError};
pub use scene::{HitResult, RayCaster, Scene};
