#![warn(missing_docs)]

//! Sky ratio: how much of the sky a point can see past nearby obstructions.
//!
//! Build a [`Scene`] from boxes, spheres and raw triangle meshes, then
//! evaluate checkpoints with [`SkyRatioChecker`] or the one-shot [`check`].
//! A ratio of 1.0 means nothing blocks the sampled sky; 0.0 means it is
//! fully enclosed.
//!
//! ```
//! use sky_ratio::{check, Point3, Scene, Vec3};
//!
//! let mut scene = Scene::new();
//! // A tall wall just north of the checkpoint hides about half the sky.
//! scene.add_box(Point3::new(0.0, 2.0, 50.0), Vec3::new(100.0, 1.0, 100.0), Vec3::zeros());
//!
//! let ratios = check(&mut scene, &[Point3::new(0.0, 0.0, 1.5)], 5.0, false).unwrap();
//! assert!(ratios[0] > 0.45 && ratios[0] < 0.55);
//! ```

pub use sky_ratio_bvh as bvh;
pub use sky_ratio_checker::{
    check, generate_rays, integrate, sampler, CheckError, CheckerConfig, ConfigError, RayGrid,
    SkyRatioChecker, RESULT_SENTINEL,
};
pub use sky_ratio_math::{euler_rotation, Point3, Tolerance, Vec3};
pub use sky_ratio_scene::{export, HitResult, RayCaster, Scene, SceneError};
pub use sky_ratio_tessellate::{Primitive, SphereParams, TessellateError, TriangleSoup};
