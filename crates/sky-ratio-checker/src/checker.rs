//! Sky ratio evaluation over a set of checkpoints.

use sky_ratio_math::Point3;
use sky_ratio_scene::{RayCaster, Scene};

use crate::integrate::{sky_ratio, RESULT_SENTINEL};
use crate::{CheckError, CheckerConfig, RayGrid, Result};

/// Evaluates the sky ratio at each checkpoint against a scene.
#[derive(Debug, Clone, Default)]
pub struct SkyRatioChecker {
    /// Observation points, evaluated in order.
    pub checkpoints: Vec<Point3>,
    /// Sampling resolution and boundary correction.
    pub config: CheckerConfig,
}

impl SkyRatioChecker {
    /// A checker with no checkpoints.
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            checkpoints: Vec::new(),
            config,
        }
    }

    /// A checker over `checkpoints`, evaluated in order.
    pub fn with_checkpoints(checkpoints: Vec<Point3>, config: CheckerConfig) -> Self {
        Self {
            checkpoints,
            config,
        }
    }

    /// One ratio in `[0, 1]` per checkpoint, or [`RESULT_SENTINEL`] where the
    /// raycast returned the wrong number of results.
    ///
    /// Fails with [`CheckError::SceneNotBuilt`] if the scene has primitives
    /// that were never built. A scene without geometry yields 1.0 everywhere.
    pub fn check<R: RayCaster + ?Sized>(&self, scene: &R) -> Result<Vec<f64>> {
        if scene.needs_build() {
            return Err(CheckError::SceneNotBuilt);
        }
        if !scene.has_geometry() {
            log::warn!(
                "SkyRatioChecker: scene has no geometry, {} checkpoints see full sky",
                self.checkpoints.len()
            );
            return Ok(vec![1.0; self.checkpoints.len()]);
        }

        let grid = RayGrid::new(self.config.ray_resolution);
        let directions = grid.directions();
        let mut ratios = Vec::with_capacity(self.checkpoints.len());

        for (i, checkpoint) in self.checkpoints.iter().enumerate() {
            let origins = vec![*checkpoint; directions.len()];
            let hits = scene.raycast(&origins, &directions)?;

            let ratio = match sky_ratio(&hits, &grid, self.config.use_safe_side) {
                Some(ratio) => ratio,
                None => {
                    log::error!(
                        "SkyRatioChecker: checkpoint {i} got {} results for {} rays",
                        hits.len(),
                        grid.ray_count()
                    );
                    RESULT_SENTINEL
                }
            };
            ratios.push(ratio);
        }

        log::debug!(
            "SkyRatioChecker: {} checkpoints, {} rays each at {}°",
            self.checkpoints.len(),
            grid.ray_count(),
            grid.resolution_deg()
        );

        Ok(ratios)
    }

    /// Build `scene`, then [`check`](Self::check) it.
    pub fn build_and_check(&self, scene: &mut Scene) -> Result<Vec<f64>> {
        scene.build();
        self.check(scene)
    }
}

/// Build `scene` and evaluate `checkpoints` in one call.
///
/// An out-of-range `resolution_deg` falls back to 1°.
pub fn check(
    scene: &mut Scene,
    checkpoints: &[Point3],
    resolution_deg: f64,
    use_safe_side: bool,
) -> Result<Vec<f64>> {
    let config = CheckerConfig::new(resolution_deg, use_safe_side).sanitized();
    SkyRatioChecker::with_checkpoints(checkpoints.to_vec(), config).build_and_check(scene)
}
