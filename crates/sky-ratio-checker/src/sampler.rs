//! Hemispherical ray sampling.
//!
//! Directions form a grid in (elevation θ, azimuth φ) with Z up. θ is
//! measured from the horizon (θ = 0) towards the zenith (θ = 90°), and
//! only the band `[THETA_MIN_DEG, THETA_MAX_DEG]` is sampled.

use std::f64::consts::PI;

use sky_ratio_math::{Point3, Vec3};

/// Lowest sampled elevation in degrees.
pub const THETA_MIN_DEG: f64 = 20.0;

/// Highest sampled elevation in degrees.
pub const THETA_MAX_DEG: f64 = 89.0;

/// Resolution used when the requested one is outside (0, 180].
pub const DEFAULT_RESOLUTION_DEG: f64 = 1.0;

/// Clamp an angular resolution to (0, 180] degrees, falling back to
/// [`DEFAULT_RESOLUTION_DEG`].
pub fn sanitize_resolution(resolution_deg: f64) -> f64 {
    if resolution_deg > 0.0 && resolution_deg <= 180.0 {
        resolution_deg
    } else {
        DEFAULT_RESOLUTION_DEG
    }
}

/// Layout of the sampled direction grid for one resolution.
///
/// Ray `t * phi_steps + p` has elevation row `t` and azimuth column `p`.
/// The ray count grows with the inverse square of the resolution and is not
/// capped; at 0.01° a single checkpoint needs about 2.5·10⁸ rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayGrid {
    resolution_deg: f64,
    theta_steps: usize,
    phi_steps: usize,
}

impl RayGrid {
    /// Grid for `requested_deg`, sanitized first.
    pub fn new(requested_deg: f64) -> Self {
        let resolution_deg = sanitize_resolution(requested_deg);
        if resolution_deg != requested_deg {
            log::warn!(
                "RayGrid: resolution {requested_deg}° outside (0, 180], using {resolution_deg}°"
            );
        }
        let theta_steps = ((THETA_MAX_DEG - THETA_MIN_DEG) / resolution_deg).floor() as usize;
        let phi_steps = ((360.0 / resolution_deg).floor() as usize).max(1);
        Self {
            resolution_deg,
            theta_steps,
            phi_steps,
        }
    }

    /// Effective resolution in degrees.
    pub fn resolution_deg(&self) -> f64 {
        self.resolution_deg
    }

    /// Effective resolution in radians.
    pub fn resolution_rad(&self) -> f64 {
        self.resolution_deg.to_radians()
    }

    /// Elevation steps above the first row; rows are `0..=theta_steps`.
    pub fn theta_steps(&self) -> usize {
        self.theta_steps
    }

    /// Azimuth samples per row.
    pub fn phi_steps(&self) -> usize {
        self.phi_steps
    }

    /// Total number of rays, `(theta_steps + 1) * phi_steps`.
    ///
    /// Saturates at `usize::MAX` for resolutions too fine to enumerate.
    pub fn ray_count(&self) -> usize {
        self.theta_steps
            .saturating_add(1)
            .saturating_mul(self.phi_steps)
    }

    /// Elevation of row `t` in radians.
    pub fn theta(&self, t: usize) -> f64 {
        (THETA_MIN_DEG + t as f64 * self.resolution_deg).to_radians()
    }

    /// Azimuth of column `p` in radians.
    pub fn phi(&self, p: usize) -> f64 {
        p as f64 * 2.0 * PI / self.phi_steps as f64
    }

    /// Flat index of row `t`, column `p`.
    pub fn index(&self, t: usize, p: usize) -> usize {
        t * self.phi_steps + p
    }

    /// Unit direction `(cos θ cos φ, cos θ sin φ, sin θ)` of row `t`, column `p`.
    pub fn direction(&self, t: usize, p: usize) -> Vec3 {
        let (sin_theta, cos_theta) = self.theta(t).sin_cos();
        let (sin_phi, cos_phi) = self.phi(p).sin_cos();
        Vec3::new(cos_theta * cos_phi, cos_theta * sin_phi, sin_theta)
    }

    /// All directions in flat index order.
    pub fn directions(&self) -> Vec<Vec3> {
        let mut dirs = Vec::with_capacity(self.ray_count());
        for t in 0..=self.theta_steps {
            for p in 0..self.phi_steps {
                dirs.push(self.direction(t, p));
            }
        }
        dirs
    }
}

/// Rays from `checkpoint` over the hemisphere grid, in flat index order.
pub fn generate_rays(checkpoint: &Point3, resolution_deg: f64) -> Vec<(Point3, Vec3)> {
    RayGrid::new(resolution_deg)
        .directions()
        .into_iter()
        .map(|d| (*checkpoint, d))
        .collect()
}
