//! Reduction of per-ray hits to a projected sky fraction.
//!
//! For every azimuth column the highest blocked elevation becomes the
//! occlusion boundary. Boundaries are shifted by one resolution step
//! (up for safe-side evaluation, down otherwise) and clamped to
//! `[0, π/2]`. Adjacent columns are then combined by triangular quadrature
//! of the orthographic sky area, where a boundary θ leaves `cos²θ` of the
//! projected disk visible.

use std::f64::consts::FRAC_PI_2;

use sky_ratio_scene::HitResult;

use crate::RayGrid;

/// Ratio reported for a checkpoint whose raycast came back malformed.
pub const RESULT_SENTINEL: f64 = -1.0;

/// Occlusion boundary elevation per azimuth column, in radians.
///
/// Columns without any hit keep a boundary of 0. `hits` must hold
/// `grid.ray_count()` entries in flat index order.
pub fn occlusion_boundaries(hits: &[HitResult], grid: &RayGrid, use_safe_side: bool) -> Vec<f64> {
    let step = grid.resolution_rad();

    (0..grid.phi_steps())
        .map(|p| {
            let highest = (0..=grid.theta_steps())
                .filter(|&t| hits[grid.index(t, p)].hit)
                .last()
                .map(|t| grid.theta(t));

            match highest {
                Some(theta) => {
                    let corrected = if use_safe_side {
                        theta + step
                    } else {
                        theta - step
                    };
                    corrected.clamp(0.0, FRAC_PI_2)
                }
                None => 0.0,
            }
        })
        .collect()
}

/// Visible fraction of the projected sky disk for per-column boundaries.
///
/// Each column contributes `cos θ_p · cos θ_{p+1}`, wrapping the last
/// column onto the first. The sum is normalized by the column count and
/// clamped to `[0, 1]`.
pub fn projected_sky_fraction(boundaries: &[f64]) -> f64 {
    let n = boundaries.len();
    if n == 0 {
        return 1.0;
    }

    let area: f64 = (0..n)
        .map(|p| boundaries[p].cos() * boundaries[(p + 1) % n].cos())
        .sum();

    (area / n as f64).clamp(0.0, 1.0)
}

/// Sky ratio for one checkpoint's raycast results.
///
/// Returns `None` if `hits` does not match the grid's ray count.
pub fn sky_ratio(hits: &[HitResult], grid: &RayGrid, use_safe_side: bool) -> Option<f64> {
    if hits.len() != grid.ray_count() {
        return None;
    }
    let boundaries = occlusion_boundaries(hits, grid, use_safe_side);
    Some(projected_sky_fraction(&boundaries))
}
