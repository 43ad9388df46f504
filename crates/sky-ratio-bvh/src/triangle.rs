//! Ray-triangle intersection (Möller–Trumbore).

use sky_ratio_math::{Point3, Tolerance, Vec3};

use crate::{Aabb3, Ray};

/// A triangle with precomputed edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3,
    /// `v1 - v0`.
    pub e1: Vec3,
    /// `v2 - v0`.
    pub e2: Vec3,
}

impl Triangle {
    /// Create a triangle from its three vertices.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Self {
        Self {
            v0,
            e1: v1 - v0,
            e2: v2 - v0,
        }
    }

    /// The three vertices.
    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v0 + self.e1, self.v0 + self.e2]
    }

    /// Bounding box of the triangle.
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_points(&self.vertices())
    }

    /// Intersect a ray with this triangle, both faces counting.
    ///
    /// Returns the ray parameter of the hit if it lies in `(t_min, t_max)`.
    /// Rays parallel to the triangle plane and zero-area triangles never hit.
    #[inline]
    pub fn intersect(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<f64> {
        let pvec = ray.direction.cross(&self.e2);
        let det = self.e1.dot(&pvec);
        if det.abs() < Tolerance::DEFAULT.parallel {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin - self.v0;
        let u = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(&self.e1);
        let v = ray.direction.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = self.e2.dot(&qvec) * inv_det;
        if t <= t_min || t >= t_max {
            return None;
        }
        Some(t)
    }
}
