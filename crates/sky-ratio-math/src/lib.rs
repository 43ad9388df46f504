#![warn(missing_docs)]

//! Math types for sky ratio geometry.
//!
//! Thin wrappers around nalgebra providing the types shared by the
//! tessellator, the spatial index, the scene and the checker: points,
//! vectors, the Euler rotation used by oriented boxes, and tolerance
//! constants. The frame is Z-up throughout.

use nalgebra::{Matrix3, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space (directions, extents, Euler angles).
pub type Vec3 = Vector3<f64>;

/// A 3x3 rotation matrix.
pub type Mat3 = Matrix3<f64>;

/// Rotation matrix for extrinsic Euler angles `(x, y, z)` in radians.
///
/// ```text
/// | cy·cz             -cy·sz              sy    |
/// | sx·sy·cz + cx·sz  -sx·sy·sz + cx·cz  -sx·cy |
/// | -cx·sy·cz + sx·sz  cx·sy·sz + sx·cz   cx·cy |
/// ```
///
/// Boxes declared with the same angles must land on the same corners
/// regardless of the caller, so this layout is fixed.
pub fn euler_rotation(euler: &Vec3) -> Mat3 {
    let (sx, cx) = euler.x.sin_cos();
    let (sy, cy) = euler.y.sin_cos();
    let (sz, cz) = euler.z.sin_cos();

    Mat3::new(
        cy * cz,
        -cy * sz,
        sy,
        sx * sy * cz + cx * sz,
        -sx * sy * sz + cx * cz,
        -sx * cy,
        -cx * sy * cz + sx * sz,
        cx * sy * sz + sx * cz,
        cx * cy,
    )
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Determinant threshold below which a ray is parallel to a triangle.
    pub parallel: f64,
}

impl Tolerance {
    /// Default tolerances (1e-12 parallel).
    pub const DEFAULT: Self = Self { parallel: 1e-12 };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_rotation() {
        let r = euler_rotation(&Vec3::zeros());
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!((r * v - v).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_z_90() {
        let r = euler_rotation(&Vec3::new(0.0, 0.0, PI / 2.0));
        let v = r * Vec3::x();
        assert!(v.x.abs() < 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
        assert!(v.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotation_x_90() {
        // +Y goes to +Z about the X axis.
        let r = euler_rotation(&Vec3::new(PI / 2.0, 0.0, 0.0));
        let v = r * Vec3::y();
        assert!(v.x.abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_y_90() {
        // +Z goes to +X about the Y axis.
        let r = euler_rotation(&Vec3::new(0.0, PI / 2.0, 0.0));
        let v = r * Vec3::z();
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-12);
        assert!(v.y.abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = euler_rotation(&Vec3::new(0.3, -1.1, 2.4));
        let should_be_identity = r.transpose() * r;
        assert!((should_be_identity - Mat3::identity()).norm() < 1e-12);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
    }
}
