//! Declared scene primitives.

use sky_ratio_math::{Point3, Vec3};

use crate::error::{Result, TessellateError};

/// An obstructing solid as declared by the caller.
///
/// Primitives are immutable once declared; the owning scene re-tessellates
/// all of them on every build.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Oriented box.
    Box {
        /// Box center.
        center: Point3,
        /// Full extents along the local X, Y and Z axes.
        size: Vec3,
        /// Extrinsic Euler angles in radians.
        euler: Vec3,
    },
    /// Sphere, tessellated as a UV sphere.
    Sphere {
        /// Sphere center.
        center: Point3,
        /// Sphere radius.
        radius: f64,
    },
    /// Triangle list: each consecutive vertex triple is one triangle.
    RawMesh {
        /// Vertex positions, length a multiple of 3.
        vertices: Vec<Point3>,
    },
}

impl Primitive {
    /// Declare an oriented box.
    pub fn cuboid(center: Point3, size: Vec3, euler: Vec3) -> Self {
        Self::Box {
            center,
            size,
            euler,
        }
    }

    /// Declare a sphere.
    pub fn sphere(center: Point3, radius: f64) -> Self {
        Self::Sphere { center, radius }
    }

    /// Declare a raw triangle list.
    ///
    /// Rejects the whole list when its length is not a multiple of 3.
    pub fn raw_mesh(vertices: Vec<Point3>) -> Result<Self> {
        if vertices.len() % 3 != 0 {
            return Err(TessellateError::InvalidMeshVertexCount(vertices.len()));
        }
        Ok(Self::RawMesh { vertices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TriangleSoup;

    #[test]
    fn test_raw_mesh_accepts_whole_triangles() {
        let verts = vec![Point3::origin(); 6];
        let prim = Primitive::raw_mesh(verts.clone()).unwrap();
        assert_eq!(prim, Primitive::RawMesh { vertices: verts });
    }

    #[test]
    fn test_raw_mesh_rejects_partial_triangle() {
        let verts = vec![Point3::origin(); 4];
        let err = Primitive::raw_mesh(verts).unwrap_err();
        assert_eq!(err, TessellateError::InvalidMeshVertexCount(4));
    }

    #[test]
    fn test_empty_raw_mesh_is_valid() {
        let prim = Primitive::raw_mesh(Vec::new()).unwrap();
        assert!(TriangleSoup::from_primitives([&prim]).is_empty());
    }

    #[test]
    fn test_fixed_triangle_counts() {
        let b = Primitive::cuboid(Point3::origin(), Vec3::repeat(1.0), Vec3::zeros());
        assert_eq!(TriangleSoup::from_primitives([&b]).num_triangles(), 12);
        let s = Primitive::sphere(Point3::origin(), 1.0);
        assert_eq!(TriangleSoup::from_primitives([&s]).num_triangles(), 256);
    }
}
