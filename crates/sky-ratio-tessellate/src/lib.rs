#![warn(missing_docs)]

//! Primitive to triangle soup tessellation for sky ratio scenes.
//!
//! Converts declared primitives into a single indexed triangle soup:
//! 1. Boxes become 8 rotated corners and 12 outward-wound triangles
//! 2. Spheres become a fixed-resolution UV sphere
//! 3. Raw meshes are ingested triangle by triangle
//!
//! The soup is a grow-only arena for one build cycle: triangles address
//! vertices by index, never by reference.

mod error;
mod primitive;

pub use error::{Result, TessellateError};
pub use primitive::Primitive;

use std::f64::consts::PI;
use sky_ratio_math::{euler_rotation, Point3, Vec3};

/// Box triangles over corners indexed by `x | y << 1 | z << 2`, two per face.
#[rustfmt::skip]
const BOX_FACES: [[u32; 3]; 12] = [
    [0, 2, 1], [2, 3, 1], // -Z
    [4, 5, 6], [5, 7, 6], // +Z
    [0, 4, 2], [4, 6, 2], // -X
    [1, 3, 5], [3, 7, 5], // +X
    [0, 1, 4], [1, 5, 4], // -Y
    [2, 6, 3], [6, 7, 3], // +Y
];

/// UV sphere resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereParams {
    /// Longitude segments around the polar axis.
    pub segments: u32,
    /// Latitude rings from pole to pole.
    pub rings: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            segments: 16,
            rings: 8,
        }
    }
}

/// Indexed triangle soup derived from scene primitives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangles as index triples into `vertices`.
    pub indices: Vec<[u32; 3]>,
}

impl TriangleSoup {
    /// Create an empty soup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a soup from a sequence of primitives.
    pub fn from_primitives<'a>(primitives: impl IntoIterator<Item = &'a Primitive>) -> Self {
        let mut soup = Self::new();
        for primitive in primitives {
            soup.append(primitive);
        }
        soup
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// True if the soup holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Drop all vertices and triangles.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Tessellate a primitive and append it.
    pub fn append(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Box {
                center,
                size,
                euler,
            } => self.append_box(center, size, euler),
            Primitive::Sphere { center, radius } => {
                self.append_sphere(center, *radius, &SphereParams::default())
            }
            Primitive::RawMesh { vertices } => self.append_triangles(vertices),
        }
    }

    /// Append an oriented box: half extents rotated by the Euler matrix,
    /// then translated to `center`.
    pub fn append_box(&mut self, center: &Point3, size: &Vec3, euler: &Vec3) {
        let rotation = euler_rotation(euler);
        let half = *size / 2.0;
        let base = self.vertices.len() as u32;

        for i in 0..8u32 {
            let local = Vec3::new(
                if i & 1 != 0 { half.x } else { -half.x },
                if i & 2 != 0 { half.y } else { -half.y },
                if i & 4 != 0 { half.z } else { -half.z },
            );
            self.vertices.push(*center + rotation * local);
        }

        self.indices.extend(
            BOX_FACES
                .iter()
                .map(|f| [base + f[0], base + f[1], base + f[2]]),
        );
    }

    /// Append a UV sphere with poles on the Y axis, rings starting at +Y.
    ///
    /// Each ring starts and ends on a duplicated seam vertex. Triangles
    /// touching a pole collapse to zero area on one side; they are kept.
    /// Faces are wound outward.
    pub fn append_sphere(&mut self, center: &Point3, radius: f64, params: &SphereParams) {
        let base = self.vertices.len() as u32;
        let (segments, rings) = (params.segments, params.rings);

        for ring in 0..=rings {
            let phi = PI * ring as f64 / rings as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for seg in 0..=segments {
                let theta = 2.0 * PI * seg as f64 / segments as f64;
                let (sin_theta, cos_theta) = theta.sin_cos();
                self.vertices.push(
                    *center
                        + radius * Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta),
                );
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let current = base + ring * (segments + 1) + seg;
                let next = current + segments + 1;
                self.indices.push([current, current + 1, next]);
                self.indices.push([current + 1, next + 1, next]);
            }
        }
    }

    /// Append a triangle list; a trailing partial triangle is ignored.
    pub fn append_triangles(&mut self, vertices: &[Point3]) {
        let base = self.vertices.len() as u32;
        let count = vertices.len() / 3;
        self.vertices.extend_from_slice(&vertices[..count * 3]);
        self.indices.extend((0..count as u32).map(|i| {
            let first = base + i * 3;
            [first, first + 1, first + 2]
        }));
    }

    /// Vertex positions of triangle `i`.
    pub fn triangle(&self, i: usize) -> [Point3; 3] {
        let [a, b, c] = self.indices[i];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        (0..self.indices.len()).map(move |i| self.triangle(i))
    }

    /// Expand into a flat vertex list, three vertices per triangle.
    pub fn flat_vertices(&self) -> Vec<Point3> {
        self.triangles().flatten().collect()
    }

    /// Signed volume enclosed by the soup (positive for outward winding).
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }

    /// Total triangle area.
    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() / 2.0)
            .sum()
    }
}

/// Unit normal of triangle `(a, b, c)` by the right-hand rule.
///
/// Degenerate triangles get `(0, 0, 1)`.
pub fn triangle_normal(a: &Point3, b: &Point3, c: &Point3) -> Vec3 {
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len > 0.0 {
        n / len
    } else {
        Vec3::z()
    }
}
