//! Scene ownership, rebuild and raycast.

use std::path::Path;

use sky_ratio_bvh::{Bvh, Ray};
use sky_ratio_math::{Point3, Vec3};
use sky_ratio_tessellate::{Primitive, TriangleSoup};

use crate::export::stl;
use crate::{Result, SceneError};

/// Result of casting one ray into a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Whether the ray hit any geometry.
    pub hit: bool,
    /// Hit position, the origin on a miss.
    pub position: Point3,
    /// Ray parameter of the hit in units of the direction's length,
    /// `f64::INFINITY` on a miss.
    pub distance: f64,
}

impl HitResult {
    /// A miss for a ray starting at `origin`.
    pub fn miss(origin: Point3) -> Self {
        Self {
            hit: false,
            position: origin,
            distance: f64::INFINITY,
        }
    }
}

/// A queryable source of ray hits.
///
/// Implemented by [`Scene`]. The sky ratio checker only talks to this trait.
pub trait RayCaster {
    /// True if the last build produced at least one triangle.
    fn has_geometry(&self) -> bool;

    /// True if primitives changed since the last build.
    fn needs_build(&self) -> bool;

    /// Nearest hit for each `(origin, direction)` pair, in input order.
    fn raycast(&self, origins: &[Point3], directions: &[Vec3]) -> Result<Vec<HitResult>>;
}

/// A set of obstructing primitives plus the geometry derived from them.
///
/// Derived geometry is only refreshed by [`Scene::build`]. Mutation and
/// queries must not overlap; `&mut self` on every mutator enforces that
/// within safe code.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    soup: TriangleSoup,
    index: Option<Bvh>,
    dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            soup: TriangleSoup::new(),
            index: None,
            dirty: true,
        }
    }

    /// Remove all primitives and derived geometry.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.soup.clear();
        self.index = None;
        self.dirty = true;
    }

    /// Declare an oriented box. `euler` holds extrinsic angles in radians.
    pub fn add_box(&mut self, center: Point3, size: Vec3, euler: Vec3) {
        self.add_primitive(Primitive::cuboid(center, size, euler));
    }

    /// Declare a sphere.
    pub fn add_sphere(&mut self, center: Point3, radius: f64) {
        self.add_primitive(Primitive::sphere(center, radius));
    }

    /// Declare a raw triangle list, each consecutive vertex triple one triangle.
    ///
    /// A vertex count that is not a multiple of 3 rejects the whole list and
    /// leaves the scene untouched.
    pub fn add_mesh(&mut self, vertices: Vec<Point3>) -> Result<()> {
        let count = vertices.len();
        match Primitive::raw_mesh(vertices) {
            Ok(primitive) => {
                self.add_primitive(primitive);
                Ok(())
            }
            Err(err) => {
                log::warn!("Scene: rejected raw mesh with {count} vertices");
                Err(SceneError::InvalidMesh(err))
            }
        }
    }

    /// Declare any primitive.
    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
        self.dirty = true;
    }

    /// Re-tessellate every primitive and rebuild the spatial index.
    ///
    /// Always a full rebuild. An empty soup leaves no index.
    pub fn build(&mut self) {
        self.soup = TriangleSoup::from_primitives(&self.primitives);
        self.index = if self.soup.is_empty() {
            None
        } else {
            Some(Bvh::build(&self.soup.flat_vertices()))
        };
        self.dirty = false;

        log::debug!(
            "Scene: built {} primitives into {} triangles",
            self.primitives.len(),
            self.soup.num_triangles()
        );
    }

    /// Declared primitives.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of declared primitives.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Triangle soup from the last build.
    pub fn soup(&self) -> &TriangleSoup {
        &self.soup
    }

    /// Number of triangles from the last build.
    pub fn triangle_count(&self) -> usize {
        self.soup.num_triangles()
    }

    /// True if anything changed since the last build.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True if the last build produced at least one triangle.
    pub fn has_geometry(&self) -> bool {
        !self.soup.is_empty()
    }

    /// True if declared primitives have not been built yet.
    pub fn needs_build(&self) -> bool {
        self.dirty && !self.primitives.is_empty()
    }

    /// Cast one ray per `(origin, direction)` pair against the last build.
    ///
    /// Directions are used as given; `distance` is in units of their length.
    /// Without an index every ray misses.
    pub fn raycast(&self, origins: &[Point3], directions: &[Vec3]) -> Result<Vec<HitResult>> {
        if origins.len() != directions.len() {
            return Err(SceneError::RayCountMismatch {
                origins: origins.len(),
                directions: directions.len(),
            });
        }
        if origins.is_empty() {
            return Ok(Vec::new());
        }
        if self.needs_build() {
            log::warn!(
                "Scene: raycasting {} rays against a stale build",
                origins.len()
            );
        }

        let Some(index) = &self.index else {
            return Ok(origins.iter().map(|&o| HitResult::miss(o)).collect());
        };

        let rays: Vec<Ray> = origins
            .iter()
            .zip(directions)
            .map(|(&o, &d)| Ray::new(o, d))
            .collect();

        let results = index
            .intersect_batch(&rays)
            .into_iter()
            .zip(&rays)
            .map(|(hit, ray)| {
                if hit.is_hit() {
                    HitResult {
                        hit: true,
                        position: ray.at(hit.t),
                        distance: hit.t,
                    }
                } else {
                    HitResult::miss(ray.origin)
                }
            })
            .collect();

        Ok(results)
    }

    /// Export the last build as binary STL bytes.
    pub fn to_stl(&self) -> Vec<u8> {
        stl::to_stl_bytes(&self.soup)
    }

    /// Write the last build to `path` as binary STL.
    pub fn write_stl(&self, path: impl AsRef<Path>) -> Result<()> {
        stl::export_stl(&self.soup, path)
    }
}

impl RayCaster for Scene {
    fn has_geometry(&self) -> bool {
        Scene::has_geometry(self)
    }

    fn needs_build(&self) -> bool {
        Scene::needs_build(self)
    }

    fn raycast(&self, origins: &[Point3], directions: &[Vec3]) -> Result<Vec<HitResult>> {
        Scene::raycast(self, origins, directions)
    }
}
