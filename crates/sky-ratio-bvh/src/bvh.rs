//! Bounding Volume Hierarchy for accelerated ray-triangle queries.
//!
//! Uses Surface Area Heuristic (SAH) for construction.

use rayon::prelude::*;
use sky_ratio_math::Point3;

use crate::{Aabb3, IndexHit, Ray, Triangle, NO_HIT};

/// Number of rays handed to one worker by [`Bvh::intersect_batch`].
pub const BATCH_SIZE: usize = 256;

/// Leaves hold at most this many triangles.
const MAX_LEAF_SIZE: usize = 4;

/// Hits closer than this to the ray origin are ignored.
const T_EPSILON: f64 = 1e-9;

/// A BVH node - either a leaf containing triangles or an internal node with children.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Leaf node containing triangle indices.
    Leaf {
        /// Axis-aligned bounding box of this node.
        aabb: Aabb3,
        /// Indices into the triangle list.
        triangles: Vec<u32>,
    },
    /// Internal node with two children.
    Internal {
        /// Axis-aligned bounding box of this node.
        aabb: Aabb3,
        /// Left child node.
        left: Box<BvhNode>,
        /// Right child node.
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    /// Bounding box of this node.
    pub fn aabb(&self) -> &Aabb3 {
        match self {
            BvhNode::Leaf { aabb, .. } => aabb,
            BvhNode::Internal { aabb, .. } => aabb,
        }
    }
}

/// Bounding Volume Hierarchy over a triangle list.
///
/// Immutable after [`Bvh::build`]; queries take `&self` and may run
/// concurrently.
#[derive(Debug, Clone)]
pub struct Bvh {
    root: Option<BvhNode>,
    triangles: Vec<Triangle>,
}

/// Per-triangle build record: index, bounds, centroid.
type BuildEntry = (u32, Aabb3, Point3);

impl Bvh {
    /// Build a BVH from a flat vertex list, three vertices per triangle.
    ///
    /// A trailing partial triangle is ignored.
    pub fn build(vertices: &[Point3]) -> Self {
        let triangles: Vec<Triangle> = vertices
            .chunks_exact(3)
            .map(|v| Triangle::new(v[0], v[1], v[2]))
            .collect();

        let mut entries: Vec<BuildEntry> = triangles
            .iter()
            .enumerate()
            .map(|(i, tri)| {
                let aabb = tri.aabb();
                (i as u32, aabb, aabb.centroid())
            })
            .collect();

        let root = if entries.is_empty() {
            None
        } else {
            Some(build_node(&mut entries))
        };

        Self { root, triangles }
    }

    /// Number of indexed triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Get a reference to the root node, if any.
    pub fn root(&self) -> Option<&BvhNode> {
        self.root.as_ref()
    }

    /// Bounding box of all triangles.
    pub fn bounds(&self) -> Aabb3 {
        self.root
            .as_ref()
            .map(|root| *root.aabb())
            .unwrap_or_else(Aabb3::empty)
    }

    /// Nearest hit along a single ray.
    pub fn intersect(&self, ray: &Ray) -> IndexHit {
        let mut closest = IndexHit::miss();
        if let Some(ref root) = self.root {
            self.intersect_node(ray, root, &mut closest);
        }
        closest
    }

    /// Nearest hits for a contiguous packet of rays, in input order.
    pub fn intersect_packet(&self, rays: &[Ray]) -> Vec<IndexHit> {
        rays.iter().map(|ray| self.intersect(ray)).collect()
    }

    /// Nearest hits for many rays, in input order.
    ///
    /// Rays are split into packets of [`BATCH_SIZE`] and the packets are
    /// traced in parallel. Every ray goes through [`Bvh::intersect`], so the
    /// output equals tracing the rays one at a time.
    pub fn intersect_batch(&self, rays: &[Ray]) -> Vec<IndexHit> {
        if self.root.is_none() {
            return vec![IndexHit::miss(); rays.len()];
        }
        rays.par_chunks(BATCH_SIZE)
            .map(|packet| self.intersect_packet(packet))
            .collect::<Vec<_>>()
            .concat()
    }

    /// Trace a ray, keeping only the closest hit.
    fn intersect_node(&self, ray: &Ray, node: &BvhNode, closest: &mut IndexHit) {
        match node {
            BvhNode::Leaf { aabb, triangles } => {
                if let Some((t_min, _)) = ray.intersect_aabb(aabb) {
                    // Early out if AABB entry is beyond current closest
                    if t_min > closest.t {
                        return;
                    }

                    for &prim in triangles {
                        let tri = &self.triangles[prim as usize];
                        if let Some(t) = tri.intersect(ray, T_EPSILON, closest.t) {
                            *closest = IndexHit { t, prim };
                        }
                    }
                }
            }
            BvhNode::Internal { aabb, left, right } => {
                if let Some((t_min, _)) = ray.intersect_aabb(aabb) {
                    if t_min > closest.t {
                        return;
                    }

                    // Test children in order of AABB distance
                    let left_t = ray.intersect_aabb(left.aabb()).map(|(t, _)| t);
                    let right_t = ray.intersect_aabb(right.aabb()).map(|(t, _)| t);

                    match (left_t, right_t) {
                        (Some(lt), Some(rt)) => {
                            if lt <= rt {
                                self.intersect_node(ray, left, closest);
                                self.intersect_node(ray, right, closest);
                            } else {
                                self.intersect_node(ray, right, closest);
                                self.intersect_node(ray, left, closest);
                            }
                        }
                        (Some(_), None) => self.intersect_node(ray, left, closest),
                        (None, Some(_)) => self.intersect_node(ray, right, closest),
                        (None, None) => {}
                    }
                }
            }
        }
    }
}

/// Build a BVH node recursively using SAH.
fn build_node(entries: &mut [BuildEntry]) -> BvhNode {
    let mut bounds = Aabb3::empty();
    for (_, aabb, _) in entries.iter() {
        bounds.include_aabb(aabb);
    }

    // Base case: small number of triangles -> leaf
    if entries.len() <= MAX_LEAF_SIZE {
        return BvhNode::Leaf {
            aabb: bounds,
            triangles: entries.iter().map(|(id, _, _)| *id).collect(),
        };
    }

    let mid = match find_best_split(entries, &bounds) {
        Some((axis, pos)) => partition(entries, axis, pos),
        None => 0,
    };

    // Fallback if partition fails: split in the middle
    let mid = if mid == 0 || mid == entries.len() {
        entries.len() / 2
    } else {
        mid
    };

    let (left_data, right_data) = entries.split_at_mut(mid);

    BvhNode::Internal {
        aabb: bounds,
        left: Box::new(build_node(left_data)),
        right: Box::new(build_node(right_data)),
    }
}

/// Find the best split axis and position using SAH.
fn find_best_split(entries: &[BuildEntry], bounds: &Aabb3) -> Option<(usize, f64)> {
    const NUM_BUCKETS: usize = 12;

    let total_area = bounds.surface_area();
    if total_area <= 0.0 {
        return None;
    }

    let mut centroid_bounds = Aabb3::empty();
    for (_, _, c) in entries {
        centroid_bounds.include_point(c);
    }

    let mut best: Option<(usize, f64)> = None;
    let mut best_cost = f64::INFINITY;

    for axis in 0..3 {
        let axis_min = Aabb3::axis(&centroid_bounds.min, axis);
        let axis_extent = Aabb3::axis(&centroid_bounds.max, axis) - axis_min;

        if axis_extent < 1e-10 {
            continue;
        }

        let mut bucket_counts = [0usize; NUM_BUCKETS];
        let mut bucket_bounds = [Aabb3::empty(); NUM_BUCKETS];

        for (_, aabb, centroid) in entries {
            let c = Aabb3::axis(centroid, axis);
            let b = ((c - axis_min) / axis_extent * NUM_BUCKETS as f64) as usize;
            let b = b.min(NUM_BUCKETS - 1);

            bucket_counts[b] += 1;
            bucket_bounds[b].include_aabb(aabb);
        }

        // Sweep to find best split
        for split in 1..NUM_BUCKETS {
            let mut left_count = 0;
            let mut left_bounds = Aabb3::empty();
            for i in 0..split {
                left_count += bucket_counts[i];
                left_bounds.include_aabb(&bucket_bounds[i]);
            }

            let mut right_count = 0;
            let mut right_bounds = Aabb3::empty();
            for i in split..NUM_BUCKETS {
                right_count += bucket_counts[i];
                right_bounds.include_aabb(&bucket_bounds[i]);
            }

            if left_count == 0 || right_count == 0 {
                continue;
            }

            // SAH cost: traversal + P(left) * N_left + P(right) * N_right
            let cost = 0.125
                + left_bounds.surface_area() / total_area * left_count as f64
                + right_bounds.surface_area() / total_area * right_count as f64;

            if cost < best_cost {
                best_cost = cost;
                best = Some((
                    axis,
                    axis_min + (split as f64 / NUM_BUCKETS as f64) * axis_extent,
                ));
            }
        }
    }

    best
}

/// Partition entries by centroid along an axis, returning the split index.
fn partition(entries: &mut [BuildEntry], axis: usize, pos: f64) -> usize {
    let mut left = 0;
    let mut right = entries.len();

    while left < right {
        if Aabb3::axis(&entries[left].2, axis) < pos {
            left += 1;
        } else {
            right -= 1;
            entries.swap(left, right);
        }
    }

    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use sky_ratio_math::Vec3;

    /// Two triangles per unit square on the plane `z = height`, tiled `n × n`.
    fn tiled_plane(n: usize, height: f64) -> Vec<Point3> {
        let mut verts = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let (x, y) = (i as f64, j as f64);
                let p00 = Point3::new(x, y, height);
                let p10 = Point3::new(x + 1.0, y, height);
                let p01 = Point3::new(x, y + 1.0, height);
                let p11 = Point3::new(x + 1.0, y + 1.0, height);
                verts.extend_from_slice(&[p00, p10, p11, p00, p11, p01]);
            }
        }
        verts
    }

    /// Brute-force nearest hit for comparison.
    fn brute_force(verts: &[Point3], ray: &Ray) -> f64 {
        verts
            .chunks_exact(3)
            .filter_map(|v| Triangle::new(v[0], v[1], v[2]).intersect(ray, T_EPSILON, NO_HIT))
            .fold(NO_HIT, f64::min)
    }

    #[test]
    fn test_bvh_build() {
        let bvh = Bvh::build(&tiled_plane(4, 0.0));
        assert!(bvh.root().is_some());
        assert_eq!(bvh.num_triangles(), 32);
        let bounds = bvh.bounds();
        assert_eq!(bounds.max, Point3::new(4.0, 4.0, 0.0));
    }

    #[test]
    fn test_empty_bvh_misses() {
        let bvh = Bvh::build(&[]);
        assert!(bvh.root().is_none());
        let ray = Ray::new(Point3::origin(), Vec3::z());
        assert!(!bvh.intersect(&ray).is_hit());
        let hits = bvh.intersect_batch(&[ray; 3]);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| !h.is_hit()));
    }

    #[test]
    fn test_partial_triangle_ignored() {
        let mut verts = tiled_plane(1, 0.0);
        verts.push(Point3::origin());
        assert_eq!(Bvh::build(&verts).num_triangles(), 2);
    }

    #[test]
    fn test_closest_of_stacked_planes() {
        let mut verts = tiled_plane(3, 10.0);
        verts.extend(tiled_plane(3, 4.0));
        verts.extend(tiled_plane(3, 7.0));
        let bvh = Bvh::build(&verts);

        let ray = Ray::new(Point3::new(1.5, 1.5, 0.0), Vec3::z());
        let hit = bvh.intersect(&ray);
        assert!(hit.is_hit());
        assert!((hit.t - 4.0).abs() < 1e-10);
        assert!((ray.at(hit.t).z - 4.0).abs() < 1e-10);
        assert!(hit.prim >= 18 && hit.prim < 36);
    }

    #[test]
    fn test_miss_outside_bounds() {
        let bvh = Bvh::build(&tiled_plane(3, 5.0));
        let ray = Ray::new(Point3::new(50.0, 50.0, 0.0), Vec3::z());
        let hit = bvh.intersect(&ray);
        assert!(!hit.is_hit());
        assert_eq!(hit.t, NO_HIT);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut verts = tiled_plane(6, 3.0);
        verts.extend(tiled_plane(2, 1.0));
        let bvh = Bvh::build(&verts);

        for k in 0..200 {
            let a = k as f64 * 0.731;
            let dir = Vec3::new(a.cos(), a.sin(), 0.2 + (k % 7) as f64 * 0.3);
            let ray = Ray::new(Point3::new(3.0, 3.0, 0.0), dir);
            let expected = brute_force(&verts, &ray);
            let got = bvh.intersect(&ray).t;
            assert!(
                (expected - got).abs() < 1e-9 || (expected == NO_HIT && got == NO_HIT),
                "ray {k}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn test_batch_equals_single() {
        let mut verts = tiled_plane(8, 2.0);
        verts.extend(tiled_plane(4, 1.0));
        let bvh = Bvh::build(&verts);

        // More than two packets plus a partial one.
        let rays: Vec<Ray> = (0..(BATCH_SIZE * 2 + 37))
            .map(|k| {
                let a = k as f64 * 0.05;
                Ray::new(Point3::new(4.0, 4.0, 0.0), Vec3::new(a.cos(), a.sin(), 0.5))
            })
            .collect();

        let batched = bvh.intersect_batch(&rays);
        assert_eq!(batched.len(), rays.len());
        for (ray, hit) in rays.iter().zip(&batched) {
            assert_eq!(*hit, bvh.intersect(ray));
        }
    }
}
