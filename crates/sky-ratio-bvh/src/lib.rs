#![warn(missing_docs)]

//! Triangle bounding volume hierarchy for sky ratio raycasting.
//!
//! The spatial index is built once from a flat triangle vertex list and
//! answers nearest-hit queries, one ray at a time or in batches.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray with origin and unnormalized direction
//! - [`Aabb3`] - Axis-aligned bounding box with slab test
//! - [`Triangle`] - Triangle with precomputed edges, Möller–Trumbore intersection
//! - [`Bvh`] - SAH-built hierarchy with [`Bvh::intersect`] and [`Bvh::intersect_batch`]
//!
//! # Example
//!
//! ```
//! use sky_ratio_bvh::{Bvh, Ray};
//! use sky_ratio_math::{Point3, Vec3};
//!
//! let tri = [
//!     Point3::new(-1.0, -1.0, 5.0),
//!     Point3::new(1.0, -1.0, 5.0),
//!     Point3::new(0.0, 1.0, 5.0),
//! ];
//! let bvh = Bvh::build(&tri);
//! let hit = bvh.intersect(&Ray::new(Point3::origin(), Vec3::z()));
//! assert!(hit.is_hit());
//! assert!((hit.t - 5.0).abs() < 1e-12);
//! ```

mod aabb;
mod bvh;
mod ray;
mod triangle;

pub use aabb::Aabb3;
pub use bvh::{Bvh, BvhNode, BATCH_SIZE};
pub use ray::{IndexHit, Ray, NO_HIT};
pub use triangle::Triangle;
