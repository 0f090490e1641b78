//! Distance and intersection queries between the convex hulls of point sets.
//!
//! The most general methods provided by this module are:
//!
//! * [`convex_distance()`] to compute the distance between two convex hulls.
//! * [`convex_collision()`] to determine if two convex hulls are intersecting or not.
//! * [`convex_closest_points()`] to compute the closest points between two convex hulls.
//!
//! All of them work in 2D and 3D alike and rely on the [`gjk`] module.

pub use self::convex_sets::{convex_closest_points, convex_collision, convex_distance};

mod convex_sets;
pub mod gjk;
