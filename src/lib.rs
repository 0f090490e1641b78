/*!
scadgeom
========

**scadgeom** is the computational-geometry and numerical kernel behind a
parametric solid-modeling toolkit. It answers the geometric questions part
generators ask while building a model: where lines, planes and polygons meet,
whether a point is inside a polygon, how far apart two convex point sets are,
which plane best fits a cloud of points, and where a polynomial vanishes.

Every function is a pure mapping from plain numeric inputs (nalgebra points,
vectors and matrices) to a value. Malformed input is reported as
[`Error::InvalidArgument`], iterative algorithms that hit their iteration cap
report [`Error::NoConvergence`], and well-formed queries without an answer
(parallel lines, singular systems, ...) return `None` or a dedicated outcome
enum.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub use self::error::Error;

pub mod geometry;
pub mod linalg;
pub mod query;
pub mod roots;
pub mod utils;

mod error;

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use na::{
        Complex, DMatrix, DVector, Matrix2, Matrix3, Matrix4, Point2, Point3, SVector, Vector2,
        Vector3,
    };

    /// The scalar type used throughout this crate.
    pub type Real = f64;

    /// The default tolerance used for geometric and numerical comparisons.
    pub const EPSILON: Real = 1e-9;

    /// A point with a compile-time dimension.
    pub type Point<const D: usize> = na::Point<Real, D>;

    /// A vector with a compile-time dimension.
    pub type Vector<const D: usize> = SVector<Real, D>;
}
