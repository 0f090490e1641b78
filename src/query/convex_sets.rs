use crate::error::check_eps;
use crate::math::{Point, Real};
use crate::query::gjk::{self, GJKResult};
use crate::Error;

fn check_point_sets<const D: usize>(
    points1: &[Point<D>],
    points2: &[Point<D>],
    eps: Real,
) -> Result<(), Error> {
    check_eps(eps)?;

    if points1.is_empty() {
        return Err(Error::invalid_argument("points1", "the point set is empty"));
    }

    if points2.is_empty() {
        return Err(Error::invalid_argument("points2", "the point set is empty"));
    }

    Ok(())
}

/// Computes the minimum distance between the convex hulls of two point sets.
///
/// Returns `0.0` if the hulls intersect.
///
/// # Errors
/// Fails if a point set is empty, if `eps` is not a valid tolerance, or if
/// GJK did not converge.
///
/// # Example
///
/// ```
/// # #[macro_use] extern crate approx;
/// use scadgeom::math::{Point2, EPSILON};
/// use scadgeom::query::convex_distance;
///
/// # fn main() {
/// let square1 = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]].map(Point2::from);
/// let square2 = [[2.5, -0.5], [3.5, -0.5], [3.5, 0.5], [2.5, 0.5]].map(Point2::from);
/// let dist = convex_distance(&square1, &square2, EPSILON).unwrap();
/// assert_relative_eq!(dist, 2.0, epsilon = 1.0e-9);
/// # }
/// ```
pub fn convex_distance<const D: usize>(
    points1: &[Point<D>],
    points2: &[Point<D>],
    eps: Real,
) -> Result<Real, Error> {
    check_point_sets(points1, points2, eps)?;
    Ok(gjk::closest_points(points1, points2, eps)?.distance())
}

/// Tests whether the convex hulls of two point sets intersect.
///
/// Hulls closer than `eps` are considered as intersecting.
///
/// # Errors
/// Fails if a point set is empty, if `eps` is not a valid tolerance, or if
/// GJK did not converge.
pub fn convex_collision<const D: usize>(
    points1: &[Point<D>],
    points2: &[Point<D>],
    eps: Real,
) -> Result<bool, Error> {
    check_point_sets(points1, points2, eps)?;
    gjk::intersection_test(points1, points2, eps)
}

/// Computes a pair of closest points between the convex hulls of two point
/// sets, the first one on the hull of `points1` and the second one on the
/// hull of `points2`.
///
/// If the hulls intersect, both points lie in the intersection.
///
/// # Errors
/// Fails if a point set is empty, if `eps` is not a valid tolerance, or if
/// GJK did not converge.
pub fn convex_closest_points<const D: usize>(
    points1: &[Point<D>],
    points2: &[Point<D>],
    eps: Real,
) -> Result<(Point<D>, Point<D>), Error> {
    check_point_sets(points1, points2, eps)?;

    match gjk::closest_points(points1, points2, eps)? {
        GJKResult::Intersection(p1, p2) | GJKResult::ClosestPoints(p1, p2, _) => Ok((p1, p2)),
    }
}
