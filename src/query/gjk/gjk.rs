//! The Gilbert-Johnson-Keerthi distance algorithm on point sets.
//!
//! GJK works on the Minkowski difference (also called Configuration Space
//! Obstacle, or CSO) of the convex hulls of two point sets. It iteratively
//! builds a simplex inside of the CSO that approaches the point of the CSO
//! closest to the origin:
//!
//! 1. the origin is projected on the current simplex, and the simplex is
//!    reduced to the smallest face containing that projection;
//! 2. the support point of the CSO in the direction from the projection
//!    toward the origin is added to the simplex.
//!
//! The distance between the projection and the origin is an upper bound of
//! the distance between the two hulls, and the signed distance between the
//! origin and the supporting plane of the new point is a lower bound. The
//! algorithm stops when both bounds agree.

use crate::math::{Point, Real, Vector};
use crate::query::gjk::{CSOPoint, VoronoiSimplex};
use crate::Error;

/// The maximum number of iterations of GJK before giving up.
pub const MAX_ITERATIONS: usize = 100;

/// Results of the GJK algorithm.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult<const D: usize> {
    /// The convex hulls are intersecting, or closer than the tolerance.
    ///
    /// The two points are a witness of the intersection on each hull. They
    /// are equal up to the tolerance.
    Intersection(Point<D>, Point<D>),
    /// The closest points on both hulls, and their distance.
    ClosestPoints(Point<D>, Point<D>, Real),
}

impl<const D: usize> GJKResult<D> {
    /// The distance between the two hulls: zero for an intersection.
    pub fn distance(&self) -> Real {
        match self {
            GJKResult::Intersection(..) => 0.0,
            GJKResult::ClosestPoints(_, _, dist) => *dist,
        }
    }
}

/// Squared distance under which a support point is considered to be a
/// duplicate of a simplex vertex.
fn eps_tol(eps: Real) -> Real {
    eps * eps
}

fn initial_simplex<const D: usize>(points1: &[Point<D>], points2: &[Point<D>]) -> VoronoiSimplex<D> {
    VoronoiSimplex::new(CSOPoint::new(points1[0], points2[0]))
}

fn no_convergence(dist: Real) -> Error {
    log::warn!(
        "GJK did not converge after {} iterations, distance estimate: {}",
        MAX_ITERATIONS,
        dist
    );
    Error::NoConvergence {
        algorithm: "GJK",
        iterations: MAX_ITERATIONS,
        estimate: format!("distance {}", dist),
    }
}

/// Computes the closest points between the convex hulls of two non-empty
/// point sets.
///
/// The algorithm stops when the upper and lower bounds of the distance are
/// within `eps` of each other. Hulls closer than `eps` are reported as
/// intersecting.
///
/// # Errors
/// Fails with [`Error::NoConvergence`] if the bounds did not meet after
/// [`MAX_ITERATIONS`] iterations.
///
/// # Panics
/// Panics if one of the point sets is empty.
pub fn closest_points<const D: usize>(
    points1: &[Point<D>],
    points2: &[Point<D>],
    eps: Real,
) -> Result<GJKResult<D>, Error> {
    let mut simplex = initial_simplex(points1, points2);
    let mut proj = simplex.project_origin_and_reduce();

    for _ in 0..MAX_ITERATIONS {
        let max_bound = proj.coords.norm();

        if max_bound <= eps {
            let (p1, p2) = simplex.witness_points();
            return Ok(GJKResult::Intersection(p1, p2));
        }

        let dir: Vector<D> = -proj.coords / max_bound;
        let cso_point = CSOPoint::from_point_sets(points1, points2, &dir);
        let min_bound = -dir.dot(&cso_point.point.coords);

        if max_bound - min_bound <= eps {
            // The distance found has a good enough precision.
            let (p1, p2) = simplex.witness_points();
            return Ok(GJKResult::ClosestPoints(p1, p2, max_bound));
        }

        let prev_simplex = simplex.clone();

        if !simplex.add_point(cso_point, eps_tol(eps)) {
            let (p1, p2) = simplex.witness_points();
            return Ok(GJKResult::ClosestPoints(p1, p2, max_bound));
        }

        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == D {
            // Point inside of the cso.
            let (p1, p2) = simplex.witness_points();
            return Ok(GJKResult::Intersection(p1, p2));
        }

        if proj.coords.norm() >= max_bound {
            // No progress toward the origin: the previous simplex was the best.
            let (p1, p2) = prev_simplex.witness_points();
            return Ok(GJKResult::ClosestPoints(p1, p2, max_bound));
        }
    }

    Err(no_convergence(proj.coords.norm()))
}

/// Tests whether the convex hulls of two non-empty point sets intersect.
///
/// This stops as soon as a separating direction is found, so it is usually
/// cheaper than computing the distance. Hulls closer than `eps` are reported
/// as intersecting.
///
/// # Errors
/// Fails with [`Error::NoConvergence`] if no answer was found after
/// [`MAX_ITERATIONS`] iterations.
///
/// # Panics
/// Panics if one of the point sets is empty.
pub fn intersection_test<const D: usize>(
    points1: &[Point<D>],
    points2: &[Point<D>],
    eps: Real,
) -> Result<bool, Error> {
    let mut simplex = initial_simplex(points1, points2);
    let mut proj = simplex.project_origin_and_reduce();

    for _ in 0..MAX_ITERATIONS {
        let dist = proj.coords.norm();

        if dist < eps {
            return Ok(true);
        }

        let cso_point = CSOPoint::from_point_sets(points1, points2, &-proj.coords);

        if cso_point.point.coords.dot(&proj.coords) > eps * eps {
            // The plane orthogonal to `proj` separates the origin from the cso.
            return Ok(false);
        }

        // Without progress, the projection is the closest point of the cso, and
        // the support point shows it is within `eps` of the origin.
        if !simplex.add_point(cso_point, eps_tol(eps)) {
            return Ok(true);
        }

        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == D || proj.coords.norm() >= dist {
            return Ok(true);
        }
    }

    Err(no_convergence(proj.coords.norm()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point2, Point3};

    fn square(cx: Real, cy: Real) -> [Point2<Real>; 4] {
        [
            Point2::new(cx - 0.5, cy - 0.5),
            Point2::new(cx + 0.5, cy - 0.5),
            Point2::new(cx + 0.5, cy + 0.5),
            Point2::new(cx - 0.5, cy + 0.5),
        ]
    }

    #[test]
    fn separated_squares() {
        let res = closest_points(&square(0.0, 0.0), &square(3.0, 0.0), 1.0e-9).unwrap();

        match res {
            GJKResult::ClosestPoints(p1, p2, dist) => {
                assert_relative_eq!(dist, 2.0, epsilon = 1.0e-9);
                assert_relative_eq!(p1.x, 0.5, epsilon = 1.0e-9);
                assert_relative_eq!(p2.x, 2.5, epsilon = 1.0e-9);
                assert_relative_eq!(p1.y, p2.y, epsilon = 1.0e-9);
            }
            GJKResult::Intersection(..) => panic!("the squares are separated"),
        }

        assert!(!intersection_test(&square(0.0, 0.0), &square(3.0, 0.0), 1.0e-9).unwrap());
    }

    #[test]
    fn touching_and_overlapping_squares() {
        for (cx, cy) in [(1.0, 1.0), (0.5, 0.2), (1.0, 0.0)] {
            let res = closest_points(&square(0.0, 0.0), &square(cx, cy), 1.0e-9).unwrap();
            assert_relative_eq!(res.distance(), 0.0, epsilon = 1.0e-9);
            assert!(intersection_test(&square(0.0, 0.0), &square(cx, cy), 1.0e-9).unwrap());
        }
    }

    #[test]
    fn point_and_tetrahedron() {
        let tetra = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let inside = [Point3::new(0.1, 0.1, 0.1)];
        let outside = [Point3::new(1.0, 1.0, 1.0)];

        assert!(intersection_test(&tetra, &inside, 1.0e-9).unwrap());
        assert!(!intersection_test(&tetra, &outside, 1.0e-9).unwrap());

        let res = closest_points(&tetra, &outside, 1.0e-9).unwrap();
        let expected = (3.0f64.sqrt() - 1.0 / 3.0f64.sqrt()).abs();
        assert_relative_eq!(res.distance(), expected, epsilon = 1.0e-9);
    }
}
