use crate::math::{Point, Vector};
use crate::utils;
use core::ops::Sub;

/// A point of a Configuration-Space Obstacle.
///
/// A Configuration-Space Obstacle (CSO) is the result of the
/// Minkowski Difference of two point sets. In other words, each of its
/// points correspond to the difference of two points, each belonging
/// to the convex hull of a different set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint<const D: usize> {
    /// The point on the CSO. This is equal to `self.orig1 - self.orig2`.
    pub point: Point<D>,
    /// The original point on the first set used to compute `self.point`.
    pub orig1: Point<D>,
    /// The original point on the second set used to compute `self.point`.
    pub orig2: Point<D>,
}

impl<const D: usize> CSOPoint<D> {
    /// Initializes a CSO point with `orig1 - orig2`.
    pub fn new(orig1: Point<D>, orig2: Point<D>) -> Self {
        let point = Point::from(orig1 - orig2);
        CSOPoint {
            point,
            orig1,
            orig2,
        }
    }

    /// Computes the support point of the CSO of the convex hulls of
    /// `points1` and `points2` toward the direction `dir`.
    ///
    /// Both point sets must be non-empty.
    pub fn from_point_sets(points1: &[Point<D>], points2: &[Point<D>], dir: &Vector<D>) -> Self {
        let sp1 = utils::point_cloud_support_point(dir, points1);
        let sp2 = utils::point_cloud_support_point(&-dir, points2);

        CSOPoint::new(sp1, sp2)
    }
}

impl<const D: usize> Sub<CSOPoint<D>> for CSOPoint<D> {
    type Output = Vector<D>;

    #[inline]
    fn sub(self, rhs: CSOPoint<D>) -> Vector<D> {
        self.point - rhs.point
    }
}
