use crate::math::{Point, Real, Vector};

/// Computes the index of the support point of a cloud of points.
///
/// The support point is the point with the largest projection on `dir`. Ties
/// resolve to the lowest index.
///
/// # Panics
///
/// Panics if `points` is empty.
#[inline]
pub fn point_cloud_support_point_id<const D: usize>(
    dir: &Vector<D>,
    points: &[Point<D>],
) -> usize {
    let mut best_pt = 0;
    let mut best_dot = points[0].coords.dot(dir);

    for (i, p) in points.iter().enumerate().skip(1) {
        let dot = p.coords.dot(dir);

        if dot > best_dot {
            best_dot = dot;
            best_pt = i;
        }
    }

    best_pt
}

/// Computes the support point of a cloud of points.
#[inline]
pub fn point_cloud_support_point<const D: usize>(
    dir: &Vector<D>,
    points: &[Point<D>],
) -> Point<D> {
    points[point_cloud_support_point_id(dir, points)]
}

/// Computes the index of the point of `points` that is the farthest from `pt`.
///
/// # Panics
///
/// Panics if `points` is empty.
#[inline]
pub fn furthest_point_id<const D: usize>(pt: &Point<D>, points: &[Point<D>]) -> usize {
    let mut best_pt = 0;
    let mut best_dist: Real = na::distance_squared(pt, &points[0]);

    for (i, p) in points.iter().enumerate().skip(1) {
        let dist = na::distance_squared(pt, p);

        if dist > best_dist {
            best_dist = dist;
            best_pt = i;
        }
    }

    best_pt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point2, Vector2};

    #[test]
    fn support_point_of_square() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(point_cloud_support_point_id(&Vector2::new(1.0, 0.1), &pts), 2);
        assert_eq!(
            point_cloud_support_point(&Vector2::new(-1.0, -1.0), &pts),
            Point2::new(0.0, 0.0)
        );
        assert_eq!(furthest_point_id(&Point2::new(0.9, 0.0), &pts), 3);
    }
}
