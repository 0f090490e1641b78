use crate::error::check_eps;
use crate::math::{Point2, Real, Vector2};
use crate::Error;

/// The position of a point relative to a polygon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PointContainment {
    /// The point is strictly inside the polygon.
    Inside,
    /// The point is on an edge of the polygon.
    OnBoundary,
    /// The point is strictly outside the polygon.
    Outside,
}

impl PointContainment {
    /// `1` inside the polygon, `0` on its boundary, `-1` outside.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            PointContainment::Inside => 1,
            PointContainment::OnBoundary => 0,
            PointContainment::Outside => -1,
        }
    }

    /// Is the point inside the polygon or on its boundary?
    #[inline]
    pub fn is_inside_or_on_boundary(self) -> bool {
        self != PointContainment::Outside
    }
}

/// The distance between `pt` and the segment `[a, b]`, with `a != b`.
fn segment_distance_squared(pt: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>) -> Real {
    let ab = b - a;
    let t = ((pt - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
    na::distance_squared(pt, &(a + ab * t))
}

/// Classifies a point against an arbitrary closed 2D polygon.
///
/// A point within the distance `eps` of an edge is on the boundary of the
/// polygon. Edges shorter than `eps` are ignored for that test. Other points
/// are classified with the nonzero winding rule if `nonzero` is `true`, or
/// with the even-odd rule otherwise. Both rules agree on simple polygons and
/// differ on self-intersecting ones.
///
/// The polygon is closed: its last vertex is implicitly connected to its
/// first one. Its orientation does not matter.
///
/// # Errors
/// Fails if the polygon has less than three vertices or if `eps` is not a
/// valid tolerance.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::{point_in_polygon, PointContainment};
/// use scadgeom::math::{Point2, EPSILON};
///
/// let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(Point2::from);
/// let classify = |x, y| point_in_polygon(&Point2::new(x, y), &square, true, EPSILON).unwrap();
///
/// assert_eq!(classify(0.5, 0.5), PointContainment::Inside);
/// assert_eq!(classify(0.5, 0.0), PointContainment::OnBoundary);
/// assert_eq!(classify(2.0, 2.0).sign(), -1);
/// ```
pub fn point_in_polygon(
    pt: &Point2<Real>,
    poly: &[Point2<Real>],
    nonzero: bool,
    eps: Real,
) -> Result<PointContainment, Error> {
    check_eps(eps)?;

    if poly.len() < 3 {
        return Err(Error::invalid_argument(
            "poly",
            format!("a polygon needs at least 3 vertices, got {}", poly.len()),
        ));
    }

    // Boundary points must be caught before counting crossings, which is
    // unreliable on the edges themselves.
    let eps2 = eps * eps;
    for (i, a) in poly.iter().enumerate() {
        let b = &poly[(i + 1) % poly.len()];

        if na::distance_squared(a, b) > eps2 && segment_distance_squared(pt, a, b) <= eps2 {
            return Ok(PointContainment::OnBoundary);
        }
    }

    let inside = if nonzero {
        winding_number(pt, poly) != 0
    } else {
        crossing_number(pt, poly) % 2 == 1
    };

    if inside {
        Ok(PointContainment::Inside)
    } else {
        Ok(PointContainment::Outside)
    }
}

/// The contribution of the edge `[a, b]` to the winding number of the origin,
/// with `a` and `b` relative to the classified point.
///
/// Upward edges crossing the horizontal ray toward +x count `1`, downward ones
/// `-1`. Only signs are compared: points near the edge were already reported
/// as boundary points.
fn edge_winding(da: &Vector2<Real>, db: &Vector2<Real>) -> i32 {
    let perp = da.perp(db);

    match (da.y <= 0.0, db.y > 0.0) {
        (true, true) if perp > 0.0 => 1,
        (false, false) if perp < 0.0 => -1,
        _ => 0,
    }
}

fn winding_number(pt: &Point2<Real>, poly: &[Point2<Real>]) -> i32 {
    poly.iter()
        .enumerate()
        .map(|(i, a)| edge_winding(&(a - pt), &(poly[(i + 1) % poly.len()] - pt)))
        .sum()
}

fn crossing_number(pt: &Point2<Real>, poly: &[Point2<Real>]) -> usize {
    poly.iter()
        .enumerate()
        .filter(|(i, a)| edge_winding(&(*a - pt), &(poly[(i + 1) % poly.len()] - pt)) != 0)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    fn unit_square() -> [Point2<Real>; 4] {
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(Point2::from)
    }

    #[test]
    fn both_rules_agree_on_simple_polygons() {
        let sq = unit_square();

        for nonzero in [true, false] {
            let classify = |x, y| point_in_polygon(&Point2::new(x, y), &sq, nonzero, EPSILON);
            assert_eq!(classify(0.5, 0.0).unwrap().sign(), 0);
            assert_eq!(classify(0.5, 0.5).unwrap().sign(), 1);
            assert_eq!(classify(2.0, 2.0).unwrap().sign(), -1);
            assert_eq!(classify(1.0, 1.0).unwrap(), PointContainment::OnBoundary);
            assert_eq!(classify(1.5, 0.5).unwrap(), PointContainment::Outside);
            assert_eq!(classify(-0.5, 0.5).unwrap(), PointContainment::Outside);
        }
    }

    #[test]
    fn orientation_does_not_matter() {
        let mut sq = unit_square();
        sq.reverse();

        for nonzero in [true, false] {
            let res = point_in_polygon(&Point2::new(0.25, 0.75), &sq, nonzero, EPSILON);
            assert_eq!(res.unwrap(), PointContainment::Inside);
        }
    }

    #[test]
    fn self_intersecting() {
        // The inner square is wound twice.
        let poly = [
            [-1.0, -1.0],
            [0.0, -1.0],
            [0.0, 1.0],
            [-2.0, 1.0],
            [-2.0, -2.0],
            [1.0, -2.0],
            [1.0, 2.0],
            [-1.0, 2.0],
        ]
        .map(Point2::from);

        let pt = Point2::new(-0.5, -0.5);
        assert_eq!(
            point_in_polygon(&pt, &poly, false, EPSILON).unwrap(),
            PointContainment::Outside
        );
        assert_eq!(
            point_in_polygon(&pt, &poly, true, EPSILON).unwrap(),
            PointContainment::Inside
        );
        assert_eq!(
            point_in_polygon(&Point2::new(0.5, -0.5), &poly, false, EPSILON).unwrap(),
            PointContainment::Inside
        );
    }

    #[test]
    fn vertex_at_ray_height() {
        // A vertex at the same height as the point must not be counted twice.
        let diamond = [[0.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]].map(Point2::from);

        for nonzero in [true, false] {
            let classify = |x| point_in_polygon(&Point2::new(x, 0.0), &diamond, nonzero, EPSILON);
            assert_eq!(classify(0.0).unwrap(), PointContainment::Inside);
            assert_eq!(classify(-2.0).unwrap(), PointContainment::Outside);
            assert_eq!(classify(2.0).unwrap(), PointContainment::Outside);
        }
    }

    #[test]
    fn tiny_polygons() {
        for scale in [1.0e-8, 1.0e-5, 1.0e-3] {
            let sq = unit_square().map(|p| p * scale);
            let center = Point2::new(0.5, 0.5) * scale;

            for nonzero in [true, false] {
                assert_eq!(
                    point_in_polygon(&center, &sq, nonzero, EPSILON).unwrap(),
                    PointContainment::Inside
                );
            }
        }
    }

    #[test]
    fn degenerate_edges_are_skipped() {
        let poly = [[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(Point2::from);
        let res = point_in_polygon(&Point2::new(0.5, 0.5), &poly, true, EPSILON).unwrap();
        assert_eq!(res, PointContainment::Inside);
        assert!(point_in_polygon(&Point2::origin(), &poly[..2], true, EPSILON).is_err());
    }
}
