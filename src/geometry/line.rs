use crate::error::check_eps;
use crate::math::{Point, Point2, Real, Vector, Vector2, EPSILON};
use crate::query;
use crate::utils;
use crate::Error;

/// A line, ray, or segment passing through two distinct points.
///
/// Whether the line extends past its points is not part of the line itself:
/// it is given by a separate [`Bounds`] to the operations that care about it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Line<const D: usize> {
    /// The first point of the line.
    pub a: Point<D>,
    /// The second point of the line.
    pub b: Point<D>,
}

impl<const D: usize> Line<D> {
    /// Creates a line through two points.
    #[inline]
    pub fn new(a: Point<D>, b: Point<D>) -> Self {
        Line { a, b }
    }

    /// The vector from `self.a` to `self.b`.
    #[inline]
    pub fn direction(&self) -> Vector<D> {
        self.b - self.a
    }

    /// The point at parameter `t`: `self.a` for `t = 0` and `self.b` for `t = 1`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<D> {
        self.a + self.direction() * t
    }

    /// The midpoint of `self.a` and `self.b`.
    #[inline]
    pub fn midpoint(&self) -> Point<D> {
        na::center(&self.a, &self.b)
    }

    /// The same line, running in the opposite direction.
    #[inline]
    pub fn reversed(&self) -> Self {
        Line::new(self.b, self.a)
    }

    /// Checks that the two points of this line are distinct, relative to
    /// their magnitude.
    pub fn check(&self) -> Result<(), Error> {
        let scale = self.a.coords.norm().max(self.b.coords.norm());

        if na::distance(&self.a, &self.b) <= EPSILON * scale {
            Err(Error::invalid_argument(
                "line",
                format!("the points {} and {} coincide", self.a, self.b),
            ))
        } else {
            Ok(())
        }
    }

    /// The parameter of the orthogonal projection of `pt` on the infinite line.
    #[inline]
    pub fn project_parameter(&self, pt: &Point<D>) -> Real {
        let dir = self.direction();
        (pt - self.a).dot(&dir) / dir.norm_squared()
    }
}

impl<const D: usize> From<[Point<D>; 2]> for Line<D> {
    fn from(pts: [Point<D>; 2]) -> Self {
        Line::new(pts[0], pts[1])
    }
}

/// Whether each end of a line is bounded.
///
/// The first flag bounds the line at its first point (parameters below `0`
/// are excluded), the second flag at its second point (parameters above `1`
/// are excluded).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bounds(pub [bool; 2]);

impl Bounds {
    /// An infinite line.
    pub const LINE: Self = Bounds([false, false]);
    /// A ray starting at the first point and passing through the second.
    pub const RAY: Self = Bounds([true, false]);
    /// A segment between the two points.
    pub const SEGMENT: Self = Bounds([true, true]);

    /// Tests if the line parameter `t` is within these bounds, up to `eps`.
    #[inline]
    pub fn contains(&self, t: Real, eps: Real) -> bool {
        (!self.0[0] || t >= -eps) && (!self.0[1] || t <= 1.0 + eps)
    }

    /// Clamps the line parameter `t` to these bounds.
    #[inline]
    pub fn clamp(&self, t: Real) -> Real {
        let t = if self.0[0] { t.max(0.0) } else { t };
        if self.0[1] {
            t.min(1.0)
        } else {
            t
        }
    }
}

impl From<bool> for Bounds {
    fn from(bounded: bool) -> Self {
        Bounds([bounded, bounded])
    }
}

/// The point of `line` (within `bounds`) closest to `pt`.
///
/// # Errors
/// Fails if the two points of `line` coincide.
pub fn line_closest_point<const D: usize>(
    line: &Line<D>,
    bounds: Bounds,
    pt: &Point<D>,
) -> Result<Point<D>, Error> {
    line.check()?;
    Ok(line.point_at(bounds.clamp(line.project_parameter(pt))))
}

/// The distance between `pt` and `line` (within `bounds`).
///
/// # Errors
/// Fails if the two points of `line` coincide.
pub fn point_line_distance<const D: usize>(
    pt: &Point<D>,
    line: &Line<D>,
    bounds: Bounds,
) -> Result<Real, Error> {
    Ok(na::distance(pt, &line_closest_point(line, bounds, pt)?))
}

/// The distance between `pt` and the segment `seg`.
///
/// # Errors
/// Fails if the two points of `seg` coincide.
pub fn point_segment_distance<const D: usize>(
    pt: &Point<D>,
    seg: &Line<D>,
) -> Result<Real, Error> {
    point_line_distance(pt, seg, Bounds::SEGMENT)
}

/// The distance between two segments.
///
/// # Errors
/// Fails if `eps` is not a valid tolerance or if the computation did not
/// converge.
pub fn segment_distance<const D: usize>(
    seg1: &Line<D>,
    seg2: &Line<D>,
    eps: Real,
) -> Result<Real, Error> {
    query::convex_distance(&[seg1.a, seg1.b], &[seg2.a, seg2.b], eps)
}

/// The closest points between two segments, the first one on `seg1` and the
/// second one on `seg2`.
///
/// # Errors
/// Fails if `eps` is not a valid tolerance or if the computation did not
/// converge.
pub fn segment_closest_points<const D: usize>(
    seg1: &Line<D>,
    seg2: &Line<D>,
    eps: Real,
) -> Result<(Point<D>, Point<D>), Error> {
    query::convex_closest_points(&[seg1.a, seg1.b], &[seg2.a, seg2.b], eps)
}

/// Tests if `pt` lies on `line` (within `bounds`), up to the distance `eps`.
///
/// # Errors
/// Fails if the two points of `line` coincide or if `eps` is not a valid
/// tolerance.
pub fn is_point_on_line<const D: usize>(
    pt: &Point<D>,
    line: &Line<D>,
    bounds: Bounds,
    eps: Real,
) -> Result<bool, Error> {
    check_eps(eps)?;
    line.check()?;

    let t = line.project_parameter(pt);
    let dist = na::distance(pt, &line.point_at(t));
    // The bound tolerance is a distance along the line, scaled to a parameter.
    let t_eps = eps / line.direction().norm();

    Ok(dist <= eps && bounds.contains(t, t_eps))
}

/// The unit normal of the 2D line from `p1` to `p2`, pointing to its left.
///
/// # Errors
/// Fails if the two points coincide.
pub fn line_normal(p1: &Point2<Real>, p2: &Point2<Real>) -> Result<Vector2<Real>, Error> {
    Line::new(*p1, *p2).check()?;
    let dir = p2 - p1;
    Ok(Vector2::new(-dir.y, dir.x).normalize())
}

/// The indices of three points of `points` that are not collinear, or
/// `Ok(None)` if all the points are collinear up to `eps`.
///
/// The first index is always 0, the second one is the point farthest from
/// it, and the third one is the point farthest from the line through the
/// first two. The collinearity tolerance is relative to the distance between
/// the first two points, so the result does not depend on the scale of the
/// input.
///
/// # Errors
/// Fails if `points` is empty or if `eps` is not a valid tolerance.
pub fn noncollinear_triple<const D: usize>(
    points: &[Point<D>],
    eps: Real,
) -> Result<Option<[usize; 3]>, Error> {
    check_eps(eps)?;

    if points.is_empty() {
        return Err(Error::invalid_argument("points", "the point set is empty"));
    }

    let pa = points[0];
    let ib = utils::furthest_point_id(&pa, points);
    let pb = points[ib];
    let len = na::distance(&pa, &pb);

    if len <= eps * pa.coords.norm().max(pb.coords.norm()) {
        return Ok(None);
    }

    let dir = (pb - pa) / len;
    let dist_to_line = |pt: &Point<D>| {
        let d = pt - pa;
        (d - dir * d.dot(&dir)).norm()
    };

    let (ic, max_dist) = points
        .iter()
        .map(dist_to_line)
        .enumerate()
        .fold((0, 0.0), |best, curr| if curr.1 > best.1 { curr } else { best });

    if max_dist < eps * len {
        Ok(None)
    } else {
        Ok(Some([0, ib, ic]))
    }
}

/// Tests if all `points` lie on a common line.
///
/// Sets of one or two points are always collinear. The tolerance is relative
/// to the extent of the point set, see [`noncollinear_triple`].
///
/// # Errors
/// Fails if `points` is empty or if `eps` is not a valid tolerance.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::is_collinear;
/// use scadgeom::math::{Point2, EPSILON};
///
/// let pts = [[0.0, 0.0], [1.0, 1.0], [3.0, 3.0]].map(Point2::from);
/// assert!(is_collinear(&pts, EPSILON).unwrap());
///
/// let tiny = pts.map(|p| p * 1.0e-6);
/// assert!(is_collinear(&tiny, EPSILON).unwrap());
///
/// let bent = [[0.0, 0.0], [1.0, 1.0], [3.0, 3.1]].map(Point2::from);
/// assert!(!is_collinear(&bent, EPSILON).unwrap());
/// ```
pub fn is_collinear<const D: usize>(points: &[Point<D>], eps: Real) -> Result<bool, Error> {
    Ok(noncollinear_triple(points, eps)?.is_none())
}

/// Tests if the three points lie on a common line, see [`is_collinear`].
pub fn is_collinear3<const D: usize>(
    a: &Point<D>,
    b: &Point<D>,
    c: &Point<D>,
    eps: Real,
) -> Result<bool, Error> {
    is_collinear(&[*a, *b, *c], eps)
}

/// The line through the two points of `points` that are farthest apart
/// (measured from the first point).
///
/// Returns `Ok(None)` if all the points coincide, or if they are not
/// collinear. The collinearity check is skipped if `fast` is `true`.
///
/// # Errors
/// Fails if `points` has less than two points or if `eps` is not a valid
/// tolerance.
pub fn line_from_points<const D: usize>(
    points: &[Point<D>],
    fast: bool,
    eps: Real,
) -> Result<Option<Line<D>>, Error> {
    check_eps(eps)?;

    if points.len() < 2 {
        return Err(Error::invalid_argument(
            "points",
            format!("at least 2 points are required, got {}", points.len()),
        ));
    }

    let ib = utils::furthest_point_id(&points[0], points);
    let line = Line::new(points[0], points[ib]);

    if line.check().is_err() || (!fast && !is_collinear(points, eps)?) {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
