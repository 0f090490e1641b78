use super::{Bounds, Line};
use crate::error::check_eps;
use crate::math::{Point2, Real};
use crate::Error;

/// The intersection of the infinite lines through two 2D lines.
///
/// Returns the intersection point together with its parameter `t` along
/// `l1` and its parameter `u` along `l2`, or `None` if the lines are
/// parallel, i.e., if the sine of their angle is within `eps` of zero.
///
/// Boundedness is ignored: see [`line_intersection`] for rays and segments.
pub fn general_line_intersection(
    l1: &Line<2>,
    l2: &Line<2>,
    eps: Real,
) -> Option<(Point2<Real>, Real, Real)> {
    let d1 = l1.a - l1.b;
    let d2 = l2.a - l2.b;
    let denom = d1.perp(&d2);

    if denom.abs() <= eps * d1.norm() * d2.norm() || denom == 0.0 {
        return None;
    }

    let d12 = l1.a - l2.a;
    let t = d12.perp(&d2) / denom;
    let u = d12.perp(&d1) / denom;

    Some((l1.point_at(t), t, u))
}

/// The intersection point of two 2D lines, rays, or segments.
///
/// Returns `Ok(None)` if the lines are parallel, or if their intersection is
/// out of the bounds of one of them. The bounds are checked with the
/// tolerance `eps` on the line parameters.
///
/// # Errors
/// Fails if the two points of a line coincide or if `eps` is not a valid
/// tolerance.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::{line_intersection, Bounds, Line};
/// use scadgeom::math::{Point2, EPSILON};
///
/// let l1 = Line::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
/// let l2 = Line::new(Point2::new(0.0, 4.0), Point2::new(1.0, 3.0));
///
/// let pt = line_intersection(&l1, &l2, Bounds::LINE, Bounds::LINE, EPSILON).unwrap();
/// assert_eq!(pt, Some(Point2::new(2.0, 2.0)));
///
/// let pt = line_intersection(&l1, &l2, Bounds::SEGMENT, Bounds::LINE, EPSILON).unwrap();
/// assert_eq!(pt, None);
/// ```
pub fn line_intersection(
    l1: &Line<2>,
    l2: &Line<2>,
    bounds1: Bounds,
    bounds2: Bounds,
    eps: Real,
) -> Result<Option<Point2<Real>>, Error> {
    check_eps(eps)?;
    l1.check()?;
    l2.check()?;

    Ok(general_line_intersection(l1, l2, eps)
        .filter(|(_, t, u)| bounds1.contains(*t, eps) && bounds2.contains(*u, eps))
        .map(|(pt, _, _)| pt))
}

macro_rules! bounded_intersection(
    ($($name: ident, $kind1: literal, $bounds1: ident, $kind2: literal, $bounds2: ident);* $(;)*) => {$(
        #[doc = concat!("The intersection point of a ", $kind1, " and a ", $kind2, ".")]
        ///
        /// See [`line_intersection`] for details.
        #[inline]
        pub fn $name(l1: &Line<2>, l2: &Line<2>, eps: Real) -> Result<Option<Point2<Real>>, Error> {
            line_intersection(l1, l2, Bounds::$bounds1, Bounds::$bounds2, eps)
        }
    )*}
);

bounded_intersection!(
    line_line_intersection, "line", LINE, "line", LINE;
    line_ray_intersection, "line", LINE, "ray", RAY;
    line_segment_intersection, "line", LINE, "segment", SEGMENT;
    ray_line_intersection, "ray", RAY, "line", LINE;
    ray_ray_intersection, "ray", RAY, "ray", RAY;
    ray_segment_intersection, "ray", RAY, "segment", SEGMENT;
    segment_line_intersection, "segment", SEGMENT, "line", LINE;
    segment_ray_intersection, "segment", SEGMENT, "ray", RAY;
    segment_segment_intersection, "segment", SEGMENT, "segment", SEGMENT;
);
