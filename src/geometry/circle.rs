use super::{plane3pt, Bounds, Line, PlaneFrame};
use crate::error::check_eps;
use crate::math::{Point2, Point3, Real, Vector2, Vector3, EPSILON};
use crate::Error;

fn check_radius(r: Real, arg: &'static str) -> Result<(), Error> {
    if r.is_finite() && r >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            arg,
            format!("the radius must be a finite non-negative number, got {}", r),
        ))
    }
}

/// The circle through three 2D points, as its center and radius.
///
/// Returns `None` if the points are collinear.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::circle_3points;
/// use scadgeom::math::Point2;
///
/// let (center, r) = circle_3points(
///     &Point2::new(2.0, 0.0),
///     &Point2::new(0.0, 2.0),
///     &Point2::new(-2.0, 0.0),
/// )
/// .unwrap();
/// assert_eq!(center, Point2::origin());
/// assert_eq!(r, 2.0);
/// ```
pub fn circle_3points(
    p1: &Point2<Real>,
    p2: &Point2<Real>,
    p3: &Point2<Real>,
) -> Option<(Point2<Real>, Real)> {
    let b = p2 - p1;
    let c = p3 - p1;
    let d = 2.0 * b.perp(&c);
    let scale = b
        .norm_squared()
        .max(c.norm_squared())
        .max((p3 - p2).norm_squared());

    if d.abs() <= EPSILON * scale {
        return None;
    }

    let (b2, c2) = (b.norm_squared(), c.norm_squared());
    let offset = Vector2::new(c.y * b2 - b.y * c2, b.x * c2 - c.x * b2) / d;

    Some((p1 + offset, offset.norm()))
}

/// The circle through three 3D points, as its center, radius, and the unit
/// normal of its plane.
///
/// The normal follows the right-hand rule, see [`plane3pt`]. Returns `None`
/// if the points are collinear.
pub fn circle_3points3d(
    p1: &Point3<Real>,
    p2: &Point3<Real>,
    p3: &Point3<Real>,
) -> Option<(Point3<Real>, Real, Vector3<Real>)> {
    let plane = plane3pt(p1, p2, p3)?;
    let frame = PlaneFrame::new(*p1, &plane.normal).ok()?;
    let (center, r) = circle_3points(
        &frame.project(p1),
        &frame.project(p2),
        &frame.project(p3),
    )?;

    Some((frame.lift(&center), r, plane.normal))
}

/// The intersection points of a circle and `line` (within `bounds`).
///
/// A line closer than `eps` to being tangent to the circle meets it at a
/// single point. The points are ordered along the line.
///
/// # Errors
/// Fails if the radius is negative or non-finite, if the two points of the
/// line coincide, or if `eps` is not a valid tolerance.
pub fn circle_line_intersection(
    center: &Point2<Real>,
    r: Real,
    line: &Line<2>,
    bounds: Bounds,
    eps: Real,
) -> Result<Vec<Point2<Real>>, Error> {
    check_eps(eps)?;
    check_radius(r, "r")?;
    line.check()?;

    let t0 = line.project_parameter(center);
    let closest = line.point_at(t0);
    let d = na::distance(center, &closest);
    let dir_len = line.direction().norm();
    let t_eps = eps / dir_len;

    let params = if (d - r).abs() <= eps {
        vec![t0]
    } else if d > r {
        vec![]
    } else {
        let half = (r * r - d * d).sqrt() / dir_len;
        vec![t0 - half, t0 + half]
    };

    Ok(params
        .into_iter()
        .filter(|t| bounds.contains(*t, t_eps))
        .map(|t| line.point_at(t))
        .collect())
}

/// The intersection points of two circles.
///
/// Circles within `eps` of being tangent meet at a single point. Concentric
/// circles, even identical ones, have no intersection point. Two
/// intersection points are ordered counterclockwise around the first circle,
/// starting from the one on the right of the line from `c1` to `c2`.
///
/// # Errors
/// Fails if a radius is negative or non-finite, or if `eps` is not a valid
/// tolerance.
pub fn circle_circle_intersection(
    c1: &Point2<Real>,
    r1: Real,
    c2: &Point2<Real>,
    r2: Real,
    eps: Real,
) -> Result<Vec<Point2<Real>>, Error> {
    check_eps(eps)?;
    check_radius(r1, "r1")?;
    check_radius(r2, "r2")?;

    let dc = c2 - c1;
    let d = dc.norm();

    if d <= eps {
        log::debug!("Concentric circles have no isolated intersection point.");
        return Ok(vec![]);
    }

    if d > r1 + r2 + eps || d < (r1 - r2).abs() - eps {
        return Ok(vec![]);
    }

    let axis = dc / d;
    let a = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let base = c1 + axis * a;

    if (d - (r1 + r2)).abs() <= eps || (d - (r1 - r2).abs()).abs() <= eps {
        return Ok(vec![base]);
    }

    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let left = Vector2::new(-axis.y, axis.x);

    Ok(vec![base - left * h, base + left * h])
}
