use crate::math::{Point, Real};

/// Computes the geometric center (centroid) of a set of points.
///
/// The center is calculated by averaging all the point coordinates. All points
/// are weighted equally, so this is the centroid of the vertices, not the area
/// centroid of a polygon (see [`crate::geometry::centroid`] for that).
///
/// # Panics
///
/// Panics if the input slice is empty.
///
/// # Example
///
/// ```
/// use scadgeom::utils::center;
/// use scadgeom::math::Point2;
///
/// let points = [
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
///
/// let c = center(&points);
/// assert!((c.x - 1.0).abs() < 1e-12);
/// assert!((c.y - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn center<const D: usize>(pts: &[Point<D>]) -> Point<D> {
    assert!(
        !pts.is_empty(),
        "Cannot compute the center of less than 1 point."
    );

    let denom: Real = 1.0 / (pts.len() as Real);

    let mut res = Point::origin();

    for pt in pts {
        res += pt.coords * denom;
    }

    res
}
