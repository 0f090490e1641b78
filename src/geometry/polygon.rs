use super::{noncollinear_triple, plane_from_polygon, PlaneFrame};
use crate::error::check_eps;
use crate::math::{Point, Point2, Point3, Real, Vector3, EPSILON};
use crate::utils;
use crate::Error;
use na::Rotation2;
use ordered_float::OrderedFloat;

fn check_polygon<const D: usize>(poly: &[Point<D>], arg: &'static str) -> Result<(), Error> {
    if poly.len() < 3 {
        Err(Error::invalid_argument(
            arg,
            format!("a polygon needs at least 3 vertices, got {}", poly.len()),
        ))
    } else {
        Ok(())
    }
}

/// Twice the signed area of the projection of `poly` on its first two coordinates.
fn doubled_signed_area_xy<const D: usize>(poly: &[Point<D>]) -> Real {
    let mut area = 0.0;

    for (i, a) in poly.iter().enumerate() {
        let b = &poly[(i + 1) % poly.len()];
        area += a[0] * b[1] - a[1] * b[0];
    }

    area
}

/// The area of a 2D polygon.
///
/// If `signed` is `true`, the area is positive for counterclockwise polygons
/// and negative for clockwise ones. Polygons with less than three vertices
/// have no area.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::polygon_area;
/// use scadgeom::math::Point2;
///
/// let square = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]].map(Point2::from);
/// assert_eq!(polygon_area(&square, true), 4.0);
///
/// let mut clockwise = square;
/// clockwise.reverse();
/// assert_eq!(polygon_area(&clockwise, true), -4.0);
/// assert_eq!(polygon_area(&clockwise, false), 4.0);
/// ```
pub fn polygon_area(poly: &[Point2<Real>], signed: bool) -> Real {
    if poly.len() < 3 {
        return 0.0;
    }

    let area = doubled_signed_area_xy(poly) / 2.0;

    if signed {
        area
    } else {
        area.abs()
    }
}

/// The area of a planar 3D polygon.
///
/// Returns `Ok(None)` if the polygon is not planar, and zero for collinear
/// vertices. The planarity tolerance is `eps` times the extent of the polygon.
///
/// # Errors
/// Fails if `eps` is not a valid tolerance.
pub fn polygon_area3d(poly: &[Point3<Real>], eps: Real) -> Result<Option<Real>, Error> {
    check_eps(eps)?;

    if poly.len() < 3 || noncollinear_triple(poly, eps)?.is_none() {
        return Ok(Some(0.0));
    }

    if plane_from_polygon(poly, false, eps)?.is_none() {
        return Ok(None);
    }

    Ok(Some(normal_sum(poly).norm() / 2.0))
}

/// The area centroid of a 2D polygon.
///
/// Returns `Ok(None)` if the area of the polygon is zero, up to `eps` times
/// the square of its extent.
///
/// # Errors
/// Fails if the polygon has less than three vertices or if `eps` is not a
/// valid tolerance.
pub fn centroid(poly: &[Point2<Real>], eps: Real) -> Result<Option<Point2<Real>>, Error> {
    check_eps(eps)?;
    check_polygon(poly, "poly")?;

    let origin = poly[0];
    let mut area = 0.0;
    let mut weighted = Point2::origin();

    for i in 1..poly.len() - 1 {
        let a = poly[i] - origin;
        let b = poly[i + 1] - origin;
        let tri_area = a.perp(&b);
        area += tri_area;
        weighted += (a + b) * tri_area;
    }

    let extent = poly
        .iter()
        .map(|pt| na::distance_squared(pt, &origin))
        .fold(0.0, Real::max);

    if area.abs() <= eps * extent {
        log::debug!("The centroid of a polygon with zero area is undefined.");
        return Ok(None);
    }

    Ok(Some(origin + weighted.coords / (3.0 * area)))
}

/// The area centroid of a planar 3D polygon.
///
/// Returns `Ok(None)` if the vertices are collinear or not coplanar.
///
/// # Errors
/// Fails if the polygon has less than three vertices or if `eps` is not a
/// valid tolerance.
pub fn centroid3d(poly: &[Point3<Real>], eps: Real) -> Result<Option<Point3<Real>>, Error> {
    let Some(plane) = plane_from_polygon(poly, false, eps)? else {
        return Ok(None);
    };

    let frame = PlaneFrame::from_plane(&plane)?;
    let flat: Vec<_> = poly.iter().map(|pt| frame.project(pt)).collect();

    Ok(centroid(&flat, eps)?.map(|c| frame.lift(&c)))
}

fn normal_sum(poly: &[Point3<Real>]) -> Vector3<Real> {
    let origin = poly[0];
    let mut sum = Vector3::zeros();

    for i in 1..poly.len() - 1 {
        sum += (poly[i] - origin).cross(&(poly[i + 1] - poly[i]));
    }

    sum
}

/// The unit normal of a 3D polygon.
///
/// The polygon turns counterclockwise around its normal. Returns `Ok(None)`
/// if the polygon has no area.
///
/// # Errors
/// Fails if the polygon has less than three vertices.
pub fn polygon_normal(poly: &[Point3<Real>]) -> Result<Option<Vector3<Real>>, Error> {
    check_polygon(poly, "poly")?;

    let sum = normal_sum(poly);
    let extent = poly
        .iter()
        .map(|pt| na::distance_squared(pt, &poly[0]))
        .fold(0.0, Real::max);

    if sum.norm() <= EPSILON * extent {
        Ok(None)
    } else {
        Ok(Some(sum.normalize()))
    }
}

/// Tests if a 2D polygon is clockwise, i.e., has a negative signed area.
///
/// # Errors
/// Fails if the polygon has less than three vertices.
pub fn is_polygon_clockwise(poly: &[Point2<Real>]) -> Result<bool, Error> {
    check_polygon(poly, "poly")?;
    Ok(polygon_area(poly, true) < 0.0)
}

/// The vertices of `poly`, reversed if needed to make the polygon clockwise.
///
/// # Errors
/// Fails if the polygon has less than three vertices.
pub fn clockwise_polygon(poly: &[Point2<Real>]) -> Result<Vec<Point2<Real>>, Error> {
    if is_polygon_clockwise(poly)? {
        Ok(poly.to_vec())
    } else {
        Ok(reverse_polygon(poly))
    }
}

/// The vertices of `poly`, reversed if needed to make the polygon
/// counterclockwise.
///
/// # Errors
/// Fails if the polygon has less than three vertices.
pub fn ccw_polygon(poly: &[Point2<Real>]) -> Result<Vec<Point2<Real>>, Error> {
    if is_polygon_clockwise(poly)? {
        Ok(reverse_polygon(poly))
    } else {
        Ok(poly.to_vec())
    }
}

/// The vertices of `poly` in reverse order, still starting with the first
/// vertex.
pub fn reverse_polygon<const D: usize>(poly: &[Point<D>]) -> Vec<Point<D>> {
    poly.iter()
        .take(1)
        .chain(poly.iter().skip(1).rev())
        .copied()
        .collect()
}

/// Tests if a 2D polygon is convex.
///
/// Collinear consecutive vertices are allowed. A turn is ignored if the
/// cross product of its edges is within `eps` times the squared extent of the
/// polygon.
///
/// # Errors
/// Fails if the polygon has less than three vertices, if all its vertices
/// are collinear, or if `eps` is not a valid tolerance.
pub fn is_polygon_convex(poly: &[Point2<Real>], eps: Real) -> Result<bool, Error> {
    check_eps(eps)?;
    check_polygon(poly, "poly")?;

    let n = poly.len();
    let turns: Vec<_> = (0..n)
        .map(|i| {
            let e1 = poly[(i + 1) % n] - poly[i];
            let e2 = poly[(i + 2) % n] - poly[(i + 1) % n];
            e1.perp(&e2)
        })
        .collect();

    let extent = poly
        .iter()
        .map(|pt| na::distance(pt, &poly[0]))
        .fold(0.0, Real::max);
    let tol = eps * extent * extent;

    if turns.iter().all(|t| t.abs() <= tol) {
        return Err(Error::invalid_argument(
            "poly",
            "the polygon is degenerate: all its vertices are collinear",
        ));
    }

    let min = turns.iter().copied().fold(Real::INFINITY, Real::min);
    let max = turns.iter().copied().fold(Real::NEG_INFINITY, Real::max);

    Ok(min >= -tol || max <= tol)
}

/// The sum of the squared distances between the vertices of `reference` and
/// the vertices of `poly` shifted by `shift`.
fn shifted_sq_distance<const D: usize>(
    reference: &[Point<D>],
    poly: &[Point<D>],
    shift: usize,
) -> Real {
    let n = poly.len();
    reference
        .iter()
        .enumerate()
        .map(|(i, pt)| na::distance_squared(pt, &poly[(i + shift) % n]))
        .sum()
}

fn rotated<const D: usize>(poly: &[Point<D>], shift: usize) -> Vec<Point<D>> {
    let mut res = poly.to_vec();
    res.rotate_left(shift);
    res
}

/// Cyclically shifts the vertices of `poly` to best match `reference`.
///
/// The vertices are shifted so the sum of the squared distances between the
/// vertices of both polygons is minimal. 2D polygons are also reversed first
/// if their orientation does not match the orientation of `reference`.
///
/// # Errors
/// Fails if the polygons are empty or have different vertex counts.
pub fn reindex_polygon<const D: usize>(
    reference: &[Point<D>],
    poly: &[Point<D>],
) -> Result<Vec<Point<D>>, Error> {
    Ok(best_shift(reference, poly)?.0)
}

fn best_shift<const D: usize>(
    reference: &[Point<D>],
    poly: &[Point<D>],
) -> Result<(Vec<Point<D>>, Real), Error> {
    if reference.is_empty() {
        return Err(Error::invalid_argument("reference", "the polygon is empty"));
    }

    if reference.len() != poly.len() {
        return Err(Error::invalid_argument(
            "poly",
            format!(
                "the polygon has {} vertices but the reference has {}",
                poly.len(),
                reference.len()
            ),
        ));
    }

    let reversed;
    let poly = if D == 2
        && (doubled_signed_area_xy(reference) < 0.0) != (doubled_signed_area_xy(poly) < 0.0)
    {
        reversed = reverse_polygon(poly);
        &reversed[..]
    } else {
        poly
    };

    let (shift, dist) = (0..poly.len())
        .map(|shift| (shift, shifted_sq_distance(reference, poly, shift)))
        .min_by_key(|(_, dist)| OrderedFloat(*dist))
        .unwrap_or((0, 0.0));

    Ok((rotated(poly, shift), dist))
}

/// Rotates and reindexes `poly` to best match `reference`.
///
/// Each of the given `angles` (in radians) is tried as a rotation of `poly`
/// around `center`, or around the mean of its vertices if `center` is
/// `None`. The rotated polygon is reindexed to match `reference` (see
/// [`reindex_polygon`]), and the candidate closest to `reference` is
/// returned.
///
/// # Errors
/// Fails if `angles` is empty, or if the polygons are empty or have
/// different vertex counts.
pub fn align_polygon(
    reference: &[Point2<Real>],
    poly: &[Point2<Real>],
    angles: &[Real],
    center: Option<Point2<Real>>,
) -> Result<Vec<Point2<Real>>, Error> {
    if angles.is_empty() {
        return Err(Error::invalid_argument("angles", "no angle to try"));
    }

    if poly.is_empty() {
        return Err(Error::invalid_argument("poly", "the polygon is empty"));
    }

    let center = center.unwrap_or_else(|| utils::center(poly));
    let mut best: Option<(Vec<Point2<Real>>, Real)> = None;

    for angle in angles {
        let rot = Rotation2::new(*angle);
        let candidate: Vec<_> = poly.iter().map(|pt| center + rot * (pt - center)).collect();
        let (candidate, dist) = best_shift(reference, &candidate)?;

        if best.as_ref().map_or(true, |(_, best_dist)| dist < *best_dist) {
            best = Some((candidate, dist));
        }
    }

    Ok(best.map(|(poly, _)| poly).unwrap_or_default())
}

/// Tests if two polygons have the same vertices, up to `eps` on each
/// coordinate, in the same cyclic order.
///
/// # Errors
/// Fails if `eps` is not a valid tolerance.
pub fn are_polygons_equal<const D: usize>(
    poly1: &[Point<D>],
    poly2: &[Point<D>],
    eps: Real,
) -> Result<bool, Error> {
    check_eps(eps)?;

    if poly1.len() != poly2.len() {
        return Ok(false);
    }

    if poly1.is_empty() {
        return Ok(true);
    }

    let n = poly1.len();
    Ok((0..n).any(|shift| {
        poly1
            .iter()
            .enumerate()
            .all(|(i, pt)| (pt - poly2[(i + shift) % n]).amax() <= eps)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2<Real>> {
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .map(Point2::from)
            .to_vec()
    }

    #[test]
    fn orientation() {
        let sq = square();
        assert!(!is_polygon_clockwise(&sq).unwrap());
        let cw = clockwise_polygon(&sq).unwrap();
        assert_eq!(cw[0], sq[0]);
        assert!(is_polygon_clockwise(&cw).unwrap());
        assert_eq!(ccw_polygon(&cw).unwrap(), sq);
        assert!(is_polygon_clockwise(&sq[..2]).is_err());
    }

    #[test]
    fn area_and_centroid() {
        let tri = [[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]].map(Point2::from);
        assert_eq!(polygon_area(&tri, true), 4.5);
        assert_relative_eq!(
            centroid(&tri, EPSILON).unwrap().unwrap(),
            Point2::new(1.0, 1.0),
            epsilon = 1.0e-12
        );

        let flat = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]].map(Point2::from);
        assert_eq!(centroid(&flat, EPSILON).unwrap(), None);
    }

    #[test]
    fn area_of_3d_polygon() {
        let tilted: Vec<_> = square()
            .iter()
            .map(|p| Point3::new(p.x, p.y * 0.6, p.y * 0.8))
            .collect();
        assert_relative_eq!(
            polygon_area3d(&tilted, EPSILON).unwrap().unwrap(),
            1.0,
            epsilon = 1.0e-12
        );
        assert_relative_eq!(
            polygon_normal(&tilted).unwrap().unwrap(),
            Vector3::new(0.0, -0.8, 0.6),
            epsilon = 1.0e-12
        );
        assert_relative_eq!(
            centroid3d(&tilted, EPSILON).unwrap().unwrap(),
            Point3::new(0.5, 0.3, 0.4),
            epsilon = 1.0e-12
        );

        let mut warped = tilted.clone();
        warped[2].z += 0.5;
        assert_eq!(polygon_area3d(&warped, EPSILON).unwrap(), None);
    }

    #[test]
    fn convexity() {
        assert!(is_polygon_convex(&square(), EPSILON).unwrap());

        let dart = [[0.0, 0.0], [2.0, 1.0], [0.0, 2.0], [1.0, 1.0]].map(Point2::from);
        assert!(!is_polygon_convex(&dart, EPSILON).unwrap());

        // A collinear vertex does not break convexity.
        let pentagon = [[0.0, 0.0], [0.5, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
            .map(Point2::from);
        assert!(is_polygon_convex(&pentagon, EPSILON).unwrap());

        let line = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]].map(Point2::from);
        assert!(is_polygon_convex(&line, EPSILON).is_err());
    }

    #[test]
    fn reindexing() {
        let sq = square();
        let shifted = rotated(&sq, 2);
        assert_eq!(reindex_polygon(&sq, &shifted).unwrap(), sq);

        let reversed: Vec<_> = sq.iter().rev().copied().collect();
        assert_eq!(reindex_polygon(&sq, &reversed).unwrap(), sq);

        assert!(reindex_polygon(&sq, &sq[..3]).is_err());
    }

    #[test]
    fn alignment() {
        let sq = square();
        let rot = Rotation2::new(0.3);
        let c = Point2::new(0.5, 0.5);
        let turned: Vec<_> = rotated(&sq, 1).iter().map(|p| c + rot * (p - c)).collect();

        let angles: Vec<_> = (-10..=10).map(|i| i as Real * 0.1).collect();
        let aligned = align_polygon(&sq, &turned, &angles, None).unwrap();
        assert!(are_polygons_equal(&aligned, &sq, 1.0e-9).unwrap());
        assert_relative_eq!(aligned[0], sq[0], epsilon = 1.0e-9);
    }

    #[test]
    fn equality_up_to_shift() {
        let sq = square();
        assert!(are_polygons_equal(&sq, &rotated(&sq, 3), EPSILON).unwrap());
        assert!(!are_polygons_equal(&sq, &reverse_polygon(&sq), EPSILON).unwrap());
        assert!(!are_polygons_equal(&sq, &sq[..3], EPSILON).unwrap());
        assert_eq!(reverse_polygon(&sq)[0], sq[0]);
    }
}
