use super::{noncollinear_triple, polygon_normal, Bounds, Line};
use crate::error::check_eps;
use crate::linalg::{eigenvalues_symmetric_3x3, eigenvector_symmetric_3x3, from_rows, linear_solve};
use crate::math::{Point2, Point3, Real, Vector3, EPSILON};
use crate::utils;
use crate::Error;

/// A plane, as the set of points `x` with `normal · x = offset`.
///
/// A plane is normalized when its normal has unit length: `offset` is then
/// the signed distance from the origin to the plane. Every plane returned by
/// this crate is normalized.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The normal of the plane, i.e., the coefficients `[A, B, C]` of `Ax + By + Cz = D`.
    pub normal: Vector3<Real>,
    /// The offset of the plane, i.e., the coefficient `D` of `Ax + By + Cz = D`.
    pub offset: Real,
}

impl Plane {
    /// Creates a plane from its normal and offset, without normalizing it.
    #[inline]
    pub fn new(normal: Vector3<Real>, offset: Real) -> Self {
        Plane { normal, offset }
    }

    /// Creates a plane from its coefficients `[A, B, C, D]`.
    #[inline]
    pub fn from_coefficients(coeffs: [Real; 4]) -> Self {
        Plane::new(Vector3::new(coeffs[0], coeffs[1], coeffs[2]), coeffs[3])
    }

    /// The coefficients `[A, B, C, D]` of this plane.
    #[inline]
    pub fn coefficients(&self) -> [Real; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.offset]
    }

    /// This plane scaled so that its normal has unit length.
    ///
    /// Normalizing a normalized plane leaves it unchanged.
    ///
    /// # Errors
    /// Fails if the normal of the plane is zero.
    pub fn normalize(&self) -> Result<Plane, Error> {
        let norm = self.normal.norm();

        if norm == 0.0 || !norm.is_finite() {
            return Err(Error::invalid_argument(
                "plane",
                format!("the plane normal {:?} is degenerate", self.normal.as_slice()),
            ));
        }

        // Already of unit length, up to rounding.
        if (norm - 1.0).abs() <= 2.0 * Real::EPSILON {
            Ok(*self)
        } else {
            Ok(Plane::new(self.normal / norm, self.offset / norm))
        }
    }

    /// Tests if the normal of this plane has unit length, up to `eps`.
    #[inline]
    pub fn is_normalized(&self, eps: Real) -> bool {
        (self.normal.norm() - 1.0).abs() <= eps
    }

    /// The same plane with the opposite orientation.
    #[inline]
    pub fn flipped(&self) -> Plane {
        Plane::new(-self.normal, -self.offset)
    }

    /// The signed distance from a normalized plane to `pt`.
    #[inline]
    fn distance_normalized(&self, pt: &Point3<Real>) -> Real {
        self.normal.dot(&pt.coords) - self.offset
    }
}

/// The normalized plane through three points, or `None` if they are
/// collinear.
///
/// The normal follows the right-hand rule: the points turn counterclockwise
/// when seen from the side the normal points to.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::plane3pt;
/// use scadgeom::math::{Point3, Vector3};
///
/// let plane = plane3pt(
///     &Point3::new(0.0, 0.0, 2.0),
///     &Point3::new(1.0, 0.0, 2.0),
///     &Point3::new(0.0, 1.0, 2.0),
/// )
/// .unwrap();
/// assert_eq!(plane.normal, Vector3::z());
/// assert_eq!(plane.offset, 2.0);
/// ```
pub fn plane3pt(p1: &Point3<Real>, p2: &Point3<Real>, p3: &Point3<Real>) -> Option<Plane> {
    let crx = (p2 - p1).cross(&(p3 - p1));
    let nrm = crx.norm();
    let scale = (p2 - p1)
        .norm_squared()
        .max((p3 - p1).norm_squared())
        .max((p3 - p2).norm_squared());

    if nrm <= EPSILON * scale {
        return None;
    }

    let normal = crx / nrm;
    Some(Plane::new(normal, normal.dot(&p1.coords)))
}

/// The normalized plane through the three points of `points` at the given
/// indices, or `Ok(None)` if they are collinear.
///
/// # Errors
/// Fails if an index is out of bounds.
pub fn plane3pt_indexed(
    points: &[Point3<Real>],
    i1: usize,
    i2: usize,
    i3: usize,
) -> Result<Option<Plane>, Error> {
    if let Some(i) = [i1, i2, i3].into_iter().find(|i| *i >= points.len()) {
        return Err(Error::invalid_argument(
            "i",
            format!("index {} out of bounds for {} points", i, points.len()),
        ));
    }

    Ok(plane3pt(&points[i1], &points[i2], &points[i3]))
}

/// The normalized plane through `point` with the given normal.
///
/// # Errors
/// Fails if `normal` is zero.
pub fn plane_from_normal(normal: &Vector3<Real>, point: &Point3<Real>) -> Result<Plane, Error> {
    Plane::new(*normal, normal.dot(&point.coords)).normalize()
}

/// The best-fitting plane of a set of at least three points.
///
/// Three points define their plane exactly, see [`plane3pt`]. For more
/// points, the plane goes through their center and its normal is the
/// eigenvector of the smallest eigenvalue of their covariance matrix.
///
/// Unless `fast` is `true`, the fit is rejected if a point is farther from
/// the plane than `eps * sqrt(λ₀)`, where `λ₀` is the largest eigenvalue of
/// the covariance matrix. This is `eps` times the standard deviation of the
/// points along their principal axis. The square root keeps the tolerance in
/// units of length.
///
/// Returns `Ok(None)` if the points are collinear, or if the fit is rejected.
///
/// # Errors
/// Fails if there are less than three points or if `eps` is not a valid
/// tolerance.
pub fn plane_from_points(
    points: &[Point3<Real>],
    fast: bool,
    eps: Real,
) -> Result<Option<Plane>, Error> {
    check_eps(eps)?;

    if points.len() < 3 {
        return Err(Error::invalid_argument(
            "points",
            format!("at least 3 points are required, got {}", points.len()),
        ));
    }

    if points.len() == 3 {
        return Ok(plane3pt(&points[0], &points[1], &points[2]));
    }

    if noncollinear_triple(points, eps)?.is_none() {
        log::debug!("Cannot fit a plane through collinear points.");
        return Ok(None);
    }

    let (center, cov) = utils::center_cov(points);
    let evals = eigenvalues_symmetric_3x3(&cov);
    let normal = eigenvector_symmetric_3x3(&cov, &evals, 2)?;
    let plane = Plane::new(normal, normal.dot(&center.coords));

    if !fast {
        let max_dist = greatest_distance(points, &plane);
        let tolerance = eps * evals[0].max(0.0).sqrt();

        if max_dist > tolerance {
            log::debug!(
                "Points are not coplanar: distance {} to the fitted plane exceeds {}.",
                max_dist,
                tolerance
            );
            return Ok(None);
        }
    }

    Ok(Some(plane))
}

/// The plane of a planar 3D polygon, oriented like the polygon (see
/// [`polygon_normal`]).
///
/// Returns `Ok(None)` if the vertices are collinear or, unless `fast` is
/// `true`, if they are not coplanar. The coplanarity tolerance is `eps`
/// times the extent of the polygon.
///
/// # Errors
/// Fails if the polygon has less than three vertices or if `eps` is not a
/// valid tolerance.
pub fn plane_from_polygon(
    poly: &[Point3<Real>],
    fast: bool,
    eps: Real,
) -> Result<Option<Plane>, Error> {
    check_eps(eps)?;

    if poly.len() < 3 {
        return Err(Error::invalid_argument(
            "poly",
            format!("a polygon needs at least 3 vertices, got {}", poly.len()),
        ));
    }

    let Some([i0, i1, i2]) = noncollinear_triple(poly, eps)? else {
        return Ok(None);
    };
    let Some(mut plane) = plane3pt(&poly[i0], &poly[i1], &poly[i2]) else {
        return Ok(None);
    };

    if let Some(normal) = polygon_normal(poly)? {
        if normal.dot(&plane.normal) < 0.0 {
            plane = plane.flipped();
        }
    }

    let spread = na::distance(&poly[i0], &poly[i1]);

    if !fast && greatest_distance(poly, &plane) >= eps * spread {
        return Ok(None);
    }

    Ok(Some(plane))
}

/// The unit normal of `plane`.
///
/// # Errors
/// Fails if the normal of the plane is zero.
pub fn plane_normal(plane: &Plane) -> Result<Vector3<Real>, Error> {
    Ok(plane.normalize()?.normal)
}

/// The signed distance from the origin to `plane`, along its normal.
///
/// # Errors
/// Fails if the normal of the plane is zero.
pub fn plane_offset(plane: &Plane) -> Result<Real, Error> {
    Ok(plane.normalize()?.offset)
}

/// The signed distance from `plane` to `pt`: positive on the side the
/// normal points to.
///
/// # Errors
/// Fails if the normal of the plane is zero.
pub fn point_plane_distance(plane: &Plane, pt: &Point3<Real>) -> Result<Real, Error> {
    Ok(plane.normalize()?.distance_normalized(pt))
}

/// Tests if `pt` is on the side of `plane` its normal points to, farther
/// than `eps` from the plane.
///
/// # Errors
/// Fails if the normal of the plane is zero.
pub fn is_point_above_plane(plane: &Plane, pt: &Point3<Real>, eps: Real) -> Result<bool, Error> {
    Ok(point_plane_distance(plane, pt)? > eps)
}

/// The orthogonal projections of `points` on `plane`.
///
/// # Errors
/// Fails if the normal of the plane is zero.
pub fn plane_closest_point(
    plane: &Plane,
    points: &[Point3<Real>],
) -> Result<Vec<Point3<Real>>, Error> {
    let plane = plane.normalize()?;
    Ok(points
        .iter()
        .map(|pt| pt - plane.normal * plane.distance_normalized(pt))
        .collect())
}

/// Tests if all `points` are within the distance `eps` of `plane`.
///
/// # Errors
/// Fails if the normal of the plane is zero or if `eps` is not a valid
/// tolerance.
pub fn are_points_on_plane(
    points: &[Point3<Real>],
    plane: &Plane,
    eps: Real,
) -> Result<bool, Error> {
    check_eps(eps)?;
    let plane = plane.normalize()?;
    Ok(greatest_distance(points, &plane) < eps)
}

/// Tests if `points` are non-collinear points lying on a common plane.
///
/// The tolerance on the distance of the points to their plane is `eps`
/// times the extent of the point set, so the result does not depend on the
/// scale of the input. Less than three points, or collinear points, do not
/// define a plane and are reported as not coplanar.
///
/// # Errors
/// Fails if `eps` is not a valid tolerance.
pub fn is_coplanar(points: &[Point3<Real>], eps: Real) -> Result<bool, Error> {
    check_eps(eps)?;

    if points.len() < 3 {
        return Ok(false);
    }

    let Some([i0, i1, i2]) = noncollinear_triple(points, eps)? else {
        return Ok(false);
    };
    let Some(plane) = plane3pt(&points[i0], &points[i1], &points[i2]) else {
        return Ok(false);
    };

    let spread = na::distance(&points[i0], &points[i1]);
    Ok(greatest_distance(points, &plane) < eps * spread)
}

/// The largest distance from `points` to the normalized `plane`.
fn greatest_distance(points: &[Point3<Real>], plane: &Plane) -> Real {
    points
        .iter()
        .map(|pt| plane.distance_normalized(pt).abs())
        .fold(0.0, Real::max)
}

/// How a line meets a normalized plane, with the parameter of the crossing
/// point along the line.
pub(crate) enum PlaneCrossing {
    At(Point3<Real>, Real),
    InPlane,
    Parallel,
}

pub(crate) fn plane_line_crossing(plane: &Plane, line: &Line<3>, eps: Real) -> PlaneCrossing {
    let dir = line.direction();
    let a = plane.distance_normalized(&line.a);
    let b = plane.normal.dot(&dir);

    if b.abs() <= eps * dir.norm() {
        if a.abs() <= eps {
            PlaneCrossing::InPlane
        } else {
            PlaneCrossing::Parallel
        }
    } else {
        let t = -a / b;
        PlaneCrossing::At(line.point_at(t), t)
    }
}

/// The result of the intersection of a plane and a line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlaneLineIntersection {
    /// The line crosses the plane at this point.
    Point(Point3<Real>),
    /// The line lies in the plane. This is the line itself.
    InPlane(Line<3>),
    /// The line is parallel to the plane, and does not lie in it.
    Parallel,
    /// The infinite line crosses the plane, but outside of the bounds of the line.
    OutOfBounds,
}

impl PlaneLineIntersection {
    /// The intersection point, if the line crosses the plane at a single point.
    pub fn point(&self) -> Option<Point3<Real>> {
        match self {
            PlaneLineIntersection::Point(pt) => Some(*pt),
            _ => None,
        }
    }
}

/// Computes the intersection of `plane` and `line` (within `bounds`).
///
/// The line is parallel to the plane if the sine of their angle is within
/// `eps` of zero. A parallel line lies in the plane if its first point is
/// within the distance `eps` of the plane.
///
/// # Errors
/// Fails if the normal of the plane is zero, if the two points of the line
/// coincide, or if `eps` is not a valid tolerance.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::{plane_line_intersection, Bounds, Line, Plane, PlaneLineIntersection};
/// use scadgeom::math::{Point3, Vector3, EPSILON};
///
/// let plane = Plane::new(Vector3::z(), 1.0);
/// let line = Line::new(Point3::new(1.0, 2.0, 0.0), Point3::new(1.0, 2.0, 4.0));
/// let res = plane_line_intersection(&plane, &line, Bounds::SEGMENT, EPSILON).unwrap();
/// assert_eq!(res, PlaneLineIntersection::Point(Point3::new(1.0, 2.0, 1.0)));
/// ```
pub fn plane_line_intersection(
    plane: &Plane,
    line: &Line<3>,
    bounds: Bounds,
    eps: Real,
) -> Result<PlaneLineIntersection, Error> {
    check_eps(eps)?;
    line.check()?;
    let plane = plane.normalize()?;

    Ok(match plane_line_crossing(&plane, line, eps) {
        PlaneCrossing::At(pt, t) => {
            if bounds.contains(t, eps) {
                PlaneLineIntersection::Point(pt)
            } else {
                PlaneLineIntersection::OutOfBounds
            }
        }
        PlaneCrossing::InPlane => PlaneLineIntersection::InPlane(*line),
        PlaneCrossing::Parallel => PlaneLineIntersection::Parallel,
    })
}

/// The angle between `line` and `plane`, in radians.
///
/// The angle is in `[-π/2, π/2]`: positive if the line points toward the
/// side of the plane its normal points to.
///
/// # Errors
/// Fails if the normal of the plane is zero or if the two points of the
/// line coincide.
pub fn plane_line_angle(plane: &Plane, line: &Line<3>) -> Result<Real, Error> {
    line.check()?;
    let normal = plane_normal(plane)?;
    let dir = line.direction().normalize();
    let sin = dir.dot(&normal);
    let cos = dir.cross(&normal).norm();
    Ok(sin.atan2(cos))
}

/// The line along which two planes intersect, or `Ok(None)` if they are
/// parallel, i.e., if the sine of their angle is within `eps` of zero.
///
/// The first point of the returned line is the point of the intersection
/// closest to the origin, and its direction is the cross product of the
/// normals of the planes.
///
/// # Errors
/// Fails if the normal of a plane is zero or if `eps` is not a valid
/// tolerance.
pub fn plane_intersection(
    plane1: &Plane,
    plane2: &Plane,
    eps: Real,
) -> Result<Option<Line<3>>, Error> {
    check_eps(eps)?;
    let p1 = plane1.normalize()?;
    let p2 = plane2.normalize()?;
    let dir = p1.normal.cross(&p2.normal);

    if dir.norm() <= eps {
        return Ok(None);
    }

    let a = from_rows(&[p1.normal.as_slice(), p2.normal.as_slice()])?;
    let b = from_rows(&[[p1.offset], [p2.offset]])?;

    Ok(linear_solve(&a, &b, eps)?.map(|x| {
        let pt = Point3::new(x[0], x[1], x[2]);
        Line::new(pt, pt + dir)
    }))
}

/// The point where three planes intersect, or `Ok(None)` if there is no
/// unique such point.
///
/// # Errors
/// Fails if the normal of a plane is zero or if `eps` is not a valid
/// tolerance.
pub fn plane_intersection3(
    plane1: &Plane,
    plane2: &Plane,
    plane3: &Plane,
    eps: Real,
) -> Result<Option<Point3<Real>>, Error> {
    check_eps(eps)?;
    let planes = [plane1.normalize()?, plane2.normalize()?, plane3.normalize()?];
    let a = from_rows(&planes.map(|p| p.normal.as_slice().to_vec()))?;
    let b = from_rows(&planes.map(|p| [p.offset]))?;

    Ok(linear_solve(&a, &b, eps)?.map(|x| Point3::new(x[0], x[1], x[2])))
}

/// An orthonormal 2D coordinate frame on a plane.
///
/// The axes `u` and `v` are such that `u × v = normal`: a polygon that is
/// counterclockwise when seen from the side the normal points to is
/// counterclockwise in the frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneFrame {
    /// The point of the plane with frame coordinates `(0, 0)`.
    pub origin: Point3<Real>,
    /// The first axis of the frame.
    pub u: Vector3<Real>,
    /// The second axis of the frame.
    pub v: Vector3<Real>,
    /// The unit normal of the plane.
    pub normal: Vector3<Real>,
}

impl PlaneFrame {
    /// A frame on the plane through `origin` with the given normal.
    ///
    /// # Errors
    /// Fails if `normal` is zero.
    pub fn new(origin: Point3<Real>, normal: &Vector3<Real>) -> Result<Self, Error> {
        let normal = plane_normal(&Plane::new(*normal, 0.0))?;
        // Start from the coordinate axis the least aligned with the normal.
        let axis = normal.iamin();
        let u = (Vector3::ith(axis, 1.0) - normal * normal[axis]).normalize();
        let v = normal.cross(&u);

        Ok(PlaneFrame {
            origin,
            u,
            v,
            normal,
        })
    }

    /// A frame on `plane`, centered on the point of the plane closest to the
    /// origin.
    ///
    /// # Errors
    /// Fails if the normal of the plane is zero.
    pub fn from_plane(plane: &Plane) -> Result<Self, Error> {
        let plane = plane.normalize()?;
        PlaneFrame::new(Point3::from(plane.normal * plane.offset), &plane.normal)
    }

    /// The frame coordinates of the orthogonal projection of `pt` on the plane.
    #[inline]
    pub fn project(&self, pt: &Point3<Real>) -> Point2<Real> {
        let d = pt - self.origin;
        Point2::new(d.dot(&self.u), d.dot(&self.v))
    }

    /// The point of the plane with the given frame coordinates.
    #[inline]
    pub fn lift(&self, pt: &Point2<Real>) -> Point3<Real> {
        self.origin + self.u * pt.x + self.v * pt.y
    }
}
