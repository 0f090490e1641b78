use super::plane::{plane_line_crossing, PlaneCrossing};
use super::{
    general_line_intersection, plane_from_polygon, point_in_polygon, Bounds, Line, PlaneFrame,
};
use crate::error::check_eps;
use crate::math::{Point2, Point3, Real};
use crate::Error;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

/// The intersection of a 3D polygon and a line.
#[derive(Clone, Debug, PartialEq)]
pub enum PolygonLineIntersection {
    /// The line crosses the plane of the polygon at this point, inside the polygon.
    Point(Point3<Real>),
    /// The line lies in the plane of the polygon, which it overlaps along
    /// these disjoint segments, ordered along the line.
    Segments(Vec<Line<3>>),
}

/// The segments along which a 2D polygon overlaps `line` (within `bounds`).
///
/// The line is split at every crossing with an edge of the polygon, and the
/// pieces whose midpoint is inside the polygon or on its boundary are kept,
/// see [`point_in_polygon`] for the meaning of `nonzero`. Contiguous pieces
/// are merged, and the resulting segments are ordered along the line.
///
/// # Errors
/// Fails if the polygon has less than three vertices, if the two points of
/// the line coincide, or if `eps` is not a valid tolerance.
///
/// # Example
///
/// ```
/// use scadgeom::geometry::{polygon_line_intersection2d, Bounds, Line};
/// use scadgeom::math::{Point2, EPSILON};
///
/// let square = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]].map(Point2::from);
/// let line = Line::new(Point2::new(-1.0, 1.0), Point2::new(0.0, 1.0));
///
/// let segs = polygon_line_intersection2d(&square, &line, Bounds::LINE, true, EPSILON).unwrap();
/// assert_eq!(segs, vec![Line::new(Point2::new(0.0, 1.0), Point2::new(2.0, 1.0))]);
/// ```
pub fn polygon_line_intersection2d(
    poly: &[Point2<Real>],
    line: &Line<2>,
    bounds: Bounds,
    nonzero: bool,
    eps: Real,
) -> Result<Vec<Line<2>>, Error> {
    check_eps(eps)?;
    line.check()?;

    if poly.len() < 3 {
        return Err(Error::invalid_argument(
            "poly",
            format!("a polygon needs at least 3 vertices, got {}", poly.len()),
        ));
    }

    let dir_len = line.direction().norm();
    let t_eps = eps / dir_len;
    let mut splits: SmallVec<[Real; 16]> = SmallVec::new();

    for (i, a) in poly.iter().enumerate() {
        let b = poly[(i + 1) % poly.len()];
        let edge = Line::new(*a, b);

        if edge.check().is_err() {
            continue;
        }

        if let Some((_, t, u)) = general_line_intersection(line, &edge, eps) {
            if u >= -eps && u <= 1.0 + eps {
                splits.push(t);
            }
        }
    }

    // Vertices on the line split it too, which covers the edges that are
    // collinear with it.
    for pt in poly {
        let t = line.project_parameter(pt);
        if na::distance(pt, &line.point_at(t)) <= eps {
            splits.push(t);
        }
    }

    if bounds.0[0] {
        splits.push(0.0);
    }
    if bounds.0[1] {
        splits.push(1.0);
    }

    let mut splits: SmallVec<[Real; 16]> = splits
        .into_iter()
        .map(|t| bounds.clamp(t))
        .collect();
    splits.sort_unstable_by_key(|t| OrderedFloat(*t));
    splits.dedup_by(|t, prev| *t - *prev <= t_eps);

    let mut segments: Vec<[Real; 2]> = Vec::new();

    for w in splits.windows(2) {
        let mid = line.point_at((w[0] + w[1]) / 2.0);

        if point_in_polygon(&mid, poly, nonzero, eps)?.is_inside_or_on_boundary() {
            match segments.last_mut() {
                Some(last) if last[1] == w[0] => last[1] = w[1],
                _ => segments.push([w[0], w[1]]),
            }
        }
    }

    Ok(segments
        .into_iter()
        .map(|[t0, t1]| Line::new(line.point_at(t0), line.point_at(t1)))
        .collect())
}

/// The intersection of a planar 3D polygon and `line` (within `bounds`).
///
/// If the line crosses the plane of the polygon, the result is the crossing
/// point, provided it is inside the polygon or on its boundary. If the line
/// lies in the plane, the polygon and the line are projected on the plane
/// and the result is the segments computed by [`polygon_line_intersection2d`].
/// Returns `Ok(None)` if the line misses the polygon.
///
/// # Errors
/// Fails if the polygon has less than three vertices, if it is not planar,
/// if the two points of the line coincide, or if `eps` is not a valid
/// tolerance.
pub fn polygon_line_intersection(
    poly: &[Point3<Real>],
    line: &Line<3>,
    bounds: Bounds,
    nonzero: bool,
    eps: Real,
) -> Result<Option<PolygonLineIntersection>, Error> {
    check_eps(eps)?;
    line.check()?;

    let Some(plane) = plane_from_polygon(poly, false, eps)? else {
        return Err(Error::invalid_argument(
            "poly",
            "the polygon is not planar, or its vertices are collinear",
        ));
    };

    let frame = PlaneFrame::from_plane(&plane)?;
    let flat: Vec<_> = poly.iter().map(|pt| frame.project(pt)).collect();

    match plane_line_crossing(&plane, line, eps) {
        PlaneCrossing::Parallel => Ok(None),
        PlaneCrossing::At(pt, t) => {
            if bounds.contains(t, eps)
                && point_in_polygon(&frame.project(&pt), &flat, nonzero, eps)?
                    .is_inside_or_on_boundary()
            {
                Ok(Some(PolygonLineIntersection::Point(pt)))
            } else {
                Ok(None)
            }
        }
        PlaneCrossing::InPlane => {
            let flat_line = Line::new(frame.project(&line.a), frame.project(&line.b));
            let segments = polygon_line_intersection2d(&flat, &flat_line, bounds, nonzero, eps)?;

            if segments.is_empty() {
                Ok(None)
            } else {
                Ok(Some(PolygonLineIntersection::Segments(
                    segments
                        .iter()
                        .map(|seg| Line::new(frame.lift(&seg.a), frame.lift(&seg.b)))
                        .collect(),
                )))
            }
        }
    }
}
