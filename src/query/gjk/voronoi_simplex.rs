use crate::linalg::linear_solve3;
use crate::math::{Matrix3, Point, Real, Vector, Vector3};
use crate::query::gjk::CSOPoint;
use arrayvec::ArrayVec;

/// The vertices of a simplex of dimension up to 3 in a Minkowski difference.
type Vertices<const D: usize> = ArrayVec<CSOPoint<D>, 4>;

/// The vertices kept by a sub-simplex projection, with their barycentric
/// coordinates.
type Reduction = ArrayVec<(usize, Real), 4>;

/// A simplex of dimension up to 3 using Voronoï regions for computing point projections.
///
/// The projection routines only use dot products so the same simplex works
/// in the plane and in space.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex<const D: usize> {
    vertices: Vertices<D>,
    proj: ArrayVec<Real, 4>,
}

impl<const D: usize> VoronoiSimplex<D> {
    /// Creates a simplex with a single vertex.
    pub fn new(pt: CSOPoint<D>) -> Self {
        let mut vertices = ArrayVec::new();
        vertices.push(pt);
        let mut proj = ArrayVec::new();
        proj.push(1.0);

        VoronoiSimplex { vertices, proj }
    }

    /// Add a point to this simplex.
    ///
    /// Returns `false` if the point is within `eps_tol` (squared distance) of
    /// an existing vertex, or if the simplex is already a tetrahedron.
    pub fn add_point(&mut self, pt: CSOPoint<D>, eps_tol: Real) -> bool {
        if self.vertices.is_full()
            || self
                .vertices
                .iter()
                .any(|v| (v.point - pt.point).norm_squared() < eps_tol)
        {
            return false;
        }

        self.vertices.push(pt);
        self.proj.push(0.0);
        true
    }

    /// The i-th point of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint<D> {
        assert!(i <= self.dimension(), "Index out of bounds.");
        &self.vertices[i]
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th point by
    /// the last call to `project_origin_and_reduce`.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.dimension(), "Index out of bounds.");
        self.proj[i]
    }

    /// The dimension of the smallest subspace that can contain this simplex.
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// The points on the first and second point sets matching the last
    /// projection of the origin.
    pub fn witness_points(&self) -> (Point<D>, Point<D>) {
        let mut res = (Point::origin(), Point::origin());

        for (v, coord) in self.vertices.iter().zip(self.proj.iter()) {
            res.0 += v.orig1.coords * *coord;
            res.1 += v.orig2.coords * *coord;
        }

        res
    }

    /// Projects the origin on this simplex and reduces `self` to the smallest
    /// sub-simplex containing the projection.
    ///
    /// Returns the result of the projection, which is the origin itself if
    /// the origin lies inside of the simplex.
    pub fn project_origin_and_reduce(&mut self) -> Point<D> {
        let pts: ArrayVec<Vector<D>, 4> = self.vertices.iter().map(|v| v.point.coords).collect();

        let reduction = match pts.len() {
            1 => single(0),
            2 => project_on_segment(&pts, [0, 1]),
            3 => project_on_triangle(&pts, [0, 1, 2]),
            _ => project_on_tetrahedron(&pts),
        };

        let mut vertices = Vertices::new();
        let mut proj = ArrayVec::new();
        let mut res = Vector::zeros();

        for (i, coord) in reduction {
            vertices.push(self.vertices[i]);
            proj.push(coord);
            res += pts[i] * coord;
        }

        self.vertices = vertices;
        self.proj = proj;
        Point::from(res)
    }
}

fn single(i: usize) -> Reduction {
    let mut res = Reduction::new();
    res.push((i, 1.0));
    res
}

fn sq_dist<const D: usize>(pts: &[Vector<D>], reduction: &Reduction) -> Real {
    reduction
        .iter()
        .fold(Vector::<D>::zeros(), |acc, (i, c)| acc + pts[*i] * *c)
        .norm_squared()
}

fn closest<const D: usize>(pts: &[Vector<D>], candidates: impl IntoIterator<Item = Reduction>) -> Reduction {
    let mut best = Reduction::new();
    let mut best_dist = Real::MAX;

    for candidate in candidates {
        let dist = sq_dist(pts, &candidate);

        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }

    best
}

/// Closest point to the origin on the segment `[pts[ia], pts[ib]]`.
fn project_on_segment<const D: usize>(pts: &[Vector<D>], [ia, ib]: [usize; 2]) -> Reduction {
    let a = pts[ia];
    let ab = pts[ib] - a;
    let sq_len = ab.norm_squared();
    let ap_ab = -a.dot(&ab);

    if sq_len == 0.0 || ap_ab <= 0.0 {
        single(ia)
    } else if ap_ab >= sq_len {
        single(ib)
    } else {
        let t = ap_ab / sq_len;
        let mut res = Reduction::new();
        res.push((ia, 1.0 - t));
        res.push((ib, t));
        res
    }
}

/// Closest point to the origin on the triangle `pts[ia], pts[ib], pts[ic]`,
/// using the Voronoï regions of its vertices and edges.
fn project_on_triangle<const D: usize>(pts: &[Vector<D>], [ia, ib, ic]: [usize; 3]) -> Reduction {
    let (a, b, c) = (pts[ia], pts[ib], pts[ic]);
    let ab = b - a;
    let ac = c - a;

    let d1 = -ab.dot(&a);
    let d2 = -ac.dot(&a);
    if d1 <= 0.0 && d2 <= 0.0 {
        return single(ia);
    }

    let d3 = -ab.dot(&b);
    let d4 = -ac.dot(&b);
    if d3 >= 0.0 && d4 <= d3 {
        return single(ib);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return project_on_segment(pts, [ia, ib]);
    }

    let d5 = -ab.dot(&c);
    let d6 = -ac.dot(&c);
    if d6 >= 0.0 && d5 <= d6 {
        return single(ic);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return project_on_segment(pts, [ia, ic]);
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        return project_on_segment(pts, [ib, ic]);
    }

    // The squared area of the parallelogram spanned by the edges.
    let denom = va + vb + vc;

    if denom <= Real::EPSILON * ab.norm_squared() * ac.norm_squared() {
        log::debug!("Degenerate triangle in GJK simplex, projecting on its edges.");
        return closest(
            pts,
            [
                project_on_segment(pts, [ia, ib]),
                project_on_segment(pts, [ia, ic]),
                project_on_segment(pts, [ib, ic]),
            ],
        );
    }

    let v = vb / denom;
    let w = vc / denom;
    let mut res = Reduction::new();
    res.push((ia, 1.0 - v - w));
    res.push((ib, v));
    res.push((ic, w));
    res
}

/// Closest point to the origin on the tetrahedron formed by the four points.
///
/// Only the faces the origin lies in front of are projected on. If there is
/// none, the origin is inside of the tetrahedron.
fn project_on_tetrahedron<const D: usize>(pts: &[Vector<D>]) -> Reduction {
    const FACES: [([usize; 3], usize); 4] = [
        ([1, 2, 3], 0),
        ([0, 2, 3], 1),
        ([0, 1, 3], 2),
        ([0, 1, 2], 3),
    ];

    let mut facing = ArrayVec::<[usize; 3], 4>::new();
    let mut degenerate = false;

    for (face, opp) in FACES {
        match face_normal_toward(pts, face, opp) {
            Some(n) => {
                // The origin is on the other side of the face than the opposite vertex.
                if pts[face[0]].dot(&n) > 0.0 {
                    facing.push(face);
                }
            }
            None => degenerate = true,
        }
    }

    if degenerate {
        log::debug!("Degenerate tetrahedron in GJK simplex, projecting on all its faces.");
        return closest(pts, FACES.iter().map(|(f, _)| project_on_triangle(pts, *f)));
    }

    if facing.is_empty() {
        return barycentric_coordinates(pts).unwrap_or_else(|| {
            closest(pts, FACES.iter().map(|(f, _)| project_on_triangle(pts, *f)))
        });
    }

    closest(pts, facing.iter().map(|f| project_on_triangle(pts, *f)))
}

/// The component of `pts[opp] - pts[face[0]]` orthogonal to the face,
/// i.e., the normal of the face pointing toward the opposite vertex within
/// the span of the tetrahedron. `None` if the tetrahedron is flat.
fn face_normal_toward<const D: usize>(
    pts: &[Vector<D>],
    face: [usize; 3],
    opp: usize,
) -> Option<Vector<D>> {
    let a = pts[face[0]];
    let e1 = pts[face[1]] - a;
    let e2 = pts[face[2]] - a;
    let w = pts[opp] - a;

    let g11 = e1.norm_squared();
    let g12 = e1.dot(&e2);
    let g22 = e2.norm_squared();
    let det = g11 * g22 - g12 * g12;

    if det <= Real::EPSILON * g11 * g22 {
        return None;
    }

    let r1 = e1.dot(&w);
    let r2 = e2.dot(&w);
    let alpha = (r1 * g22 - r2 * g12) / det;
    let beta = (r2 * g11 - r1 * g12) / det;
    let n = w - e1 * alpha - e2 * beta;

    if n.norm_squared() <= Real::EPSILON * w.norm_squared() {
        None
    } else {
        Some(n)
    }
}

/// Barycentric coordinates of the origin projected on the affine hull of
/// the four points.
fn barycentric_coordinates<const D: usize>(pts: &[Vector<D>]) -> Option<Reduction> {
    let a = pts[0];
    let edges = [pts[1] - a, pts[2] - a, pts[3] - a];
    let gram = Matrix3::from_fn(|i, j| edges[i].dot(&edges[j]));
    let rhs = Vector3::from_fn(|i, _| -edges[i].dot(&a));
    let l = linear_solve3(&gram, &rhs)?;

    let mut res = Reduction::new();
    res.push((0, 1.0 - l.sum()));
    res.push((1, l.x));
    res.push((2, l.y));
    res.push((3, l.z));
    Some(res)
}
