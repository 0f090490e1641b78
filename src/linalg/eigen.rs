use super::det3;
use crate::math::{Matrix3, Real, Vector3, EPSILON};
use crate::Error;
use core::cmp::Reverse;
use core::f64::consts::PI;
use ordered_float::OrderedFloat;

/// The eigenvalues of the symmetric matrix `m`, sorted in decreasing order.
///
/// Uses the closed-form trigonometric solution of the characteristic cubic.
/// Only the upper triangle of `m` is read.
pub fn eigenvalues_symmetric_3x3(m: &Matrix3<Real>) -> Vector3<Real> {
    let p1 = m.m12 * m.m12 + m.m13 * m.m13 + m.m23 * m.m23;
    let diag_sq = m.m11 * m.m11 + m.m22 * m.m22 + m.m33 * m.m33;

    // Off-diagonal entries below the rounding error of the diagonal ones.
    if p1 <= Real::EPSILON * Real::EPSILON * diag_sq {
        let mut diag = [m.m11, m.m22, m.m33];
        diag.sort_by_key(|x| Reverse(OrderedFloat(*x)));
        return Vector3::from(diag);
    }

    let sym = Matrix3::new(
        m.m11, m.m12, m.m13, //
        m.m12, m.m22, m.m23, //
        m.m13, m.m23, m.m33,
    );
    let q = sym.trace() / 3.0;
    let p2 = (m.m11 - q).powi(2) + (m.m22 - q).powi(2) + (m.m33 - q).powi(2) + 2.0 * p1;
    let p = (p2 / 6.0).sqrt();
    let b = (sym - Matrix3::identity() * q) / p;
    let r = (det3(&b) / 2.0).clamp(-1.0, 1.0);
    let phi = r.acos() / 3.0;

    let e1 = q + 2.0 * p * phi.cos();
    let e3 = q + 2.0 * p * (phi + 2.0 * PI / 3.0).cos();
    let e2 = 3.0 * q - e1 - e3;

    Vector3::new(e1, e2, e3)
}

/// The unit eigenvector of the symmetric matrix `m` associated to its `i`-th
/// eigenvalue, where `evals` are the eigenvalues computed by
/// [`eigenvalues_symmetric_3x3`].
///
/// The eigenvector is read off the product `(m - λⱼ I)(m - λₖ I)` of the two
/// other eigenvalues, whose column space is the eigenspace of `λᵢ`. This is
/// not reliable when `λᵢ` is clustered with another eigenvalue: if the
/// product vanishes relative to the squared spectral radius, a coordinate axis
/// is returned instead.
///
/// # Errors
/// Fails if `i` is not 0, 1, or 2.
pub fn eigenvector_symmetric_3x3(
    m: &Matrix3<Real>,
    evals: &Vector3<Real>,
    i: usize,
) -> Result<Vector3<Real>, Error> {
    if i > 2 {
        return Err(Error::invalid_argument(
            "i",
            format!("eigenvalue index must be 0, 1 or 2, got {}", i),
        ));
    }

    let sym = Matrix3::new(
        m.m11, m.m12, m.m13, //
        m.m12, m.m22, m.m23, //
        m.m13, m.m23, m.m33,
    );
    let id = Matrix3::identity();
    let prod = (sym - id * evals[(i + 1) % 3]) * (sym - id * evals[(i + 2) % 3]);

    let (k, norm) = (0..3)
        .map(|k| (k, prod.row(k).norm()))
        .fold((0, -1.0), |best, curr| if curr.1 > best.1 { curr } else { best });
    let radius = evals.amax();

    if norm <= EPSILON * radius * radius {
        log::debug!(
            "Degenerate eigenvector computation for eigenvalue {} of {:?}: falling back to axis {}.",
            evals[i],
            evals,
            k
        );
        return Ok(Vector3::ith(k, 1.0));
    }

    Ok(prod.row(k).transpose() / norm)
}

/// The eigenvalues of the symmetric matrix `m` in decreasing order, and the
/// matching unit eigenvectors as the columns of a matrix.
pub fn eigen_symmetric_3x3(m: &Matrix3<Real>) -> (Vector3<Real>, Matrix3<Real>) {
    let evals = eigenvalues_symmetric_3x3(m);
    let mut evecs = Matrix3::zeros();

    for i in 0..3 {
        // The index is always in range.
        if let Ok(v) = eigenvector_symmetric_3x3(m, &evals, i) {
            evecs.set_column(i, &v);
        }
    }

    (evals, evecs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use na::Rotation3;

    #[test]
    fn diagonal_matrix() {
        let m = Matrix3::from_diagonal(&Vector3::new(1.0, 5.0, 3.0));
        let (evals, evecs) = eigen_symmetric_3x3(&m);
        assert_eq!(evals, Vector3::new(5.0, 3.0, 1.0));
        assert_relative_eq!(evecs.column(0).abs(), Vector3::y(), epsilon = 1.0e-12);
        assert_relative_eq!(evecs.column(2).abs(), Vector3::x(), epsilon = 1.0e-12);
    }

    #[test]
    fn rotated_diagonal_matrix() {
        let rot = Rotation3::from_euler_angles(0.3, -0.7, 1.1);
        let diag = Matrix3::from_diagonal(&Vector3::new(7.0, 2.0, -1.5));
        let m = rot.matrix() * diag * rot.matrix().transpose();

        let (evals, evecs) = eigen_symmetric_3x3(&m);
        assert_relative_eq!(evals, Vector3::new(7.0, 2.0, -1.5), epsilon = 1.0e-9);

        for i in 0..3 {
            let v = evecs.column(i).into_owned();
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1.0e-12);
            assert_relative_eq!(m * v, v * evals[i], epsilon = 1.0e-9);
        }
    }

    #[test]
    fn repeated_eigenvalue() {
        // Eigenvalues 4, 1, 1: the simple eigenvalue is still recovered exactly.
        let m = Matrix3::new(2.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0);
        let evals = eigenvalues_symmetric_3x3(&m);
        assert_relative_eq!(evals, Vector3::new(4.0, 1.0, 1.0), epsilon = 1.0e-9);

        let v = eigenvector_symmetric_3x3(&m, &evals, 0).unwrap();
        assert_relative_eq!(v.abs(), Vector3::repeat(1.0 / 3.0f64.sqrt()), epsilon = 1.0e-9);
    }

    #[test]
    fn small_and_large_matrices() {
        for s in [1.0e-6, 1.0e-4, 1.0e-2, 1.0, 1.0e3] {
            let s2 = s * s;
            let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.5) * s2;

            let (evals, evecs) = eigen_symmetric_3x3(&m);
            assert_relative_eq!(
                evals,
                Vector3::new(3.0, 1.0, 0.5) * s2,
                max_relative = 1.0e-9
            );

            for i in 0..3 {
                let v = evecs.column(i).into_owned();
                assert_relative_eq!(v.norm(), 1.0, epsilon = 1.0e-9);
                assert_relative_eq!(m * v, v * evals[i], epsilon = 1.0e-9 * s2);
            }

            assert_relative_eq!(evecs.column(2).abs(), Vector3::z(), epsilon = 1.0e-9);
        }
    }

    #[test]
    fn bad_index() {
        let m = Matrix3::identity();
        let evals = eigenvalues_symmetric_3x3(&m);
        assert!(eigenvector_symmetric_3x3(&m, &evals, 3).is_err());
    }
}
