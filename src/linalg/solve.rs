use super::{back_substitute, check_square, det3, qr_factor};
use crate::error::check_eps;
use crate::math::{DMatrix, DVector, Matrix3, Real, Vector3};
use crate::Error;

/// Solves the linear system `a x = b`.
///
/// Square systems are solved exactly, overdetermined systems (more rows than
/// columns) in the least-squares sense, and underdetermined systems (more
/// columns than rows) return the minimum-norm solution. Every column of `b` is
/// a separate right-hand side.
///
/// Returns `Ok(None)` if the system is rank-deficient, i.e., if a diagonal
/// entry of the pivoted QR factor is within `eps` of zero.
///
/// # Errors
/// Fails if `a` is empty, if `b` does not have as many rows as `a`, or if
/// `eps` is not a valid tolerance.
///
/// # Example
///
/// ```
/// # #[macro_use] extern crate approx;
/// use scadgeom::linalg::{from_rows, linear_solve};
/// use scadgeom::math::EPSILON;
///
/// # fn main() {
/// let a = from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
/// let b = from_rows(&[[3.0], [5.0]]).unwrap();
/// let x = linear_solve(&a, &b, EPSILON).unwrap().unwrap();
/// assert_relative_eq!(&a * x, b, epsilon = 1.0e-12);
///
/// let singular = from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
/// assert!(linear_solve(&singular, &b, EPSILON).unwrap().is_none());
/// # }
/// ```
pub fn linear_solve(
    a: &DMatrix<Real>,
    b: &DMatrix<Real>,
    eps: Real,
) -> Result<Option<DMatrix<Real>>, Error> {
    check_eps(eps)?;

    if a.is_empty() {
        return Err(Error::invalid_argument("a", "the matrix is empty"));
    }

    let (m, n) = a.shape();

    if b.nrows() != m {
        return Err(Error::invalid_argument(
            "b",
            format!("expected {} rows, got {}", m, b.nrows()),
        ));
    }

    if m < n {
        // aᵀ = Q R Pᵀ so a = P Rᵀ Qᵀ and x = Q (Rᵀ)⁻¹ Pᵀ b has minimal norm.
        let qr = qr_factor(&a.transpose(), true)?;
        let r = qr.r.view((0, 0), (m, m)).clone_owned();

        if is_rank_deficient(&r, eps) {
            return Ok(None);
        }

        let y = back_substitute(&r, &(qr.p.transpose() * b), true)?;
        Ok(y.map(|y| qr.q.columns(0, m) * y))
    } else {
        let qr = qr_factor(a, true)?;
        let r = qr.r.view((0, 0), (n, n)).clone_owned();

        if is_rank_deficient(&r, eps) {
            return Ok(None);
        }

        let y = back_substitute(&r, &(qr.q.columns(0, n).transpose() * b), false)?;
        Ok(y.map(|y| &qr.p * y))
    }
}

fn is_rank_deficient(r: &DMatrix<Real>, eps: Real) -> bool {
    let deficient = r.diagonal().iter().any(|d| d.abs() <= eps);

    if deficient {
        log::debug!("Rank-deficient linear system, diagonal of R: {}", r.diagonal());
    }

    deficient
}

/// Solves the 3x3 system `a x = b` with Cramer's rule.
///
/// Returns `None` if `a` is singular.
pub fn linear_solve3(a: &Matrix3<Real>, b: &Vector3<Real>) -> Option<Vector3<Real>> {
    let det = det3(a);

    if det == 0.0 {
        return None;
    }

    let mut x = Vector3::zeros();

    for i in 0..3 {
        let mut ai = *a;
        ai.set_column(i, b);
        x[i] = det3(&ai) / det;
    }

    Some(x)
}

/// The inverse of a square matrix, or `Ok(None)` if it is singular up to `eps`.
///
/// # Errors
/// Fails if `a` is empty or not square.
pub fn matrix_inverse(a: &DMatrix<Real>, eps: Real) -> Result<Option<DMatrix<Real>>, Error> {
    let n = check_square(a, "a")?;
    linear_solve(a, &DMatrix::identity(n, n), eps)
}

/// An orthonormal basis of the null space of `a`.
///
/// The basis vectors have `a.ncols()` components and satisfy `a v ≈ 0`. The
/// result is empty if `a` has full column rank.
///
/// # Errors
/// Fails if `a` is empty or if `eps` is not a valid tolerance.
pub fn null_space(a: &DMatrix<Real>, eps: Real) -> Result<Vec<DVector<Real>>, Error> {
    check_eps(eps)?;

    if a.is_empty() {
        return Err(Error::invalid_argument("a", "the matrix is empty"));
    }

    // aᵀ = Q R Pᵀ, so a Q = P Rᵀ: the columns of Q matching the zero rows of R
    // are mapped to zero.
    let qr = qr_factor(&a.transpose(), true)?;
    let basis = (0..qr.r.nrows())
        .filter(|&i| qr.r.row(i).iter().all(|x| x.abs() <= eps))
        .map(|i| qr.q.column(i).clone_owned())
        .collect();

    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::from_rows;
    use crate::math::EPSILON;

    #[test]
    fn square_systems() {
        let mut rng = oorandom::Rand64::new(3);

        for n in 1..=6 {
            // Diagonally dominant, hence non-singular.
            let mut a = DMatrix::from_fn(n, n, |_, _| rng.rand_float() * 2.0 - 1.0);
            for i in 0..n {
                a[(i, i)] += 2.0 * n as Real;
            }
            let b = DMatrix::from_fn(n, 2, |_, _| rng.rand_float() * 10.0 - 5.0);

            let x = linear_solve(&a, &b, EPSILON).unwrap().unwrap();
            assert_relative_eq!(&a * x, b, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn singular_systems_have_no_solution() {
        let a = from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let b = from_rows(&[[1.0], [1.0]]).unwrap();
        assert_eq!(linear_solve(&a, &b, EPSILON), Ok(None));
        assert_eq!(matrix_inverse(&a, EPSILON), Ok(None));
    }

    #[test]
    fn least_squares() {
        // Fit y = c0 + c1 x through (0, 1), (1, 3), (2, 5), (3, 7.3).
        let a = from_rows(&[[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]).unwrap();
        let b = from_rows(&[[1.0], [3.0], [5.0], [7.3]]).unwrap();
        let x = linear_solve(&a, &b, EPSILON).unwrap().unwrap();

        // The residual of a least-squares solution is orthogonal to the columns of `a`.
        let residual = &a * &x - &b;
        assert_relative_eq!(
            a.transpose() * residual,
            DMatrix::zeros(2, 1),
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn minimum_norm_solution() {
        let a = from_rows(&[[1.0, 1.0]]).unwrap();
        let b = from_rows(&[[2.0]]).unwrap();
        let x = linear_solve(&a, &b, EPSILON).unwrap().unwrap();
        assert_relative_eq!(x, from_rows(&[[1.0], [1.0]]).unwrap(), epsilon = 1.0e-12);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let a = from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
        let b = from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        assert!(linear_solve(&a, &b, EPSILON).is_err());
        assert!(linear_solve(&a, &b, -1.0).is_err());
    }

    #[test]
    fn cramer() {
        let a = Matrix3::new(2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0);
        let b = Vector3::new(8.0, -11.0, -3.0);
        let x = linear_solve3(&a, &b).unwrap();
        assert_relative_eq!(x, Vector3::new(2.0, 3.0, -1.0), epsilon = 1.0e-12);

        let singular = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0);
        assert!(linear_solve3(&singular, &b).is_none());
    }

    #[test]
    fn inverse() {
        let a = from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
        let inv = matrix_inverse(&a, EPSILON).unwrap().unwrap();
        assert_relative_eq!(&a * inv, DMatrix::identity(2, 2), epsilon = 1.0e-12);
    }

    #[test]
    fn null_space_of_rank_one_matrix() {
        let a = from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0]]).unwrap();
        let basis = null_space(&a, 1.0e-9).unwrap();
        assert_eq!(basis.len(), 2);

        for v in &basis {
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1.0e-12);
            assert_relative_eq!(&a * v, DVector::zeros(2), epsilon = 1.0e-9);
        }

        assert_relative_eq!(basis[0].dot(&basis[1]), 0.0, epsilon = 1.0e-12);

        let full = from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert!(null_space(&full, 1.0e-9).unwrap().is_empty());
    }
}
