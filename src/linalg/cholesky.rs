use super::{check_square, is_matrix_symmetric};
use crate::math::{DMatrix, Real};
use crate::Error;

/// Absolute tolerance of the symmetry check performed by [`cholesky`].
const SYMMETRY_EPS: Real = 1.0e-12;

/// Computes the lower-triangular Cholesky factor `L` of `a`, with `a = L Lᵀ`.
///
/// Returns `Ok(None)` if `a` is not positive-definite.
///
/// # Errors
/// Fails if `a` is empty, not square, or not symmetric.
///
/// # Example
///
/// ```
/// # #[macro_use] extern crate approx;
/// use scadgeom::linalg::{cholesky, from_rows};
///
/// # fn main() {
/// let a = from_rows(&[[4.0, 2.0], [2.0, 3.0]]).unwrap();
/// let l = cholesky(&a).unwrap().unwrap();
/// assert_relative_eq!(&l * l.transpose(), a, epsilon = 1.0e-12);
///
/// let indefinite = from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
/// assert!(cholesky(&indefinite).unwrap().is_none());
/// # }
/// ```
pub fn cholesky(a: &DMatrix<Real>) -> Result<Option<DMatrix<Real>>, Error> {
    let n = check_square(a, "a")?;

    if !is_matrix_symmetric(a, SYMMETRY_EPS) {
        return Err(Error::invalid_argument("a", "the matrix is not symmetric"));
    }

    let mut l = DMatrix::zeros(n, n);

    for j in 0..n {
        let mut pivot = a[(j, j)];
        for k in 0..j {
            pivot -= l[(j, k)] * l[(j, k)];
        }

        if pivot <= 0.0 {
            log::debug!(
                "Cholesky factorization failed: pivot {} at column {} is not positive.",
                pivot,
                j
            );
            return Ok(None);
        }

        let ljj = pivot.sqrt();
        l[(j, j)] = ljj;

        for i in (j + 1)..n {
            let mut acc = a[(i, j)];
            for k in 0..j {
                acc -= l[(i, k)] * l[(j, k)];
            }
            l[(i, j)] = acc / ljj;
        }
    }

    Ok(Some(l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::from_rows;

    #[test]
    fn random_positive_definite() {
        let mut rng = oorandom::Rand64::new(5);

        for n in 1..=6 {
            let b = DMatrix::from_fn(n, n, |_, _| rng.rand_float() * 2.0 - 1.0);
            let a = &b * b.transpose() + DMatrix::identity(n, n);
            let l = cholesky(&a).unwrap().unwrap();

            assert_relative_eq!(&l * l.transpose(), a, epsilon = 1.0e-9);
            for i in 0..n {
                assert!(l[(i, i)] > 0.0);
                for j in (i + 1)..n {
                    assert_eq!(l[(i, j)], 0.0);
                }
            }
        }
    }

    #[test]
    fn indefinite_and_asymmetric() {
        let indefinite = from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
        assert_eq!(cholesky(&indefinite), Ok(None));

        let asymmetric = from_rows(&[[1.0, 2.0], [0.0, 1.0]]).unwrap();
        assert!(cholesky(&asymmetric).unwrap_err().is_invalid_argument());
    }
}
