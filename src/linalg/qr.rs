use crate::math::{DMatrix, DVector, Real};
use crate::Error;

/// The factors of a QR decomposition `A = Q R Pᵀ`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct QrFactors {
    /// The `m x m` orthogonal factor.
    pub q: DMatrix<Real>,
    /// The `m x n` upper-trapezoidal factor.
    pub r: DMatrix<Real>,
    /// The `n x n` column permutation. The identity when pivoting is disabled.
    pub p: DMatrix<Real>,
}

impl QrFactors {
    /// Multiplies the factors back together, i.e., computes `Q R Pᵀ`.
    pub fn recompose(&self) -> DMatrix<Real> {
        &self.q * &self.r * self.p.transpose()
    }

    /// The `min(m, n)` entries `R[(i, i)]` of the main diagonal of `R`.
    ///
    /// `R` is rectangular in general, so this is not nalgebra's `diagonal()`.
    pub fn diagonal(&self) -> DVector<Real> {
        let k = self.r.nrows().min(self.r.ncols());
        DVector::from_iterator(k, (0..k).map(|i| self.r[(i, i)]))
    }

    /// The number of diagonal entries of `R` with a magnitude greater than `eps`.
    ///
    /// With column pivoting the diagonal of `R` has non-increasing magnitudes
    /// so this is a numerical estimate of the rank of the factored matrix.
    pub fn rank(&self, eps: Real) -> usize {
        self.diagonal().iter().filter(|d| d.abs() > eps).count()
    }
}

/// Computes the QR decomposition of `a` with Householder reflections.
///
/// If `pivot` is `true`, the column with the largest remaining norm is
/// swapped in before each reflection, which makes the magnitudes along the
/// diagonal of `R` non-increasing. The factorization always satisfies
/// `a = Q R Pᵀ` with `Q` orthogonal and `R` upper-trapezoidal.
///
/// # Errors
/// Fails if `a` is empty.
///
/// # Example
///
/// ```
/// # #[macro_use] extern crate approx;
/// use scadgeom::linalg::{from_rows, qr_factor};
///
/// # fn main() {
/// let a = from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
/// let qr = qr_factor(&a, true).unwrap();
/// assert_relative_eq!(qr.recompose(), a, epsilon = 1.0e-12);
/// assert_eq!(qr.rank(1.0e-9), 2);
/// # }
/// ```
pub fn qr_factor(a: &DMatrix<Real>, pivot: bool) -> Result<QrFactors, Error> {
    if a.is_empty() {
        return Err(Error::invalid_argument("a", "the matrix is empty"));
    }

    let (m, n) = a.shape();
    let mut q = DMatrix::identity(m, m);
    let mut r = a.clone();
    let mut perm: Vec<usize> = (0..n).collect();

    for col in 0..m.min(n) {
        if pivot {
            let best = largest_residual_column(&r, col);

            if best != col {
                r.swap_columns(col, best);
                perm.swap(col, best);
            }
        }

        // The last row is already triangular, only the pivot matters there.
        if col == m - 1 {
            continue;
        }

        let x: DVector<Real> = r.column(col).rows(col, m - col).clone_owned();
        let xnorm = x.norm();
        // Reflect onto the axis with the sign that avoids cancellation.
        let alpha = if x[0] <= 0.0 { xnorm } else { -xnorm };

        let mut u = x;
        u[0] -= alpha;
        let unorm = u.norm();

        if unorm == 0.0 {
            continue;
        }

        let v = u / unorm;

        // R <- H R, restricted to the rows the reflection acts on.
        let update = (&v * (v.transpose() * r.rows(col, m - col))) * 2.0;
        let mut rows = r.rows_mut(col, m - col);
        rows -= &update;

        // Q <- Q H, restricted to the columns the reflection acts on.
        let update = ((q.columns(col, m - col) * &v) * v.transpose()) * 2.0;
        let mut cols = q.columns_mut(col, m - col);
        cols -= &update;
    }

    for j in 0..n {
        for i in (j + 1)..m {
            r[(i, j)] = 0.0;
        }
    }

    let mut p = DMatrix::zeros(n, n);
    for (j, &orig) in perm.iter().enumerate() {
        p[(orig, j)] = 1.0;
    }

    Ok(QrFactors { q, r, p })
}

/// Index of the column at or after `col` whose sub-column starting at row
/// `col` has the largest norm. Ties go to the leftmost column.
fn largest_residual_column(r: &DMatrix<Real>, col: usize) -> usize {
    let m = r.nrows();
    let mut best = col;
    let mut best_norm = -1.0;

    for j in col..r.ncols() {
        let norm = r.column(j).rows(col, m - col).norm_squared();

        if norm > best_norm {
            best = j;
            best_norm = norm;
        }
    }

    best
}

/// Solves `R x = b` for an upper-triangular `R`, or `Rᵀ x = b` if
/// `transpose` is `true`.
///
/// Only the upper triangle of `r` is read. Every column of `b` is solved
/// independently. Returns `Ok(None)` if a diagonal entry of `r` is exactly
/// zero.
///
/// # Errors
/// Fails if `r` is not square or if `b` does not have as many rows as `r`.
pub fn back_substitute(
    r: &DMatrix<Real>,
    b: &DMatrix<Real>,
    transpose: bool,
) -> Result<Option<DMatrix<Real>>, Error> {
    let n = super::check_square(r, "r")?;

    if b.nrows() != n {
        return Err(Error::invalid_argument(
            "b",
            format!("expected {} rows, got {}", n, b.nrows()),
        ));
    }

    if r.diagonal().iter().any(|d| *d == 0.0) {
        return Ok(None);
    }

    let mut x = b.clone();

    for c in 0..b.ncols() {
        if transpose {
            // Rᵀ is lower-triangular: forward substitution.
            for i in 0..n {
                let mut acc = x[(i, c)];
                for j in 0..i {
                    acc -= r[(j, i)] * x[(j, c)];
                }
                x[(i, c)] = acc / r[(i, i)];
            }
        } else {
            for i in (0..n).rev() {
                let mut acc = x[(i, c)];
                for j in (i + 1)..n {
                    acc -= r[(i, j)] * x[(j, c)];
                }
                x[(i, c)] = acc / r[(i, i)];
            }
        }
    }

    Ok(Some(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::from_rows;

    fn random_matrix(rng: &mut oorandom::Rand64, m: usize, n: usize) -> DMatrix<Real> {
        DMatrix::from_fn(m, n, |_, _| rng.rand_float() * 10.0 - 5.0)
    }

    #[test]
    fn qr_recomposes_and_q_is_orthogonal() {
        let mut rng = oorandom::Rand64::new(7);

        for &(m, n) in &[(1, 1), (1, 4), (3, 3), (5, 3), (3, 5), (6, 6)] {
            for &pivot in &[false, true] {
                let a = random_matrix(&mut rng, m, n);
                let qr = qr_factor(&a, pivot).unwrap();

                assert_relative_eq!(qr.recompose(), a, epsilon = 1.0e-9);
                assert_relative_eq!(
                    qr.q.transpose() * &qr.q,
                    DMatrix::identity(m, m),
                    epsilon = 1.0e-9
                );

                for j in 0..n {
                    for i in (j + 1)..m {
                        assert_eq!(qr.r[(i, j)], 0.0);
                    }
                }

                if !pivot {
                    assert_eq!(qr.p, DMatrix::identity(n, n));
                }
            }
        }
    }

    #[test]
    fn pivoting_orders_the_diagonal() {
        let mut rng = oorandom::Rand64::new(11);
        let a = random_matrix(&mut rng, 6, 5);
        let qr = qr_factor(&a, true).unwrap();
        let diag = qr.diagonal();
        assert_eq!(diag.len(), 5);

        for i in 1..diag.len() {
            assert!(diag[i].abs() <= diag[i - 1].abs() + 1.0e-9);
        }
    }

    #[test]
    fn pivoting_reaches_the_last_row_of_wide_matrices() {
        let a = from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();
        let qr = qr_factor(&a, true).unwrap();

        assert_relative_eq!(qr.recompose(), a, epsilon = 1.0e-12);
        assert_eq!(qr.rank(1.0e-9), 3);

        let diag = qr.diagonal();
        for i in 1..diag.len() {
            assert!(diag[i].abs() <= diag[i - 1].abs() + 1.0e-12);
        }
    }

    #[test]
    fn rank_of_rectangular_matrices() {
        let tall = from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        assert_eq!(qr_factor(&tall, true).unwrap().rank(1.0e-9), 2);
        assert_eq!(qr_factor(&tall, false).unwrap().rank(1.0e-9), 2);

        let wide = from_rows(&[[1.0, 2.0, 3.0, 4.0], [2.0, 4.0, 6.0, 8.0]]).unwrap();
        assert_eq!(qr_factor(&wide, true).unwrap().rank(1.0e-9), 1);
    }

    #[test]
    fn rank_of_deficient_matrix() {
        let a = from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]]).unwrap();
        let qr = qr_factor(&a, true).unwrap();
        assert_eq!(qr.rank(1.0e-9), 2);
    }

    #[test]
    fn back_substitution() {
        let r = from_rows(&[[2.0, 1.0, -1.0], [0.0, 3.0, 2.0], [0.0, 0.0, 4.0]]).unwrap();
        let b = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 8.0]);

        let x = back_substitute(&r, &b, false).unwrap().unwrap();
        assert_relative_eq!(&r * &x, b, epsilon = 1.0e-12);

        let xt = back_substitute(&r, &b, true).unwrap().unwrap();
        assert_relative_eq!(r.transpose() * &xt, b, epsilon = 1.0e-12);
    }

    #[test]
    fn back_substitution_with_zero_pivot() {
        let r = from_rows(&[[2.0, 1.0], [0.0, 0.0]]).unwrap();
        let b = DMatrix::from_column_slice(2, 1, &[1.0, 2.0]);
        assert_eq!(back_substitute(&r, &b, false), Ok(None));

        let bad = DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0]);
        assert!(back_substitute(&r, &bad, false).is_err());
    }
}
