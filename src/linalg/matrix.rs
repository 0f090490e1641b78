use crate::math::{DMatrix, Real};
use crate::Error;

/// Builds a matrix from a list of row vectors.
///
/// Fails if `rows` is empty, if the rows are empty, or if the rows do not all
/// have the same length.
///
/// # Example
///
/// ```
/// use scadgeom::linalg::from_rows;
///
/// let m = from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m[(1, 0)], 4.0);
///
/// assert!(from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
/// ```
pub fn from_rows<R: AsRef<[Real]>>(rows: &[R]) -> Result<DMatrix<Real>, Error> {
    let nrows = rows.len();
    let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);

    if nrows == 0 || ncols == 0 {
        return Err(Error::invalid_argument(
            "rows",
            "a matrix needs at least one non-empty row",
        ));
    }

    if let Some(i) = rows.iter().position(|r| r.as_ref().len() != ncols) {
        return Err(Error::invalid_argument(
            "rows",
            format!(
                "row {} has {} entries but row 0 has {}",
                i,
                rows[i].as_ref().len(),
                ncols
            ),
        ));
    }

    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i].as_ref()[j]))
}

/// Tests if `m` is square and equal to its transpose up to `eps`.
pub fn is_matrix_symmetric(m: &DMatrix<Real>, eps: Real) -> bool {
    if !m.is_square() {
        return false;
    }

    let n = m.nrows();
    (0..n).all(|i| (i + 1..n).all(|j| (m[(i, j)] - m[(j, i)]).abs() <= eps))
}

/// Checks that `m` is a non-empty square matrix, returning its size.
pub(crate) fn check_square(m: &DMatrix<Real>, arg: &'static str) -> Result<usize, Error> {
    if m.is_empty() {
        Err(Error::invalid_argument(arg, "the matrix is empty"))
    } else if !m.is_square() {
        Err(Error::invalid_argument(
            arg,
            format!("expected a square matrix, got {}x{}", m.nrows(), m.ncols()),
        ))
    } else {
        Ok(m.nrows())
    }
}
