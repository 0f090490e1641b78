use super::check_square;
use crate::math::{DMatrix, Matrix2, Matrix3, Matrix4, Real};
use crate::Error;

/// The determinant of a 2x2 matrix.
#[inline]
pub fn det2(m: &Matrix2<Real>) -> Real {
    m.m11 * m.m22 - m.m12 * m.m21
}

/// The determinant of a 3x3 matrix, expanded along the first row.
#[inline]
pub fn det3(m: &Matrix3<Real>) -> Real {
    m.m11 * (m.m22 * m.m33 - m.m23 * m.m32) - m.m12 * (m.m21 * m.m33 - m.m23 * m.m31)
        + m.m13 * (m.m21 * m.m32 - m.m22 * m.m31)
}

/// The determinant of a 4x4 matrix, computed from the 2x2 minors of its
/// first two rows and last two rows.
pub fn det4(m: &Matrix4<Real>) -> Real {
    let s0 = m.m11 * m.m22 - m.m21 * m.m12;
    let s1 = m.m11 * m.m23 - m.m21 * m.m13;
    let s2 = m.m11 * m.m24 - m.m21 * m.m14;
    let s3 = m.m12 * m.m23 - m.m22 * m.m13;
    let s4 = m.m12 * m.m24 - m.m22 * m.m14;
    let s5 = m.m13 * m.m24 - m.m23 * m.m14;

    let c5 = m.m33 * m.m44 - m.m43 * m.m34;
    let c4 = m.m32 * m.m44 - m.m42 * m.m34;
    let c3 = m.m32 * m.m43 - m.m42 * m.m33;
    let c2 = m.m31 * m.m44 - m.m41 * m.m34;
    let c1 = m.m31 * m.m43 - m.m41 * m.m33;
    let c0 = m.m31 * m.m42 - m.m41 * m.m32;

    s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
}

/// The determinant of a square matrix.
///
/// Matrices up to 4x4 use closed forms. Larger matrices use cofactor
/// expansion, see [`determinant_cofactor`].
///
/// # Errors
/// Fails if `m` is empty or not square.
pub fn determinant(m: &DMatrix<Real>) -> Result<Real, Error> {
    let n = check_square(m, "m")?;

    Ok(match n {
        1 => m[(0, 0)],
        2 => det2(&m.fixed_view::<2, 2>(0, 0).into_owned()),
        3 => det3(&m.fixed_view::<3, 3>(0, 0).into_owned()),
        4 => det4(&m.fixed_view::<4, 4>(0, 0).into_owned()),
        _ => cofactor_expansion(m),
    })
}

/// The determinant of a square matrix by recursive cofactor expansion along
/// the first column.
///
/// The cost grows factorially with the size of the matrix, so this is only
/// meant for small matrices or as a reference for the closed forms.
///
/// # Errors
/// Fails if `m` is empty or not square.
pub fn determinant_cofactor(m: &DMatrix<Real>) -> Result<Real, Error> {
    let _ = check_square(m, "m")?;
    Ok(cofactor_expansion(m))
}

fn cofactor_expansion(m: &DMatrix<Real>) -> Real {
    let n = m.nrows();
    if n == 1 {
        return m[(0, 0)];
    }

    let mut det = 0.0;
    let mut sign = 1.0;

    for i in 0..n {
        let coeff = m[(i, 0)];

        if coeff != 0.0 {
            let minor = m.clone().remove_row(i).remove_column(0);
            det += sign * coeff * cofactor_expansion(&minor);
        }

        sign = -sign;
    }

    det
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::from_rows;

    #[test]
    fn small_determinants() {
        assert_eq!(det2(&Matrix2::new(1.0, 2.0, 3.0, 4.0)), -2.0);
        assert_eq!(
            det3(&Matrix3::new(2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0)),
            6.0
        );
        assert_eq!(det4(&Matrix4::identity()), 1.0);
        assert_eq!(
            det4(&Matrix4::new(
                1.0, 0.0, 2.0, -1.0, //
                3.0, 0.0, 0.0, 5.0, //
                2.0, 1.0, 4.0, -3.0, //
                1.0, 0.0, 5.0, 0.0
            )),
            30.0
        );
    }

    #[test]
    fn closed_forms_match_cofactor_expansion() {
        let mut rng = oorandom::Rand64::new(42);

        for n in 1..=6 {
            for _ in 0..20 {
                let m = DMatrix::from_fn(n, n, |_, _| rng.rand_float() * 4.0 - 2.0);
                let fast = determinant(&m).unwrap();
                let slow = determinant_cofactor(&m).unwrap();
                assert_relative_eq!(fast, slow, epsilon = 1.0e-9);
            }
        }
    }

    #[test]
    fn determinant_of_product_is_product_of_determinants() {
        let a = from_rows(&[[1.0, 2.0, 0.0], [0.5, -1.0, 3.0], [2.0, 2.0, 1.0]]).unwrap();
        let b = from_rows(&[[0.0, 1.0, 1.0], [4.0, 0.0, 2.0], [-1.0, 1.0, 1.0]]).unwrap();
        let ab = &a * &b;
        assert_relative_eq!(
            determinant(&ab).unwrap(),
            determinant(&a).unwrap() * determinant(&b).unwrap(),
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn non_square_is_rejected() {
        let m = from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert!(determinant(&m).unwrap_err().is_invalid_argument());
        assert!(determinant_cofactor(&m).is_err());
    }
}
