//! Dense linear algebra: determinants, QR and Cholesky factorizations,
//! triangular and general linear solves, and the closed-form eigen
//! decomposition of symmetric 3x3 matrices.
//!
//! Matrices of arbitrary size are nalgebra [`DMatrix`](crate::math::DMatrix)es.
//! A right-hand side with a single column is an `n x 1` matrix.

pub use self::cholesky::cholesky;
pub use self::determinant::{det2, det3, det4, determinant, determinant_cofactor};
pub use self::eigen::{
    eigen_symmetric_3x3, eigenvalues_symmetric_3x3, eigenvector_symmetric_3x3,
};
pub use self::matrix::{from_rows, is_matrix_symmetric};
pub use self::qr::{back_substitute, qr_factor, QrFactors};
pub use self::solve::{linear_solve, linear_solve3, matrix_inverse, null_space};

pub(crate) use self::matrix::check_square;

mod cholesky;
mod determinant;
mod eigen;
mod matrix;
mod qr;
mod solve;
