use crate::math::{Matrix3, Point3, Real};
use crate::utils::center;

/// Computes the covariance matrix of a set of 3D points.
pub fn cov(pts: &[Point3<Real>]) -> Matrix3<Real> {
    center_cov(pts).1
}

/// Computes the center and the covariance matrix of a set of 3D points.
///
/// The covariance is normalized by the number of points, so its eigenvalues
/// are the variances of the cloud along its principal axes.
///
/// # Panics
///
/// Panics if the input slice is empty.
pub fn center_cov(pts: &[Point3<Real>]) -> (Point3<Real>, Matrix3<Real>) {
    let center = center(pts);
    let mut cov: Matrix3<Real> = na::zero();
    let normalizer: Real = 1.0 / (pts.len() as Real);

    for p in pts.iter() {
        let cp = *p - center;
        // NOTE: this is more numerically stable than using cov.syger.
        cov += cp * (cp * normalizer).transpose();
    }

    (center, cov)
}
