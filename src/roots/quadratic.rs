use crate::math::{Complex, Real};
use crate::Error;
use ordered_float::OrderedFloat;

/// The roots of `a x² + b x + c`.
///
/// The two roots of a proper quadratic are computed with the numerically
/// stable form that never subtracts nearly equal quantities. If `a` is zero,
/// the equation is linear and has at most one root.
///
/// # Errors
/// Fails if all the coefficients are zero, or if one of them is not finite.
///
/// # Example
///
/// ```
/// use scadgeom::roots::quadratic_roots;
/// use scadgeom::math::Complex;
///
/// let roots = quadratic_roots(1.0, 2.0, 5.0).unwrap();
/// assert_eq!(roots, vec![Complex::new(-1.0, 2.0), Complex::new(-1.0, -2.0)]);
/// ```
pub fn quadratic_roots(a: Real, b: Real, c: Real) -> Result<Vec<Complex<Real>>, Error> {
    if [a, b, c].iter().any(|x| !x.is_finite()) {
        return Err(Error::invalid_argument(
            "a",
            format!("the coefficients [{}, {}, {}] are not all finite", a, b, c),
        ));
    }

    if a == 0.0 && b == 0.0 && c == 0.0 {
        return Err(Error::invalid_argument(
            "a",
            "the zero polynomial has infinitely many roots",
        ));
    }

    if a == 0.0 {
        if b == 0.0 {
            return Ok(vec![]);
        }

        return Ok(vec![Complex::new(-c / b, 0.0)]);
    }

    let discr = b * b - 4.0 * a * c;
    let sqrt_discr = discr.abs().sqrt();

    if discr < 0.0 {
        let re = -b / (2.0 * a);
        let im = sqrt_discr / (2.0 * a);
        return Ok(vec![Complex::new(re, im), Complex::new(re, -im)]);
    }

    let q = -0.5 * (b + sqrt_discr.copysign(b));

    if q == 0.0 {
        // Only possible if b = c = 0.
        return Ok(vec![Complex::new(0.0, 0.0); 2]);
    }

    Ok(vec![Complex::new(q / a, 0.0), Complex::new(c / q, 0.0)])
}

/// The real roots of `a x² + b x + c`, in increasing order.
///
/// A double root is reported twice.
///
/// # Errors
/// Same as [`quadratic_roots`].
pub fn quadratic_real_roots(a: Real, b: Real, c: Real) -> Result<Vec<Real>, Error> {
    let mut roots: Vec<_> = quadratic_roots(a, b, c)?
        .into_iter()
        .filter(|z| z.im == 0.0)
        .map(|z| z.re)
        .collect();
    roots.sort_unstable_by_key(|x| OrderedFloat(*x));
    Ok(roots)
}
