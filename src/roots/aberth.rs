//! Simultaneous root-finding with Aberth's method.

use super::Polynomial;
use crate::error::check_eps;
use crate::math::{Complex, Real};
use crate::Error;
use core::f64::consts::TAU;
use num::{One, Zero};
use ordered_float::OrderedFloat;

/// The maximum number of Aberth iterations before [`poly_roots`] gives up.
pub const MAX_ITERATIONS: usize = 45;

/// The default relative tolerance of [`poly_roots`].
pub const DEFAULT_TOLERANCE: Real = 1.0e-14;

/// The complex roots of a polynomial, with an error bound on each root.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyRoots {
    /// The roots, repeated according to their multiplicity.
    pub roots: Vec<Complex<Real>>,
    /// `error_bounds[i]` is the radius of a disk centered at `roots[i]` that
    /// contains an exact root of the polynomial.
    pub error_bounds: Vec<Real>,
}

fn check_polynomial(p: &Polynomial) -> Result<(), Error> {
    if p.is_zero() {
        return Err(Error::invalid_argument(
            "p",
            "the zero polynomial has infinitely many roots",
        ));
    }

    if p.coeffs().iter().any(|c| !c.is_finite()) {
        return Err(Error::invalid_argument(
            "p",
            format!("the coefficients {:?} are not all finite", p.coeffs()),
        ));
    }

    Ok(())
}

/// The polynomial whose value at `|z|` bounds the rounding error of
/// evaluating `p` at `z` (Bini, 1996).
fn error_polynomial(p: &Polynomial) -> Polynomial {
    let n = p.degree();
    Polynomial::new(
        p.coeffs()
            .iter()
            .enumerate()
            .map(|(i, c)| c.abs() * (4 * (n - i) + 1) as Real)
            .collect::<Vec<_>>(),
    )
}

/// Computes all the complex roots of a polynomial.
///
/// Roots at zero are split off exactly, and degree one is solved directly.
/// Other roots are refined simultaneously with Aberth's method: starting from
/// guesses evenly spread on a circle around the mean of the roots, each guess
/// receives a Newton correction adjusted by its repulsion from the other
/// guesses. A guess stops moving once the polynomial is small enough there,
/// relative to `tol` and to the rounding error of the evaluation.
///
/// # Errors
/// Fails if `p` is the zero polynomial, if a coefficient is not finite, if
/// `tol` is not a valid tolerance, or if the roots did not converge after
/// [`MAX_ITERATIONS`] iterations.
///
/// # Example
///
/// ```
/// use scadgeom::roots::{poly_roots, Polynomial, DEFAULT_TOLERANCE};
///
/// let p = Polynomial::new([1.0, 0.0, 1.0]);
/// let res = poly_roots(&p, DEFAULT_TOLERANCE).unwrap();
///
/// assert_eq!(res.roots.len(), 2);
/// for z in &res.roots {
///     assert!(z.re.abs() < 1.0e-9);
///     assert!((z.im.abs() - 1.0).abs() < 1.0e-9);
/// }
/// ```
pub fn poly_roots(p: &Polynomial, tol: Real) -> Result<PolyRoots, Error> {
    check_polynomial(p)?;

    if !(tol.is_finite() && tol > 0.0) {
        return Err(Error::invalid_argument(
            "tol",
            format!("the tolerance must be a finite positive number, got {}", tol),
        ));
    }

    let coeffs = p.coeffs();
    let nonzero_len = coeffs.iter().rposition(|c| *c != 0.0).map_or(0, |i| i + 1);
    let num_zeros = coeffs.len() - nonzero_len;
    let mut roots = vec![Complex::<Real>::zero(); num_zeros];
    let mut error_bounds = vec![0.0; num_zeros];

    let p = Polynomial::new(&coeffs[..nonzero_len]);

    match p.degree() {
        0 => {}
        1 => {
            let c = p.coeffs();
            roots.push(Complex::new(-c[1] / c[0], 0.0));
            error_bounds.push(0.0);
        }
        _ => {
            let (z, err) = aberth(&p, tol)?;
            roots.extend(z);
            error_bounds.extend(err);
        }
    }

    Ok(PolyRoots {
        roots,
        error_bounds,
    })
}

fn aberth(p: &Polynomial, tol: Real) -> Result<(Vec<Complex<Real>>, Vec<Real>), Error> {
    let n = p.degree();
    let coeffs = p.coeffs();
    let dp = p.derivative();
    let s = error_polynomial(p);

    // The roots average to `beta`. The initial guesses are rotated off the
    // real axis to avoid the symmetry of real polynomials.
    let beta = -coeffs[1] / (coeffs[0] * n as Real);
    let radius = 1.0 + (p.eval(beta) / coeffs[0]).abs().powf(1.0 / n as Real);
    let mut z: Vec<_> = (0..n)
        .map(|i| {
            let angle = TAU * i as Real / n as Real + 1.5 / n as Real;
            Complex::new(beta, 0.0) + Complex::from_polar(radius, angle)
        })
        .collect();

    let mut iteration = 0;

    loop {
        let values: Vec<_> = z.iter().map(|zk| p.eval_complex(*zk)).collect();
        let done: Vec<_> = z
            .iter()
            .zip(&values)
            .map(|(zk, pk)| pk.norm() <= tol * s.eval(zk.norm()))
            .collect();

        if done.iter().all(|d| *d) {
            break;
        }

        if iteration == MAX_ITERATIONS {
            log::warn!(
                "Aberth's method did not converge after {} iterations, roots estimate: {:?}",
                MAX_ITERATIONS,
                z
            );
            return Err(Error::NoConvergence {
                algorithm: "Aberth",
                iterations: MAX_ITERATIONS,
                estimate: format!("roots {:?}", z),
            });
        }

        iteration += 1;

        let corrections: Vec<_> = (0..n)
            .map(|k| {
                if done[k] {
                    return Complex::<Real>::zero();
                }

                let newton = values[k] / dp.eval_complex(z[k]);
                let repulsion: Complex<Real> = (0..n)
                    .filter(|j| *j != k)
                    .map(|j| (z[k] - z[j]).inv())
                    .sum();

                newton / (Complex::<Real>::one() - newton * repulsion)
            })
            .collect();

        for (zk, wk) in z.iter_mut().zip(corrections) {
            *zk -= wk;
        }
    }

    let ds = s.derivative();
    let error_bounds = z
        .iter()
        .map(|zk| {
            let abs = zk.norm();
            n as Real * (p.eval_complex(*zk).norm() + tol * s.eval(abs))
                / (dp.eval_complex(*zk).norm() - tol * ds.eval(abs)).abs()
        })
        .collect();

    Ok((z, error_bounds))
}

/// The real roots of a polynomial, in increasing order.
///
/// The complex roots are computed by [`poly_roots`] with the tolerance
/// `tol`. If `eps` is given, a root `z` is real if `|Im z| / (1 + |z|) < eps`.
/// Otherwise, it is real if its imaginary part is within its error bound.
///
/// Repeated real roots converge slowly and their imaginary part may exceed
/// both thresholds, in which case they are not reported.
///
/// # Errors
/// Same as [`poly_roots`], and fails if `eps` is not a valid tolerance.
pub fn real_roots(p: &Polynomial, eps: Option<Real>, tol: Real) -> Result<Vec<Real>, Error> {
    if let Some(eps) = eps {
        check_eps(eps)?;
    }

    let PolyRoots {
        roots,
        error_bounds,
    } = poly_roots(p, tol)?;

    let mut res: Vec<_> = roots
        .iter()
        .zip(&error_bounds)
        .filter(|(z, err)| match eps {
            Some(eps) => z.im.abs() / (1.0 + z.norm()) < eps,
            None => z.im.abs() <= **err,
        })
        .map(|(z, _)| z.re)
        .collect();
    res.sort_unstable_by_key(|x| OrderedFloat(*x));

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_re(roots: &[Complex<Real>]) -> Vec<Real> {
        let mut re: Vec<_> = roots.iter().map(|z| z.re).collect();
        re.sort_unstable_by_key(|x| OrderedFloat(*x));
        re
    }

    #[test]
    fn cubic_with_real_roots() {
        let p = Polynomial::new([1.0, -6.0, 11.0, -6.0]);
        let res = poly_roots(&p, DEFAULT_TOLERANCE).unwrap();

        assert_eq!(res.roots.len(), 3);
        for z in &res.roots {
            assert!(z.im.abs() < 1.0e-9);
        }
        for (re, expected) in sorted_re(&res.roots).iter().zip([1.0, 2.0, 3.0]) {
            assert_relative_eq!(*re, expected, epsilon = 1.0e-9);
        }

        let real = real_roots(&p, None, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(real.len(), 3);
        assert_relative_eq!(real[0], 1.0, epsilon = 1.0e-9);
        assert_relative_eq!(real[2], 3.0, epsilon = 1.0e-9);
    }

    #[test]
    fn zero_roots_are_exact() {
        // x³ (x - 2)
        let p = Polynomial::new([1.0, -2.0, 0.0, 0.0, 0.0]);
        let res = poly_roots(&p, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(&res.roots[..3], &[Complex::new(0.0, 0.0); 3]);
        assert_eq!(res.roots[3], Complex::new(2.0, 0.0));
        assert_eq!(res.error_bounds, vec![0.0; 4]);
    }

    #[test]
    fn constants_and_linear() {
        assert!(poly_roots(&Polynomial::new([3.0]), DEFAULT_TOLERANCE)
            .unwrap()
            .roots
            .is_empty());
        assert_eq!(
            poly_roots(&Polynomial::new([2.0, 1.0]), DEFAULT_TOLERANCE)
                .unwrap()
                .roots,
            vec![Complex::new(-0.5, 0.0)]
        );
    }

    #[test]
    fn complex_roots_are_filtered() {
        // (x² + 1)(x - 4)
        let p = Polynomial::new([1.0, -4.0, 1.0, -4.0]);
        let real = real_roots(&p, None, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(real.len(), 1);
        assert_relative_eq!(real[0], 4.0, epsilon = 1.0e-9);

        let real = real_roots(&p, Some(1.0e-9), DEFAULT_TOLERANCE).unwrap();
        assert_eq!(real.len(), 1);
    }

    #[test]
    fn invalid_input() {
        let err = poly_roots(&Polynomial::zero(), DEFAULT_TOLERANCE).unwrap_err();
        assert!(err.is_invalid_argument());

        let p = Polynomial::new([1.0, Real::NAN]);
        assert!(poly_roots(&p, DEFAULT_TOLERANCE).is_err());

        let p = Polynomial::new([1.0, 1.0]);
        assert!(poly_roots(&p, 0.0).is_err());
        assert!(real_roots(&p, Some(-1.0), DEFAULT_TOLERANCE).is_err());
    }
}
