use crate::error::check_eps;
use crate::math::Real;
use crate::Error;

/// The maximum number of iterations of [`root_find`].
pub const MAX_ITERATIONS: usize = 100;

fn checked_eval(f: &mut impl FnMut(Real) -> Real, x: Real) -> Result<Real, Error> {
    let fx = f(x);

    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(Error::invalid_argument(
            "f",
            format!("the function value at {} is not finite: {}", x, fx),
        ))
    }
}

/// Finds a root of a continuous function in the bracket `[x0, x1]`.
///
/// This is Brent's method: it combines inverse quadratic interpolation and
/// secant steps, and falls back to bisection whenever these would leave the
/// bracket or shrink it too slowly. It stops when the bracket is narrower
/// than `tol`, up to the floating-point resolution at the root.
///
/// # Errors
/// Fails if `f(x0)` and `f(x1)` have the same sign, if `f` returns a
/// non-finite value, if `tol` is not a valid tolerance, or if the bracket
/// did not shrink enough after [`MAX_ITERATIONS`] iterations.
///
/// # Example
///
/// ```
/// use scadgeom::roots::root_find;
///
/// let root = root_find(|x| x * x - 2.0, 0.0, 2.0, 1.0e-15).unwrap();
/// assert!((root - 2.0f64.sqrt()).abs() < 1.0e-14);
/// ```
pub fn root_find<F>(mut f: F, x0: Real, x1: Real, tol: Real) -> Result<Real, Error>
where
    F: FnMut(Real) -> Real,
{
    check_eps(tol)?;

    let (mut a, mut b) = (x0, x1);
    let mut fa = checked_eval(&mut f, a)?;
    let mut fb = checked_eval(&mut f, b)?;

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    if fa.signum() == fb.signum() {
        return Err(Error::invalid_argument(
            "x1",
            format!(
                "[{}, {}] is not a bracket: f({}) = {} and f({}) = {} have the same sign",
                x0, x1, x0, fa, x1, fb
            ),
        ));
    }

    // `b` is the best estimate, `c` is the other end of the bracket, and `a`
    // is the previous value of `b`.
    let (mut c, mut fc) = (b, fb);
    let (mut d, mut e) = (b - a, b - a);

    for _ in 0..MAX_ITERATIONS {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * Real::EPSILON * b.abs() + 0.5 * tol;
        let xm = 0.5 * (c - b);

        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant.
                (2.0 * xm * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation.
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();

            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol1 { d } else { tol1.copysign(xm) };
        fb = checked_eval(&mut f, b)?;
    }

    log::warn!(
        "Brent's method did not converge after {} iterations, root estimate: {}",
        MAX_ITERATIONS,
        b
    );
    Err(Error::NoConvergence {
        algorithm: "Brent",
        iterations: MAX_ITERATIONS,
        estimate: format!("root {}", b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_roots() {
        let root = root_find(|x| x.cos() - x, 0.0, 1.0, 1.0e-14).unwrap();
        assert_relative_eq!(root, 0.739_085_133_215_160_6, epsilon = 1.0e-13);

        let root = root_find(|x| x * x * x - 2.0 * x - 5.0, 3.0, 2.0, 1.0e-14).unwrap();
        assert_relative_eq!(root, 2.094_551_481_542_326_5, epsilon = 1.0e-13);
    }

    #[test]
    fn endpoints_can_be_roots() {
        assert_eq!(root_find(|x| x - 1.0, 1.0, 4.0, 1.0e-12).unwrap(), 1.0);
        assert_eq!(root_find(|x| x - 4.0, 1.0, 4.0, 1.0e-12).unwrap(), 4.0);
    }

    #[test]
    fn discontinuous_sign_change() {
        // There is no root, but the sign change is located anyway.
        let step = |x: Real| if x < 0.3 { -1.0 } else { 1.0 };
        let x = root_find(step, 0.0, 1.0, 1.0e-10).unwrap();
        assert!((x - 0.3).abs() < 1.0e-9);
    }

    #[test]
    fn invalid_bracket() {
        let err = root_find(|x| x * x + 1.0, -1.0, 1.0, 1.0e-12).unwrap_err();
        assert!(err.is_invalid_argument());

        assert!(root_find(|x| 1.0 / x, 0.0, 1.0, 1.0e-12).is_err());
        assert!(root_find(|x| x, -1.0, 1.0, Real::NAN).is_err());
    }
}
