use crate::math::{Complex, Real};
use crate::Error;
use core::ops::{Add, Mul, Neg, Sub};

/// A polynomial with real coefficients.
///
/// The coefficients are stored from the highest degree to the constant term,
/// so `[1.0, -3.0, 2.0]` is `x² - 3x + 2`. Leading zero coefficients are
/// removed on construction: the zero polynomial is stored as `[0.0]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Polynomial {
    coeffs: Vec<Real>,
}

impl Polynomial {
    /// Creates a polynomial from its coefficients, highest degree first.
    pub fn new(coeffs: impl Into<Vec<Real>>) -> Self {
        let mut coeffs = coeffs.into();
        let first_nonzero = coeffs.iter().position(|c| *c != 0.0).unwrap_or(coeffs.len());
        let _ = coeffs.drain(..first_nonzero);

        if coeffs.is_empty() {
            coeffs.push(0.0);
        }

        Polynomial { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Polynomial { coeffs: vec![0.0] }
    }

    /// The monic polynomial with the given real roots.
    pub fn from_roots(roots: &[Real]) -> Self {
        roots.iter().fold(Polynomial::new([1.0]), |acc, root| {
            &acc * &Polynomial::new([1.0, -*root])
        })
    }

    /// The coefficients of this polynomial, highest degree first.
    #[inline]
    pub fn coeffs(&self) -> &[Real] {
        &self.coeffs
    }

    /// The degree of this polynomial. The zero polynomial has degree zero.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Is this the zero polynomial?
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs == [0.0]
    }

    /// The coefficient of the highest-degree term.
    #[inline]
    pub fn leading_coefficient(&self) -> Real {
        self.coeffs[0]
    }

    /// Evaluates this polynomial at `x`.
    pub fn eval(&self, x: Real) -> Real {
        self.coeffs.iter().fold(0.0, |acc, c| acc * x + *c)
    }

    /// Evaluates this polynomial at the complex number `z`.
    pub fn eval_complex(&self, z: Complex<Real>) -> Complex<Real> {
        self.coeffs
            .iter()
            .fold(Complex::new(0.0, 0.0), |acc, c| acc * z + *c)
    }

    /// The derivative of this polynomial.
    pub fn derivative(&self) -> Polynomial {
        let n = self.degree();
        Polynomial::new(
            self.coeffs[..n]
                .iter()
                .enumerate()
                .map(|(i, c)| c * (n - i) as Real)
                .collect::<Vec<_>>(),
        )
    }

    /// Divides this polynomial by `divisor`, returning the quotient and the
    /// remainder.
    ///
    /// # Errors
    /// Fails if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial), Error> {
        if divisor.is_zero() {
            return Err(Error::invalid_argument(
                "divisor",
                "cannot divide by the zero polynomial",
            ));
        }

        let (n, m) = (self.degree(), divisor.degree());

        if n < m {
            return Ok((Polynomial::zero(), self.clone()));
        }

        let lead = divisor.leading_coefficient();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![0.0; n - m + 1];

        for i in 0..=n - m {
            let q = rem[i] / lead;
            quot[i] = q;

            for (j, d) in divisor.coeffs.iter().enumerate() {
                rem[i + j] -= q * d;
            }
        }

        Ok((Polynomial::new(quot), Polynomial::new(rem.split_off(n - m + 1))))
    }

    /// Multiplies each coefficient by `s`.
    pub fn scale(&self, s: Real) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|c| c * s).collect::<Vec<_>>())
    }
}

impl<'a> Add<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &'a Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut coeffs = vec![0.0; len];

        for (dst, c) in coeffs[len - self.coeffs.len()..].iter_mut().zip(&self.coeffs) {
            *dst += c;
        }
        for (dst, c) in coeffs[len - rhs.coeffs.len()..].iter_mut().zip(&rhs.coeffs) {
            *dst += c;
        }

        Polynomial::new(coeffs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl<'a> Sub<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &'a Polynomial) -> Polynomial {
        self + &-rhs
    }
}

impl<'a> Mul<&'a Polynomial> for &'a Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'a Polynomial) -> Polynomial {
        let mut coeffs = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }

        Polynomial::new(coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        let p = Polynomial::new([0.0, 0.0, 1.0, 2.0]);
        assert_eq!(p.coeffs(), &[1.0, 2.0]);
        assert_eq!(p.degree(), 1);
        assert!(Polynomial::new(vec![]).is_zero());
        assert!(Polynomial::new([0.0, 0.0]).is_zero());
        assert_eq!(Polynomial::zero().degree(), 0);
    }

    #[test]
    fn evaluation() {
        let p = Polynomial::new([1.0, -6.0, 11.0, -6.0]);
        assert_eq!(p.eval(1.0), 0.0);
        assert_eq!(p.eval(4.0), 6.0);

        let z = p.eval_complex(Complex::new(0.0, 1.0));
        assert_eq!(z, Complex::new(0.0, 10.0));
    }

    #[test]
    fn arithmetic() {
        let p = Polynomial::new([1.0, 2.0]);
        let q = Polynomial::new([1.0, -1.0, 3.0]);

        assert_eq!((&p + &q).coeffs(), &[1.0, 0.0, 5.0]);
        assert_eq!((&q - &q), Polynomial::zero());
        assert_eq!((&p * &q).coeffs(), &[1.0, 1.0, 1.0, 6.0]);
        assert_eq!(q.derivative().coeffs(), &[2.0, -1.0]);
        assert_eq!(Polynomial::new([5.0]).derivative(), Polynomial::zero());
        assert_eq!(
            Polynomial::from_roots(&[1.0, 2.0, 3.0]),
            Polynomial::new([1.0, -6.0, 11.0, -6.0])
        );
    }

    #[test]
    fn division() {
        let p = Polynomial::new([1.0, -6.0, 11.0, -6.0]);
        let (q, r) = p.div_rem(&Polynomial::new([1.0, -1.0])).unwrap();
        assert_eq!(q.coeffs(), &[1.0, -5.0, 6.0]);
        assert!(r.is_zero());

        let (q, r) = p.div_rem(&Polynomial::new([2.0, 0.0, 0.0])).unwrap();
        assert_eq!(q.coeffs(), &[0.5, -3.0]);
        assert_eq!(r.coeffs(), &[11.0, -6.0]);

        let (q, r) = Polynomial::new([1.0, 2.0]).div_rem(&p).unwrap();
        assert!(q.is_zero());
        assert_eq!(r.coeffs(), &[1.0, 2.0]);

        assert!(p.div_rem(&Polynomial::zero()).is_err());
    }
}
