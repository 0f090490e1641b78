use crate::math::Real;

/// Errors reported by the operations of this crate.
///
/// A query that is well-formed but has no answer (two parallel lines, a
/// singular linear system, a matrix that is not positive-definite, ...) is
/// never reported as an `Error`: it is returned as `None` or as a dedicated
/// outcome variant. An `Error` means either the input broke the contract of
/// the operation, or an iterative algorithm failed to converge.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An argument is malformed: wrong shape, empty where at least one element
    /// is required, not symmetric, non-finite tolerance, and so on.
    #[error("invalid argument `{arg}`: {reason}")]
    InvalidArgument {
        /// The name of the offending argument.
        arg: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },
    /// An iterative algorithm reached its iteration cap without converging.
    #[error("{algorithm} did not converge after {iterations} iterations (current estimate: {estimate})")]
    NoConvergence {
        /// The name of the algorithm that failed.
        algorithm: &'static str,
        /// The number of iterations performed.
        iterations: usize,
        /// The best estimate available when the algorithm gave up.
        estimate: String,
    },
}

impl Error {
    /// Builds an [`Error::InvalidArgument`].
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Is this a precondition violation (as opposed to a convergence failure)?
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

/// Checks that `eps` is a usable tolerance: finite and non-negative.
pub(crate) fn check_eps(eps: Real) -> Result<(), Error> {
    if eps.is_finite() && eps >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            "eps",
            format!("the tolerance must be a finite non-negative number, got {}", eps),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message() {
        let err = Error::invalid_argument("points", "at least one point is required");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument `points`: at least one point is required"
        );
    }

    #[test]
    fn eps_must_be_finite_and_non_negative() {
        assert!(check_eps(1.0e-9).is_ok());
        assert!(check_eps(0.0).is_ok());
        assert!(check_eps(-1.0).is_err());
        assert!(check_eps(Real::NAN).is_err());
        assert!(check_eps(Real::INFINITY).is_err());
    }
}
