//! Polynomials and root-finding.
//!
//! Polynomials are stored with their highest-degree coefficient first. All
//! of their complex roots are computed at once by [`poly_roots`], while
//! [`root_find`] locates a single root of an arbitrary continuous function
//! inside a bracket.

pub use self::aberth::{poly_roots, real_roots, PolyRoots, DEFAULT_TOLERANCE};
pub use self::polynomial::Polynomial;
pub use self::quadratic::{quadratic_real_roots, quadratic_roots};
pub use self::root_find::root_find;

pub mod aberth;
mod polynomial;
mod quadratic;
pub mod root_find;
