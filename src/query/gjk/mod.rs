//! The GJK algorithm for distance computation.

pub use self::cso_point::CSOPoint;
pub use self::gjk::*;
pub use self::voronoi_simplex::VoronoiSimplex;

mod cso_point;
mod gjk;
mod voronoi_simplex;
