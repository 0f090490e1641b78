//! Point-cloud helpers shared by the geometric queries.

pub use self::center::center;
pub use self::cov::{center_cov, cov};
pub use self::point_cloud_support_point::{
    furthest_point_id, point_cloud_support_point, point_cloud_support_point_id,
};

mod center;
mod cov;
mod point_cloud_support_point;
