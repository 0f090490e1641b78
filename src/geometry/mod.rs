//! Lines, planes, polygons, and circles.
//!
//! Lines are parameterized by two points `a` and `b`, with `a` at parameter
//! `0` and `b` at parameter `1`. Whether a line extends past `a` or `b` is
//! given separately by [`Bounds`], so a single [`Line`] value can be queried
//! as a line, a ray, or a segment.

pub use self::circle::{
    circle_3points, circle_3points3d, circle_circle_intersection, circle_line_intersection,
};
pub use self::line::{
    is_collinear, is_collinear3, is_point_on_line, line_closest_point, line_from_points,
    line_normal, noncollinear_triple, point_line_distance, point_segment_distance,
    segment_closest_points, segment_distance, Bounds, Line,
};
pub use self::line_intersection::{
    general_line_intersection, line_intersection, line_line_intersection, line_ray_intersection,
    line_segment_intersection, ray_line_intersection, ray_ray_intersection,
    ray_segment_intersection, segment_line_intersection, segment_ray_intersection,
    segment_segment_intersection,
};
pub use self::plane::{
    are_points_on_plane, is_coplanar, is_point_above_plane, plane3pt, plane3pt_indexed,
    plane_closest_point, plane_from_normal, plane_from_points, plane_from_polygon,
    plane_intersection, plane_intersection3, plane_line_angle, plane_line_intersection,
    plane_normal, plane_offset, point_plane_distance, Plane, PlaneFrame, PlaneLineIntersection,
};
pub use self::point_in_polygon::{point_in_polygon, PointContainment};
pub use self::polygon::{
    align_polygon, are_polygons_equal, ccw_polygon, centroid, centroid3d, clockwise_polygon,
    is_polygon_clockwise, is_polygon_convex, polygon_area, polygon_area3d, polygon_normal,
    reindex_polygon, reverse_polygon,
};
pub use self::polygon_line_intersection::{
    polygon_line_intersection, polygon_line_intersection2d, PolygonLineIntersection,
};

mod circle;
mod line;
mod line_intersection;
mod plane;
mod point_in_polygon;
mod polygon;
mod polygon_line_intersection;
