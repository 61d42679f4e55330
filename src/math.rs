//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use polygon::{polygon_edges, polygons_intersect, Polygon};
pub use util::*;

mod polygon;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
