use super::{segment_intersection, Point2d};
use itertools::{iproduct, Itertools};
use smallvec::SmallVec;

/// A closed polygon, given as an ordered sequence of points.
///
/// The last point connects back to the first. A polygon with two points is a
/// line segment.
pub type Polygon = SmallVec<[Point2d; 4]>;

/// Iterates over the edges of a closed polygon, including the closing edge.
pub fn polygon_edges(points: &[Point2d]) -> impl Iterator<Item = (Point2d, Point2d)> + '_ {
    points.iter().copied().circular_tuple_windows()
}

/// Determines whether any edge of polygon `a` crosses any edge of polygon `b`.
///
/// Works with either winding order. Zero-length and parallel edges are
/// skipped, so degenerate or empty polygons never intersect anything.
/// A polygon lying entirely inside another does not count as intersecting.
pub fn polygons_intersect(a: &[Point2d], b: &[Point2d]) -> bool {
    iproduct!(polygon_edges(a), polygon_edges(b).collect_vec())
        .any(|((a0, a1), (b0, b1))| segment_intersection(a0, a1, b0, b1).is_some())
}
