use crate::math::{polygon_edges, polygons_intersect, Point2d, Polygon};

/// Everything a vehicle can collide with or sense during a frame:
/// the static road borders and the bounding polygons of the other vehicles.
#[derive(Clone, Copy, Debug)]
pub struct Obstacles<'a> {
    /// The road borders.
    pub borders: &'a [Polygon],
    /// The bounding polygons of other vehicles, excluding the vehicle being updated.
    pub traffic: &'a [Polygon],
}

impl<'a> Obstacles<'a> {
    /// Creates a new set of obstacles.
    pub fn new(borders: &'a [Polygon], traffic: &'a [Polygon]) -> Self {
        Self { borders, traffic }
    }

    /// Iterates over every obstacle polygon, borders first.
    pub fn polygons(&self) -> impl Iterator<Item = &'a [Point2d]> {
        let Self { borders, traffic } = *self;
        borders.iter().chain(traffic).map(|poly| poly.as_slice())
    }

    /// Iterates over every obstacle edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2d, Point2d)> + 'a {
        self.polygons().flat_map(polygon_edges)
    }

    /// Checks whether the given polygon touches any obstacle.
    pub fn hit_by(&self, polygon: &[Point2d]) -> bool {
        self.polygons().any(|obstacle| polygons_intersect(polygon, obstacle))
    }
}
