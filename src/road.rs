use crate::math::{Point2d, Polygon};
use crate::util::Interval;
use smallvec::smallvec;

/// How far the road extends up and down the screen.
const ROAD_EXTENT: f64 = 1_000_000.0;

/// A straight road running up the screen, divided into equal lanes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    /// The x coordinates of the left and right edges.
    edges: Interval<f64>,
    /// The number of lanes.
    lane_count: usize,
}

impl Road {
    /// Creates a new road.
    ///
    /// # Panics
    /// Panics if `lane_count` is zero.
    pub fn new(centre_x: f64, width: f64, lane_count: usize) -> Self {
        assert!(lane_count > 0, "Road must have at least one lane");
        Self {
            edges: Interval::new(centre_x - 0.5 * width, centre_x + 0.5 * width),
            lane_count,
        }
    }

    /// The width of the road.
    pub fn width(&self) -> f64 {
        self.edges.length()
    }

    /// The x coordinate of the middle of the road.
    pub fn centre(&self) -> f64 {
        self.edges.midpoint()
    }

    /// The number of lanes.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// The x coordinate of the centre of the given lane, counting from the left.
    /// Lanes beyond the last one are clamped to the rightmost lane.
    pub fn lane_centre(&self, lane: usize) -> f64 {
        let lane_width = self.width() / self.lane_count as f64;
        let lane = usize::min(lane, self.lane_count - 1);
        self.edges.min + 0.5 * lane_width + lane as f64 * lane_width
    }

    /// Whether an x coordinate lies on the road.
    pub fn contains(&self, x: f64) -> bool {
        self.edges.contains(x)
    }

    /// The left and right edges of the road, as line segments.
    pub fn borders(&self) -> Vec<Polygon> {
        self.edges
            .as_array()
            .iter()
            .map(|x| smallvec![Point2d::new(*x, -ROAD_EXTENT), Point2d::new(*x, ROAD_EXTENT)])
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn lanes() {
        let road = Road::new(100.0, 180.0, 3);
        assert_approx_eq!(road.width(), 180.0);
        assert_approx_eq!(road.centre(), 100.0);
        assert_approx_eq!(road.lane_centre(0), 40.0);
        assert_approx_eq!(road.lane_centre(1), 100.0);
        assert_approx_eq!(road.lane_centre(2), 160.0);
        assert_approx_eq!(road.lane_centre(7), 160.0);
        assert!(road.contains(15.0));
        assert!(!road.contains(195.0));
    }

    #[test]
    fn borders() {
        let road = Road::new(0.0, 100.0, 2);
        let borders = road.borders();
        assert_eq!(borders.len(), 2);
        assert_eq!(borders[0][0].x, -50.0);
        assert_eq!(borders[1][1].x, 50.0);
        assert_eq!(borders[1][1].y, ROAD_EXTENT);
    }
}
