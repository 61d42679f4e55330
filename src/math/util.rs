use super::{Point2d, Vector2d};

/// The point at which two line segments cross.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// The world space coordinates of the crossing.
    pub point: Point2d,
    /// How far along the first segment the crossing lies, from 0 to 1.
    pub offset: f64,
}

/// A unit vector pointing along the given heading.
///
/// A heading of zero points towards negative y ("up" on a screen whose y axis
/// points down), and increasing the heading turns anticlockwise on screen.
pub fn heading_vector(angle: f64) -> Vector2d {
    Vector2d::new(-angle.sin(), -angle.cos())
}

/// Finds the intersection of the segments `a0`-`a1` and `b0`-`b1`.
///
/// Parallel segments, including zero-length ones, never intersect.
/// Touching at an end point counts as an intersection.
pub fn segment_intersection(
    a0: Point2d,
    a1: Point2d,
    b0: Point2d,
    b1: Point2d,
) -> Option<Intersection> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = db.y * da.x - db.x * da.y;
    if denom == 0.0 {
        return None;
    }

    let t = (db.x * (a0.y - b0.y) - db.y * (a0.x - b0.x)) / denom;
    let u = ((b0.y - a0.y) * (a0.x - a1.x) - (b0.x - a0.x) * (a0.y - a1.y)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Intersection {
            point: a0 + da * t,
            offset: t,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn crossing_segments() {
        let hit = segment_intersection(
            Point2d::new(-1.0, 0.0),
            Point2d::new(3.0, 0.0),
            Point2d::new(0.0, -1.0),
            Point2d::new(0.0, 1.0),
        )
        .unwrap();
        assert_approx_eq!(hit.offset, 0.25);
        assert_approx_eq!(hit.point.x, 0.0);
        assert_approx_eq!(hit.point.y, 0.0);
    }

    #[test]
    fn disjoint_segments() {
        let hit = segment_intersection(
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(2.0, -1.0),
            Point2d::new(2.0, 1.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn parallel_and_degenerate_segments() {
        let a0 = Point2d::new(0.0, 0.0);
        let a1 = Point2d::new(1.0, 0.0);
        assert_eq!(
            segment_intersection(a0, a1, Point2d::new(0.0, 1.0), Point2d::new(1.0, 1.0)),
            None
        );
        assert_eq!(segment_intersection(a0, a1, a0, a0), None);
    }

    #[test]
    fn heading_zero_points_up() {
        let dir = heading_vector(0.0);
        assert_approx_eq!(dir.x, 0.0);
        assert_approx_eq!(dir.y, -1.0);

        let dir = heading_vector(std::f64::consts::FRAC_PI_2);
        assert_approx_eq!(dir.x, -1.0);
        assert_approx_eq!(dir.y, 0.0);
    }
}
