use crate::debug::debug_line;
use crate::math::{heading_vector, segment_intersection, Intersection, Point2d};
use crate::util::Interval;
use crate::vehicle::Pose;
use crate::Obstacles;
use smallvec::SmallVec;

/// A single sensor reading: where a ray first met an obstacle,
/// and how far along the ray that was, from 0 (at the vehicle) to 1 (at full range).
pub type SensorReading = Intersection;

/// Values fed to a decision policy, one per sensor ray.
pub type PolicyInputs = SmallVec<[f64; 8]>;

/// A sensor which perceives obstacles around a vehicle.
pub trait Sensor {
    /// The number of readings produced by each refresh.
    fn ray_count(&self) -> usize;

    /// Recomputes all readings from scratch for the given pose.
    /// Returns exactly [Sensor::ray_count] readings, `None` where nothing was detected.
    fn refresh(&mut self, pose: Pose, obstacles: &Obstacles) -> &[Option<SensorReading>];

    /// The readings from the most recent refresh.
    fn readings(&self) -> &[Option<SensorReading>];

    /// The world space rays cast by the most recent refresh, for drawing.
    fn rays(&self) -> &[[Point2d; 2]] {
        &[]
    }
}

/// Converts sensor readings into decision policy inputs.
///
/// A missing reading becomes 0 and a present one becomes `1 - offset`,
/// so closer obstacles produce larger values.
pub fn policy_inputs(readings: &[Option<SensorReading>]) -> PolicyInputs {
    readings
        .iter()
        .map(|reading| reading.map_or(0.0, |r| 1.0 - r.offset))
        .collect()
}

/// The attributes of a [RaySensor].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorAttributes {
    /// The number of rays.
    pub ray_count: usize,
    /// The length of each ray, in world units.
    pub ray_length: f64,
    /// The angle between the outermost rays, in radians.
    pub ray_spread: f64,
}

impl Default for SensorAttributes {
    fn default() -> Self {
        Self {
            ray_count: 5,
            ray_length: 150.0,
            ray_spread: std::f64::consts::FRAC_PI_2,
        }
    }
}

/// A sensor which casts a fan of rays forward from the centre of the vehicle.
#[derive(Clone, Debug)]
pub struct RaySensor {
    attribs: SensorAttributes,
    rays: Vec<[Point2d; 2]>,
    readings: Vec<Option<SensorReading>>,
}

impl RaySensor {
    /// Creates a new ray sensor.
    pub fn new(attribs: &SensorAttributes) -> Self {
        Self {
            attribs: *attribs,
            rays: Vec::with_capacity(attribs.ray_count),
            readings: vec![None; attribs.ray_count],
        }
    }

    /// The length of each ray.
    pub fn ray_length(&self) -> f64 {
        self.attribs.ray_length
    }

    /// Casts the rays from the given pose. The first ray is the leftmost.
    fn cast_rays(&mut self, pose: Pose) {
        let SensorAttributes {
            ray_count,
            ray_length,
            ray_spread,
        } = self.attribs;
        let angles = Interval::new(0.5 * ray_spread, -0.5 * ray_spread);

        self.rays.clear();
        self.rays.extend((0..ray_count).map(|i| {
            let t = if ray_count == 1 {
                0.5
            } else {
                i as f64 / (ray_count - 1) as f64
            };
            let dir = heading_vector(angles.lerp(t) + pose.angle);
            [pose.position, pose.position + ray_length * dir]
        }));
    }

    /// Finds the closest obstacle along a ray.
    fn read_ray(ray: &[Point2d; 2], obstacles: &Obstacles) -> Option<SensorReading> {
        obstacles
            .edges()
            .filter_map(|(b0, b1)| segment_intersection(ray[0], ray[1], b0, b1))
            .min_by(|a, b| a.offset.total_cmp(&b.offset))
    }
}

impl Default for RaySensor {
    fn default() -> Self {
        Self::new(&Default::default())
    }
}

impl Sensor for RaySensor {
    fn ray_count(&self) -> usize {
        self.attribs.ray_count
    }

    fn refresh(&mut self, pose: Pose, obstacles: &Obstacles) -> &[Option<SensorReading>] {
        self.cast_rays(pose);
        self.readings.clear();
        for ray in &self.rays {
            let reading = Self::read_ray(ray, obstacles);
            debug_line("ray", ray[0], reading.map_or(ray[1], |r| r.point));
            self.readings.push(reading);
        }
        &self.readings
    }

    fn readings(&self) -> &[Option<SensorReading>] {
        &self.readings
    }

    fn rays(&self) -> &[[Point2d; 2]] {
        &self.rays
    }
}
