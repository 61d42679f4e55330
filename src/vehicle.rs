pub use self::dynamics::Dynamics;
use self::dynamics::{bounding_polygon, integrate};
use crate::controls::{ControlIntent, Controls, KeyboardInput};
use crate::debug::debug_polygon;
use crate::math::{Point2d, Polygon};
use crate::policy::{Decision, DecisionPolicy, FeedForwardNetwork, OUTPUT_COUNT};
use crate::render::{Colour, Surface};
use crate::sensor::{policy_inputs, RaySensor, Sensor, SensorReading};
use crate::Obstacles;
use std::fmt;

mod dynamics;

/// The number of hidden neurons in the default decision network.
const HIDDEN_NEURONS: usize = 6;

/// The position and heading of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// The world space coordinates of the centre of the vehicle.
    pub position: Point2d,
    /// The heading in radians. Zero faces negative y, and
    /// increasing values turn anticlockwise on screen.
    pub angle: f64,
}

/// Who is driving a vehicle.
#[derive(Clone, Debug)]
pub enum Role {
    /// A person, through the given keyboard state.
    Human(KeyboardInput),
    /// Scripted traffic which drives straight ahead.
    Traffic,
    /// The vehicle's own decision policy.
    Autonomous,
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Debug)]
pub struct VehicleAttributes {
    /// The initial x coordinate of the centre of the vehicle.
    pub x: f64,
    /// The initial y coordinate of the centre of the vehicle.
    pub y: f64,
    /// The vehicle width.
    pub width: f64,
    /// The vehicle length.
    pub length: f64,
    /// The maximum forward velocity, in units per frame.
    pub max_velocity: f64,
    /// Who drives the vehicle.
    pub role: Role,
    /// The vehicle's handling characteristics.
    pub dynamics: Dynamics,
}

/// A sensor paired with the decision policy it feeds.
pub struct Brain {
    sensor: Box<dyn Sensor>,
    policy: Box<dyn DecisionPolicy>,
    /// The policy outputs from the latest update.
    decision: Option<Decision>,
}

impl Brain {
    /// Creates a new brain.
    pub fn new(sensor: impl Sensor + 'static, policy: impl DecisionPolicy + 'static) -> Self {
        Self {
            sensor: Box::new(sensor),
            policy: Box::new(policy),
            decision: None,
        }
    }

    /// Creates the default brain: a [RaySensor] feeding a randomly initialised network.
    pub fn random() -> Self {
        let sensor = RaySensor::default();
        let layers = [sensor.ray_count(), HIDDEN_NEURONS, OUTPUT_COUNT];
        let network = FeedForwardNetwork::random(&layers, &mut rand::thread_rng());
        Self::new(sensor, network)
    }

    /// Refreshes the sensor and runs the policy on its readings.
    fn decide(&mut self, pose: Pose, obstacles: &Obstacles) -> Decision {
        let readings = self.sensor.refresh(pose, obstacles);
        let decision = self.policy.infer(&policy_inputs(readings));
        self.decision = Some(decision);
        decision
    }
}

/// A simulated vehicle.
pub struct Vehicle {
    /// The vehicle's position and heading.
    pose: Pose,
    /// Half the vehicle's width.
    half_wid: f64,
    /// Half the vehicle's length.
    half_len: f64,
    /// The velocity in units per frame, negative when reversing.
    vel: f64,
    /// The maximum forward velocity.
    max_vel: f64,
    /// The handling characteristics.
    dynamics: Dynamics,
    /// Whether the vehicle has crashed. Crashed vehicles never move again.
    damaged: bool,
    /// Where the control intent comes from.
    controls: Controls,
    /// The corners of the vehicle.
    polygon: [Point2d; 4],
    /// The sensor and decision policy, if the vehicle has them.
    brain: Option<Brain>,
}

impl Vehicle {
    /// Creates a new vehicle.
    ///
    /// Human and autonomous vehicles get the default [Brain];
    /// traffic has no sensor or policy.
    pub fn new(attributes: &VehicleAttributes) -> Self {
        let brain = match attributes.role {
            Role::Traffic => None,
            Role::Human(_) | Role::Autonomous => Some(Brain::random()),
        };
        Self::build(attributes, brain)
    }

    /// Creates a new vehicle with the given sensor and decision policy,
    /// whatever its role. The policy only drives the vehicle if it is autonomous.
    pub fn with_brain(attributes: &VehicleAttributes, brain: Brain) -> Self {
        Self::build(attributes, Some(brain))
    }

    fn build(attributes: &VehicleAttributes, brain: Option<Brain>) -> Self {
        let pose = Pose {
            position: Point2d::new(attributes.x, attributes.y),
            angle: 0.0,
        };
        let controls = match &attributes.role {
            Role::Human(input) => Controls::Keyboard(input.clone()),
            Role::Traffic => Controls::Traffic,
            Role::Autonomous => Controls::Autopilot(ControlIntent::default()),
        };
        Self {
            pose,
            half_wid: 0.5 * attributes.width,
            half_len: 0.5 * attributes.length,
            vel: 0.0,
            max_vel: attributes.max_velocity,
            dynamics: attributes.dynamics,
            damaged: false,
            controls,
            polygon: bounding_polygon(pose, attributes.width, attributes.length),
            brain,
        }
    }

    /// The vehicle's width.
    pub fn width(&self) -> f64 {
        2.0 * self.half_wid
    }

    /// The vehicle's length.
    pub fn length(&self) -> f64 {
        2.0 * self.half_len
    }

    /// The vehicle's position and heading.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.pose.position
    }

    /// The vehicle's velocity in units per frame.
    pub fn vel(&self) -> f64 {
        self.vel
    }

    /// The vehicle's maximum forward velocity.
    pub fn max_vel(&self) -> f64 {
        self.max_vel
    }

    /// Sets the vehicle's maximum forward velocity.
    pub fn set_max_vel(&mut self, max_vel: f64) {
        self.max_vel = max_vel;
    }

    /// Whether the vehicle has collided with something.
    pub fn damaged(&self) -> bool {
        self.damaged
    }

    /// The corners of the vehicle's bounding rectangle, in order around its edge.
    pub fn polygon(&self) -> [Point2d; 4] {
        self.polygon
    }

    /// The source of the vehicle's control intent.
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// The readings from the vehicle's sensor, if it has one.
    pub fn sensor_readings(&self) -> Option<&[Option<SensorReading>]> {
        self.brain.as_ref().map(|brain| brain.sensor.readings())
    }

    /// The outputs of the decision policy from the latest update,
    /// available whether or not they were used to drive.
    pub fn decision(&self) -> Option<Decision> {
        self.brain.as_ref().and_then(|brain| brain.decision)
    }

    /// Advances the vehicle by one frame.
    ///
    /// Moves the vehicle and checks it for collisions, unless it is already damaged.
    /// Then, if it has a sensor, refreshes it and runs the decision policy, which
    /// sets the controls for the next frame if the vehicle is autonomous.
    ///
    /// # Parameters
    /// * `road_borders` - The road borders
    /// * `traffic` - The bounding polygons of the other vehicles, excluding this one
    pub fn update(&mut self, road_borders: &[Polygon], traffic: &[Polygon]) {
        let obstacles = Obstacles::new(road_borders, traffic);

        if !self.damaged {
            self.integrate();
            self.damaged = obstacles.hit_by(&self.polygon);
            if self.damaged {
                log::debug!(
                    "vehicle damaged at ({:.1}, {:.1})",
                    self.pose.position.x,
                    self.pose.position.y
                );
                debug_polygon("damaged", &self.polygon);
            }
        }

        if let Some(brain) = &mut self.brain {
            let decision = brain.decide(self.pose, &obstacles);
            self.controls.apply_decision(&decision);
        }
    }

    /// Advances the vehicle by one frame among the given vehicles,
    /// which must not include this one.
    pub fn update_among(&mut self, road_borders: &[Polygon], others: &[Vehicle]) {
        let traffic = others
            .iter()
            .map(|other| Polygon::from_buf(other.polygon))
            .collect::<Vec<_>>();
        self.update(road_borders, &traffic);
    }

    /// Draws the vehicle, in grey if it is damaged, followed by its sensor rays.
    ///
    /// Each ray is drawn yellow up to the obstacle it detected and black beyond it.
    pub fn draw(&self, surface: &mut impl Surface, colour: Colour) {
        let fill = if self.damaged { Colour::GREY } else { colour };
        surface.fill_polygon(&self.polygon, fill);

        if let Some(brain) = &self.brain {
            let readings = brain.sensor.readings();
            for (ray, reading) in brain.sensor.rays().iter().zip(readings) {
                let end = reading.map_or(ray[1], |r| r.point);
                surface.stroke_line(ray[0], end, Colour::YELLOW);
                surface.stroke_line(end, ray[1], Colour::BLACK);
            }
        }
    }

    /// Integrates the vehicle's velocity and pose, then rebuilds its polygon.
    fn integrate(&mut self) {
        let intent = self.controls.intent();
        let (pose, vel) = integrate(self.pose, self.vel, self.max_vel, intent, &self.dynamics);
        self.pose = pose;
        self.vel = vel;
        self.polygon = bounding_polygon(pose, self.width(), self.length());
    }
}

impl fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle")
            .field("pose", &self.pose)
            .field("vel", &self.vel)
            .field("damaged", &self.damaged)
            .field("controls", &self.controls)
            .field("has_brain", &self.brain.is_some())
            .finish()
    }
}
