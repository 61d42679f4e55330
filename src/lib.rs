pub use cgmath;
pub use controls::{ControlIntent, Controls, Key, KeyboardInput};
pub use obstacle::Obstacles;
pub use policy::{Decision, DecisionPolicy, FeedForwardNetwork, Level};
pub use render::{Colour, Surface};
pub use road::Road;
pub use sensor::{RaySensor, Sensor, SensorAttributes, SensorReading};
pub use simulation::Simulation;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key as SlotKey, KeyData};
pub use util::Interval;
pub use vehicle::{Brain, Dynamics, Pose, Role, Vehicle, VehicleAttributes};

mod controls;
mod debug;
pub mod math;
mod obstacle;
pub mod policy;
mod render;
mod road;
pub mod sensor;
mod simulation;
mod util;
mod vehicle;

new_key_type! {
    /// Unique ID of a [Vehicle].
    pub struct VehicleId;
}

type VehicleSet = SlotMap<VehicleId, Vehicle>;
