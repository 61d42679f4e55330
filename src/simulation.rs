#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::math::Polygon;
use crate::vehicle::{Vehicle, VehicleAttributes};
use crate::{VehicleId, VehicleSet};
use rand_distr::Distribution;

/// A driving simulation.
///
/// Every vehicle is updated once per [Simulation::step]. Collisions and sensors
/// see the other vehicles as they were at the start of the step, so the
/// order in which vehicles are updated never matters.
#[derive(Default)]
pub struct Simulation {
    /// The vehicles being simulated.
    vehicles: VehicleSet,
    /// The static road borders.
    borders: Vec<Polygon>,
    /// The current frame of simulation.
    frame: usize,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Simulation {
    /// Creates a new simulation.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the road borders.
    pub fn set_road_borders(&mut self, borders: Vec<Polygon>) {
        self.borders = borders;
    }

    /// Adds a road border.
    pub fn add_road_border(&mut self, border: Polygon) {
        self.borders.push(border);
    }

    /// The road borders.
    pub fn road_borders(&self) -> &[Polygon] {
        &self.borders
    }

    /// Adds a vehicle to the simulation.
    pub fn add_vehicle(&mut self, attributes: &VehicleAttributes) -> VehicleId {
        self.insert_vehicle(Vehicle::new(attributes))
    }

    /// Adds an already constructed vehicle to the simulation.
    pub fn insert_vehicle(&mut self, vehicle: Vehicle) -> VehicleId {
        self.vehicles.insert(vehicle)
    }

    /// Removes a vehicle from the simulation, returning it if it existed.
    pub fn remove_vehicle(&mut self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles.remove(id)
    }

    /// Randomly varies the maximum velocity of each vehicle. Each is multiplied by
    /// a factor sampled from a normal distribution with a mean of 1 and standard
    /// deviation of `stddev`, clamped to between 0.75 and 1.25.
    pub fn randomise_max_velocities(&mut self, stddev: f64) {
        let mut rand = rand::thread_rng();
        let distr = rand_distr::Normal::new(1.0, stddev).expect("Invalid standard deviation");
        for (_, vehicle) in &mut self.vehicles {
            let factor = distr.sample(&mut rand).clamp(0.75, 1.25);
            vehicle.set_max_vel(factor * vehicle.max_vel());
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// Autonomous vehicles neither collide with nor sense each other, so any number
    /// of them can be trained side by side through the same traffic.
    pub fn step(&mut self) {
        // Snapshot the polygons first, so every vehicle sees the same world
        let snapshot = self
            .vehicles
            .iter()
            .map(|(id, vehicle)| {
                let autopilot = vehicle.controls().is_autopilot();
                (id, autopilot, Polygon::from_buf(vehicle.polygon()))
            })
            .collect::<Vec<_>>();

        let mut traffic = Vec::with_capacity(snapshot.len());
        for (vehicle_id, vehicle) in &mut self.vehicles {
            let autopilot = vehicle.controls().is_autopilot();
            traffic.clear();
            traffic.extend(
                snapshot
                    .iter()
                    .filter(|(id, other_autopilot, _)| {
                        *id != vehicle_id && !(autopilot && *other_autopilot)
                    })
                    .map(|(_, _, polygon)| polygon.clone()),
            );
            vehicle.update(&self.borders, &traffic);
        }

        self.frame += 1;
        log::trace!(
            "frame {}: {} of {} vehicles damaged",
            self.frame,
            self.vehicles.values().filter(|v| v.damaged()).count(),
            self.vehicles.len()
        );

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Returns an iterator over all the vehicles in the simulation.
    pub fn iter_vehicles(&self) -> impl Iterator<Item = (VehicleId, &Vehicle)> {
        self.vehicles.iter()
    }

    /// Gets a reference to the vehicle with the given ID.
    pub fn get_vehicle(&self, vehicle_id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(vehicle_id)
    }

    /// Gets a mutable reference to the vehicle with the given ID.
    pub fn get_vehicle_mut(&mut self, vehicle_id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(vehicle_id)
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }
}
