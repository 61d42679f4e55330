//! Tests that involve several vehicles sharing a road.

use drive_sim::{
    Brain, Dynamics, FeedForwardNetwork, Key, KeyboardInput, Level, RaySensor, Road, Role,
    Simulation, Vehicle, VehicleAttributes,
};

fn car(x: f64, y: f64, max_velocity: f64, role: Role) -> VehicleAttributes {
    VehicleAttributes {
        x,
        y,
        width: 30.0,
        length: 50.0,
        max_velocity,
        role,
        dynamics: Dynamics::default(),
    }
}

/// A network which accelerates while the middle ray is clear beyond half its length,
/// and brakes by reversing otherwise.
fn cautious_network() -> FeedForwardNetwork {
    let mut weights = vec![vec![0.0; 4]; 5];
    weights[2] = vec![-1.0, 0.0, 0.0, 1.0];
    let level = Level::from_parameters(weights, vec![-0.5, 0.0, 0.0, 0.5]);
    FeedForwardNetwork::from_levels(vec![level])
}

/// Test that an autonomous car follows slower traffic without hitting it.
#[test]
fn autonomous_car_follows_traffic() {
    let road = Road::new(100.0, 180.0, 3);
    let mut sim = Simulation::new();
    sim.set_road_borders(road.borders());

    let lane = road.lane_centre(1);
    let leader = sim.add_vehicle(&car(lane, -100.0, 1.0, Role::Traffic));
    let brain = Brain::new(RaySensor::default(), cautious_network());
    let follower = sim.insert_vehicle(Vehicle::with_brain(
        &car(lane, 100.0, 3.0, Role::Autonomous),
        brain,
    ));

    for _ in 0..500 {
        sim.step();
        let follower = sim.get_vehicle(follower).unwrap();
        assert!(!follower.damaged(), "crashed on frame {}", sim.frame());
    }

    let leader = sim.get_vehicle(leader).unwrap();
    let follower = sim.get_vehicle(follower).unwrap();
    assert!(!leader.damaged());
    assert!(follower.position().y < -100.0);
    assert!(follower.position().y > leader.position().y + 50.0);
}

/// Test that a human driven car in a simulation responds to the shared keyboard state.
#[test]
fn keyboard_drives_car_in_simulation() {
    let input = KeyboardInput::new();
    let mut sim = Simulation::new();
    let id = sim.add_vehicle(&car(0.0, 0.0, 3.0, Role::Human(input.clone())));

    sim.step();
    assert_eq!(sim.get_vehicle(id).unwrap().vel(), 0.0);

    input.key_down(Key::Up);
    for _ in 0..5 {
        sim.step();
    }
    input.key_up(Key::Up);
    let vehicle = sim.get_vehicle(id).unwrap();
    assert!(vehicle.vel() > 0.7 && vehicle.vel() < 0.8);
    assert!(vehicle.decision().is_some());

    input.key_down(Key::Down);
    for _ in 0..20 {
        sim.step();
    }
    assert!(sim.get_vehicle(id).unwrap().vel() < 0.0);
}

/// Test that every traffic car in an overlapping start crashes into its neighbours straight away.
#[test]
fn pile_up() {
    let mut sim = Simulation::new();
    let ids = (0..4)
        .map(|i| sim.add_vehicle(&car(20.0 * i as f64, 0.0, 3.0, Role::Traffic)))
        .collect::<Vec<_>>();
    sim.step();
    for id in ids {
        assert!(sim.get_vehicle(id).unwrap().damaged());
    }
}

/// Test that a crowd of autonomous cars sharing a start position only crash into
/// traffic, never into each other.
#[test]
fn autonomous_crowd_shares_the_road() {
    let road = Road::new(100.0, 180.0, 3);
    let mut sim = Simulation::new();
    sim.set_road_borders(road.borders());

    let lane = road.lane_centre(1);
    let leader = sim.add_vehicle(&car(lane, -100.0, 2.0, Role::Traffic));
    let crowd = (0..100)
        .map(|_| sim.add_vehicle(&car(lane, 100.0, 3.0, Role::Autonomous)))
        .collect::<Vec<_>>();

    sim.step();
    assert!(crowd
        .iter()
        .all(|id| !sim.get_vehicle(*id).unwrap().damaged()));
    assert!(!sim.get_vehicle(leader).unwrap().damaged());
}
