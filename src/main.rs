use std::time::Instant;

use drive_sim::{Dynamics, Role, Road, Simulation, VehicleAttributes};

/// Number of autonomous cars racing through the traffic.
const NUM_CARS: usize = 100;

/// Number of frames to simulate.
const NUM_FRAMES: u32 = 1000;

fn main() {
    let road = Road::new(100.0, 180.0, 3);
    let mut sim = Simulation::new();
    sim.set_road_borders(road.borders());

    let car = |lane, y, max_velocity, role| VehicleAttributes {
        x: road.lane_centre(lane),
        y,
        width: 30.0,
        length: 50.0,
        max_velocity,
        role,
        dynamics: Dynamics::default(),
    };

    let traffic = [(1, -100.0), (0, -300.0), (2, -300.0), (0, -500.0), (1, -500.0)];
    for (lane, y) in traffic {
        sim.add_vehicle(&car(lane, y, 2.0, Role::Traffic));
    }
    // Autonomous cars ignore each other, so they can all start from the same spot
    for _ in 0..NUM_CARS {
        sim.add_vehicle(&car(1, 100.0, 3.0, Role::Autonomous));
    }

    println!("Simulating...");
    let start = Instant::now();
    for _ in 0..NUM_FRAMES {
        sim.step();
    }
    let frame = start.elapsed() / NUM_FRAMES;

    // Count how many cars are still driving and find the one furthest along
    let (driving, best_y) = sim
        .iter_vehicles()
        .filter(|(_, v)| v.decision().is_some())
        .fold((0, f64::INFINITY), |(driving, best), (_, v)| {
            let driving = driving + usize::from(!v.damaged());
            (driving, f64::min(best, v.position().y))
        });
    println!(
        "Avg. frame: {:?} ({} of {} cars still driving, best y = {:.1})",
        frame, driving, NUM_CARS, best_y
    );
}
