use super::Pose;
use crate::controls::ControlIntent;
use crate::math::{heading_vector, Point2d};
use crate::util::Interval;
use std::f64::consts::PI;

/// The handling characteristics shared by a vehicle's motion model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dynamics {
    /// Velocity gained per frame while accelerating.
    pub acceleration: f64,
    /// Velocity lost per frame while coasting.
    pub friction: f64,
    /// Heading change per frame while steering, in radians.
    pub steer_rate: f64,
}

impl Default for Dynamics {
    fn default() -> Self {
        Self {
            acceleration: 0.2,
            friction: 0.05,
            steer_rate: 0.03,
        }
    }
}

/// Advances a vehicle by one frame.
///
/// # Parameters
/// * `pose` - The vehicle's current pose
/// * `vel` - The vehicle's current velocity; negative when reversing
/// * `max_vel` - The maximum forward velocity; reversing is capped at half of it
/// * `intent` - The controls applied this frame
/// * `dynamics` - The vehicle's handling characteristics
///
/// # Returns
/// The new pose and velocity.
pub fn integrate(
    pose: Pose,
    vel: f64,
    max_vel: f64,
    intent: ControlIntent,
    dynamics: &Dynamics,
) -> (Pose, f64) {
    let mut vel = vel;
    if intent.forward {
        vel += dynamics.acceleration;
    }
    if intent.reverse {
        vel -= dynamics.acceleration;
    }

    // Friction, coming to a complete stop rather than oscillating around zero
    if vel > 0.0 {
        vel -= dynamics.friction;
    } else if vel < 0.0 {
        vel += dynamics.friction;
    }
    if vel.abs() < dynamics.friction {
        vel = 0.0;
    }

    // Clamped after friction so a car held at full throttle settles at exactly max_vel
    let vel = Interval::new(-0.5 * max_vel, max_vel).clamp(vel);

    // Steering is reversed when driving backwards
    let mut angle = pose.angle;
    if vel != 0.0 {
        let flip = vel.signum();
        if intent.left {
            angle += dynamics.steer_rate * flip;
        }
        if intent.right {
            angle -= dynamics.steer_rate * flip;
        }
    }

    let position = pose.position + vel * heading_vector(angle);
    (Pose { position, angle }, vel)
}

/// Computes the corners of a rectangle of the given size, centred on the pose
/// and rotated to its heading.
///
/// With a heading of zero the corners are ordered front right, front left,
/// rear left, rear right.
pub fn bounding_polygon(pose: Pose, width: f64, length: f64) -> [Point2d; 4] {
    let radius = 0.5 * f64::hypot(width, length);
    let alpha = f64::atan2(width, length);
    let angle = pose.angle;
    [
        angle - alpha,
        angle + alpha,
        PI + angle - alpha,
        PI + angle + alpha,
    ]
    .map(|theta| pose.position + radius * heading_vector(theta))
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn at_origin() -> Pose {
        Pose {
            position: Point2d::new(0.0, 0.0),
            angle: 0.0,
        }
    }

    fn intent(forward: bool, left: bool, right: bool, reverse: bool) -> ControlIntent {
        ControlIntent {
            forward,
            left,
            right,
            reverse,
        }
    }

    #[test]
    fn single_frame_forward() {
        let (pose, vel) = integrate(
            at_origin(),
            0.0,
            3.0,
            ControlIntent::FORWARD,
            &Dynamics::default(),
        );
        assert_approx_eq!(vel, 0.15);
        assert_approx_eq!(pose.position.y, -0.15);
        assert_eq!(pose.position.x, 0.0);
        assert_eq!(pose.angle, 0.0);
    }

    #[test]
    fn forward_and_reverse_cancel() {
        let (pose, vel) = integrate(
            at_origin(),
            0.0,
            3.0,
            intent(true, false, false, true),
            &Dynamics::default(),
        );
        assert_eq!(vel, 0.0);
        assert_eq!(pose, at_origin());
    }

    #[test]
    fn reverse_is_capped_at_half() {
        let dynamics = Dynamics::default();
        let mut state = (at_origin(), 0.0);
        for _ in 0..100 {
            state = integrate(state.0, state.1, 4.0, intent(false, false, false, true), &dynamics);
            assert!(state.1 >= -2.0);
        }
        assert_eq!(state.1, -2.0);
        assert!(state.0.position.y > 0.0);
    }

    #[test]
    fn steering_needs_motion() {
        let dynamics = Dynamics::default();
        let (pose, _) = integrate(at_origin(), 0.0, 3.0, intent(false, true, false, false), &dynamics);
        assert_eq!(pose.angle, 0.0);

        let (pose, _) = integrate(at_origin(), 1.0, 3.0, intent(false, true, false, false), &dynamics);
        assert_approx_eq!(pose.angle, 0.03);

        // Reversing flips the steering direction
        let (pose, _) = integrate(at_origin(), -1.0, 3.0, intent(false, true, false, false), &dynamics);
        assert_approx_eq!(pose.angle, -0.03);

        let (pose, _) = integrate(at_origin(), 1.0, 3.0, intent(false, true, true, false), &dynamics);
        assert_approx_eq!(pose.angle, 0.0);
    }

    #[test]
    fn turning_left_heads_left() {
        let pose = Pose {
            position: Point2d::new(0.0, 0.0),
            angle: std::f64::consts::FRAC_PI_2,
        };
        let (pose, vel) = integrate(pose, 1.05, 3.0, ControlIntent::default(), &Dynamics::default());
        assert_approx_eq!(vel, 1.0);
        assert_approx_eq!(pose.position.x, -1.0);
        assert_approx_eq!(pose.position.y, 0.0);
    }

    #[test]
    fn polygon_corners() {
        let pose = Pose {
            position: Point2d::new(10.0, 20.0),
            angle: 0.0,
        };
        let poly = bounding_polygon(pose, 2.0, 4.0);
        let expected = [(11.0, 18.0), (9.0, 18.0), (9.0, 22.0), (11.0, 22.0)];
        for (corner, (x, y)) in poly.iter().zip(expected) {
            assert_approx_eq!(corner.x, x);
            assert_approx_eq!(corner.y, y);
        }
    }

    #[test]
    fn rotated_polygon() {
        let pose = Pose {
            position: Point2d::new(0.0, 0.0),
            angle: std::f64::consts::FRAC_PI_2,
        };
        let poly = bounding_polygon(pose, 2.0, 4.0);
        // Facing left, the front right corner is up and to the left
        assert_approx_eq!(poly[0].x, -2.0);
        assert_approx_eq!(poly[0].y, -1.0);
        assert_approx_eq!(poly[2].x, 2.0);
        assert_approx_eq!(poly[2].y, 1.0);
    }
}
