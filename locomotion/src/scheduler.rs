//! Leg election.
//!
//! Every tick each leg's desired foothold is predicted from the torso pose plus a
//! velocity lookahead, and the leg that has drifted furthest from where it stands
//! becomes the step candidate.

use crate::{
    constants::MAX_TARGET_EXTRAPOLATION,
    leg::Leg,
    types::{TorsoPose, Vec3, project_on_plane},
};

/// The leg that most needs to step this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub leg: usize,
    /// Planar drift that won the election.
    pub drift: f32,
    /// Rest position under the current torso pose (no lookahead).
    pub desired: Vec3,
}

/// Velocity lookahead `v * (2S - 2)`.
#[inline]
pub fn lookahead(velocity: &Vec3, velocity_multiplier: f32) -> Vec3 {
    velocity * velocity_multiplier
}

/// Distance on the torso's up-plane between where a leg should be (including the
/// lookahead) and where it is planted.
#[inline]
pub fn drift_distance(desired: &Vec3, lookahead: &Vec3, last_position: &Vec3, up: &Vec3) -> f32 {
    project_on_plane(&(desired + lookahead - last_position), up).norm()
}

/// Pick the leg with the largest drift strictly above `step_size`.
///
/// Ties go to the lowest index. Returns `None` when every leg is within `step_size`.
pub fn elect(legs: &[Leg], pose: &TorsoPose, lookahead: &Vec3, step_size: f32) -> Option<Candidate> {
    let up = pose.up();
    let mut best: Option<Candidate> = None;
    let mut max_drift = step_size;

    for (i, leg) in legs.iter().enumerate() {
        let desired = leg.default_position(pose);
        let drift = drift_distance(&desired, lookahead, &leg.last_position, &up);
        if drift > max_drift {
            max_drift = drift;
            best = Some(Candidate {
                leg: i,
                drift,
                desired,
            });
        }
    }

    best
}

/// Where an elected leg should aim before ground matching.
///
/// Overshoots ahead of the body: the gap between the rest position and the leg's
/// current target is extrapolated by the (clamped) speed, then the lookahead is added.
pub fn step_target(desired: &Vec3, current_target: &Vec3, velocity: &Vec3, lookahead: &Vec3) -> Vec3 {
    let speed = velocity.norm().clamp(0.0, MAX_TARGET_EXTRAPOLATION);
    desired + (desired - current_target) * speed + lookahead
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quat;

    fn square_legs(pose: &TorsoPose) -> Vec<Leg> {
        [
            Vec3::new(-0.25, -0.125, 0.25),
            Vec3::new(0.25, -0.125, -0.25),
            Vec3::new(0.25, -0.125, 0.25),
            Vec3::new(-0.25, -0.125, -0.25),
        ]
        .iter()
        .map(|p| Leg::from_world(pose, pose.position + p))
        .collect()
    }

    #[test]
    fn resting_legs_have_no_drift_and_no_candidate() {
        let pose = TorsoPose::unparented(Vec3::new(0.0, 0.1, 0.0), Quat::identity());
        let legs = square_legs(&pose);
        for leg in &legs {
            let d = drift_distance(&leg.default_position(&pose), &Vec3::zeros(), &leg.last_position, &pose.up());
            assert!(d < 1.0e-6);
        }
        assert_eq!(elect(&legs, &pose, &Vec3::zeros(), 0.1), None);
    }

    #[test]
    fn vertical_offset_is_ignored_on_the_up_plane() {
        let d = drift_distance(
            &Vec3::new(0.0, 3.0, 0.0),
            &Vec3::zeros(),
            &Vec3::new(0.05, 0.0, 0.0),
            &Vec3::y(),
        );
        assert!((d - 0.05).abs() < 1.0e-6);
    }

    #[test]
    fn largest_drift_wins() {
        let start = TorsoPose::unparented(Vec3::zeros(), Quat::identity());
        let mut legs = square_legs(&start);
        legs[2].last_position.x -= 0.3;
        legs[1].last_position.x -= 0.2;

        let c = elect(&legs, &start, &Vec3::zeros(), 0.1).expect("candidate");
        assert_eq!(c.leg, 2);
        assert!((c.drift - 0.3).abs() < 1.0e-6);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let start = TorsoPose::unparented(Vec3::zeros(), Quat::identity());
        let legs = square_legs(&start);
        let moved = TorsoPose::unparented(Vec3::new(0.5, 0.0, 0.0), Quat::identity());

        // Every leg drifts the same 0.5m.
        let c = elect(&legs, &moved, &Vec3::zeros(), 0.1).expect("candidate");
        assert_eq!(c.leg, 0);
    }

    #[test]
    fn drift_equal_to_step_size_does_not_qualify() {
        let start = TorsoPose::unparented(Vec3::zeros(), Quat::identity());
        let legs = square_legs(&start);
        let moved = TorsoPose::unparented(Vec3::new(0.25, 0.0, 0.0), Quat::identity());
        assert_eq!(elect(&legs, &moved, &Vec3::zeros(), 0.25), None);
    }

    #[test]
    fn lookahead_pushes_drift_over_threshold() {
        let pose = TorsoPose::unparented(Vec3::zeros(), Quat::identity());
        let legs = square_legs(&pose);
        let ahead = lookahead(&Vec3::new(0.01, 0.0, 0.0), 12.0);
        let c = elect(&legs, &pose, &ahead, 0.1).expect("candidate");
        assert!((c.drift - 0.12).abs() < 1.0e-5);
    }

    #[test]
    fn step_target_overshoots_along_motion() {
        let desired = Vec3::new(1.0, 0.0, 0.0);
        let current = Vec3::new(0.8, 0.0, 0.0);
        let v = Vec3::new(0.5, 0.0, 0.0);
        let t = step_target(&desired, &current, &v, &lookahead(&v, 2.0));
        // 1.0 + 0.5 * 0.2 + 1.0
        assert!((t - Vec3::new(2.1, 0.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn step_target_clamps_extrapolation_speed() {
        let desired = Vec3::new(1.0, 0.0, 0.0);
        let current = Vec3::new(0.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 0.0, 4.0);
        let t = step_target(&desired, &current, &v, &Vec3::zeros());
        assert!((t.x - 2.5).abs() < 1.0e-6);
    }
}
