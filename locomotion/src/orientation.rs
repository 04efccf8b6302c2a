use crate::{
    constants::{DIST_EPS, ORIENTATION_EPS, ORIENTATION_LEG_PAIRS},
    types::{Quat, Vec3},
};

/// Derives torso orientation from where the feet are.
///
/// The body plane normal is `(leg0 - leg1) x (leg2 - leg3)`; the torso's up axis is
/// blended toward it at `1 / (S + 1)` per tick and the rotation is rebuilt looking
/// along the parent's forward axis. Leg order decides the normal's sign, so rigs
/// should list legs such that the cross product points away from the ground.
#[derive(Clone, Copy, Debug)]
pub struct BodyOrientationSolver {
    last_up: Vec3,
    holding: bool,
}

impl BodyOrientationSolver {
    pub fn new(initial_up: Vec3) -> Self {
        Self {
            last_up: initial_up,
            holding: false,
        }
    }

    /// Needs both leg pairs.
    #[inline]
    pub fn applies_to(leg_count: usize, enabled: bool) -> bool {
        enabled && leg_count > 3
    }

    #[inline]
    pub fn last_up(&self) -> Vec3 {
        self.last_up
    }

    /// New torso rotation for this tick, or `None` to keep the current one.
    ///
    /// Holds when the leg pairs are collinear, or when the blended up axis is parallel
    /// to `parent_forward`.
    pub fn solve(&mut self, feet: &[Vec3], parent_forward: &Vec3, smoothness: f32) -> Option<Quat> {
        let [(a, b), (c, d)] = ORIENTATION_LEG_PAIRS;
        if feet.len() <= a.max(b).max(c).max(d) {
            return None;
        }

        let v1 = feet[a] - feet[b];
        let v2 = feet[c] - feet[d];
        let Some(normal) = v1.cross(&v2).try_normalize(ORIENTATION_EPS) else {
            self.hold("leg pairs are collinear");
            return None;
        };

        let up = self.last_up.lerp(&normal, 1.0 / (smoothness + 1.0));
        if up.cross(parent_forward).norm_squared() <= DIST_EPS * DIST_EPS {
            self.hold("up axis is parallel to parent forward");
            return None;
        }

        let rotation = Quat::face_towards(parent_forward, &up);
        self.last_up = rotation * Vec3::y();
        self.holding = false;
        Some(rotation)
    }

    fn hold(&mut self, reason: &str) {
        if !self.holding {
            log::warn!("holding torso orientation: {reason}");
        }
        self.holding = true;
    }
}
