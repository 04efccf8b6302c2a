use crate::types::{TorsoPose, Vec3};

/// One leg's placement state.
#[derive(Clone, Copy, Debug)]
pub struct Leg {
    /// Rest offset in torso-local space, captured once at startup.
    pub default_offset: Vec3,
    /// Where the foot was last planted. Read by everyone while the leg is not stepping.
    pub last_position: Vec3,
    /// Position published to the IK rig this tick.
    pub target: Vec3,
    pub stepping: bool,
}

impl Leg {
    /// Capture a leg from its initial world target and the torso pose it is rigged under.
    pub fn from_world(pose: &TorsoPose, world_target: Vec3) -> Self {
        Self {
            default_offset: pose.inverse_transform_point(&world_target),
            last_position: world_target,
            target: world_target,
            stepping: false,
        }
    }

    /// Rest position under the given torso pose.
    #[inline]
    pub fn default_position(&self, pose: &TorsoPose) -> Vec3 {
        pose.transform_point(&self.default_offset)
    }

    /// Publish the last planted position.
    #[inline]
    pub fn hold(&mut self) {
        self.target = self.last_position;
    }

    /// Commit a landing: the target snaps exactly to `position`.
    pub(crate) fn plant(&mut self, position: Vec3) {
        self.target = position;
        self.last_position = position;
        self.stepping = false;
    }
}
