/*!
Math aliases and the per-tick torso input.

Conventions
- Right-handed, +Y up, +Z forward in torso-local space.
- Positions and offsets are plain vectors in meters; there is no separate point type.
*/

use nalgebra as na;

pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// World pose of the torso and of the frame it is parented to.
///
/// The parent axes drive torso orientation and probe tilt. For a torso with no parent,
/// pass the world axes (or the torso's own yaw frame).
#[derive(Clone, Copy, Debug)]
pub struct TorsoPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub parent_forward: Vec3,
    pub parent_up: Vec3,
}

impl TorsoPose {
    #[inline]
    pub fn new(position: Vec3, rotation: Quat, parent_forward: Vec3, parent_up: Vec3) -> Self {
        Self {
            position,
            rotation,
            parent_forward,
            parent_up,
        }
    }

    /// A pose whose parent frame is the world frame.
    #[inline]
    pub fn unparented(position: Vec3, rotation: Quat) -> Self {
        Self::new(position, rotation, Vec3::z(), Vec3::y())
    }

    /// Torso local +Y in world space.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// Torso-local offset to world position.
    #[inline]
    pub fn transform_point(&self, local: &Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// World position to torso-local offset.
    #[inline]
    pub fn inverse_transform_point(&self, world: &Vec3) -> Vec3 {
        self.rotation.inverse_transform_vector(&(world - self.position))
    }

    pub fn is_finite(&self) -> bool {
        let q = self.rotation.quaternion();
        vec_is_finite(&self.position)
            && vec_is_finite(&self.parent_forward)
            && vec_is_finite(&self.parent_up)
            && q.coords.iter().all(|c| c.is_finite())
    }
}

#[inline]
pub(crate) fn vec_is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Remove the component of `v` along `normal`. A zero normal leaves `v` untouched.
#[inline]
pub fn project_on_plane(v: &Vec3, normal: &Vec3) -> Vec3 {
    let n_len_sq = normal.norm_squared();
    if n_len_sq <= f32::EPSILON {
        return *v;
    }
    v - normal * (v.dot(normal) / n_len_sq)
}
