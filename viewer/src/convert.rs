//! glam <-> nalgebra conversions at the boundary between Bevy and the locomotion crate.

use bevy::math::{Quat, Vec3};
use nalgebra as na;

#[inline]
pub fn to_na_vec(v: Vec3) -> locomotion::Vec3 {
    locomotion::Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_bevy_vec(v: &locomotion::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_na_quat(q: Quat) -> locomotion::Quat {
    na::UnitQuaternion::new_normalize(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

#[inline]
pub fn to_bevy_quat(q: &locomotion::Quat) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quaternion_rotates_the_same_either_side() {
        let q = Quat::from_euler(bevy::math::EulerRot::YXZ, 0.7, -0.3, 0.2);
        let v = Vec3::new(0.3, -1.2, 2.0);

        let rotated = to_bevy_vec(&(to_na_quat(q) * to_na_vec(v)));
        assert!((rotated - q * v).length() < 1.0e-5);
        assert!(to_bevy_quat(&to_na_quat(q)).abs_diff_eq(q, 1.0e-6));
    }
}
