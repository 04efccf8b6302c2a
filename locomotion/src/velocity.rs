use crate::{constants::VELOCITY_EPS, types::Vec3};

/// Exponentially weighted torso velocity, in meters per tick.
///
/// `smoothed = (raw + S * previous) / (S + 1)` where `raw` is this tick's displacement.
/// Results shorter than [`VELOCITY_EPS`] are discarded in favor of the previous value,
/// which keeps a resting body from dithering around zero.
#[derive(Clone, Copy, Debug)]
pub struct VelocityEstimator {
    last_position: Vec3,
    velocity: Vec3,
}

impl VelocityEstimator {
    pub fn new(start: Vec3) -> Self {
        Self {
            last_position: start,
            velocity: Vec3::zeros(),
        }
    }

    /// Current smoothed velocity.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Fold in the torso position for this tick and return the smoothed velocity.
    pub fn update(&mut self, position: Vec3, smoothness: f32) -> Vec3 {
        let raw = position - self.last_position;
        let smoothed = (raw + self.velocity * smoothness) / (smoothness + 1.0);

        if smoothed.norm() >= VELOCITY_EPS {
            self.velocity = smoothed;
        }
        self.last_position = position;

        log::trace!("torso velocity {:?}", self.velocity);
        self.velocity
    }
}
