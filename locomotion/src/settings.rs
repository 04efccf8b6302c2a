/*!
Controller settings.

These values are the tunables of the stepping engine. Defaults live in
[`crate::constants`] so hosts can keep them as sensible baselines and override
per creature.

Notes
- Distances are in meters; velocities are meters per tick (the controller is
  driven by a fixed-rate tick, so it never sees a delta time).
- `smoothness` is dimensionless and couples velocity smoothing, step duration
  and orientation blending.
*/

use crate::{
    constants::{
        DEFAULT_PROBE_RADIUS, DEFAULT_PROBE_RANGE, DEFAULT_SMOOTHNESS, DEFAULT_STEP_HEIGHT,
        DEFAULT_STEP_SIZE,
    },
    error::ConfigError,
    layers::GroundLayers,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionSettings {
    /// Drift threshold above which a leg must step.
    pub step_size: f32,
    /// Peak height of the step arc.
    pub step_height: f32,
    /// Radius of the ground probe sphere.
    pub probe_radius: f32,
    /// Nominal ground probe range.
    pub probe_range: f32,
    /// Smoothing factor `S`.
    pub smoothness: f32,
    /// Re-orient the torso from leg contact geometry (needs at least four legs).
    pub body_orientation: bool,
    /// Layers the ground probe may hit.
    pub ground_layers: GroundLayers,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            step_height: DEFAULT_STEP_HEIGHT,
            probe_radius: DEFAULT_PROBE_RADIUS,
            probe_range: DEFAULT_PROBE_RANGE,
            smoothness: DEFAULT_SMOOTHNESS,
            body_orientation: true,
            ground_layers: GroundLayers::all(),
        }
    }
}

impl LocomotionSettings {
    pub fn with_step_size(mut self, step_size: f32) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_step_height(mut self, step_height: f32) -> Self {
        self.step_height = step_height;
        self
    }

    pub fn with_probe_radius(mut self, probe_radius: f32) -> Self {
        self.probe_radius = probe_radius;
        self
    }

    pub fn with_probe_range(mut self, probe_range: f32) -> Self {
        self.probe_range = probe_range;
        self
    }

    pub fn with_smoothness(mut self, smoothness: f32) -> Self {
        self.smoothness = smoothness;
        self
    }

    pub fn with_body_orientation(mut self, enabled: bool) -> Self {
        self.body_orientation = enabled;
        self
    }

    pub fn with_ground_layers(mut self, layers: GroundLayers) -> Self {
        self.ground_layers = layers;
        self
    }

    /// Velocity lookahead multiplier `2S - 2`.
    ///
    /// Also scales the probe range, so `S = 1` collapses both the lookahead and the probe.
    #[inline]
    pub fn velocity_multiplier(&self) -> f32 {
        2.0 * self.smoothness - 2.0
    }

    /// Sub-steps per step: `floor(S)`, at least one.
    #[inline]
    pub fn sub_steps(&self) -> u32 {
        (self.smoothness.floor() as u32).max(1)
    }

    /// Half of the swept probe length actually used for a step.
    #[inline]
    pub fn probe_half_range(&self) -> f32 {
        self.probe_range * 0.5 * self.velocity_multiplier()
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("step_size", self.step_size),
            ("step_height", self.step_height),
            ("probe_radius", self.probe_radius),
            ("probe_range", self.probe_range),
            ("smoothness", self.smoothness),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteSetting { name, value });
            }
        }

        for (name, value) in [
            ("smoothness", self.smoothness),
            ("probe_radius", self.probe_radius),
            ("probe_range", self.probe_range),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveSetting { name, value });
            }
        }

        for (name, value) in [
            ("step_size", self.step_size),
            ("step_height", self.step_height),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeSetting { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(LocomotionSettings::default().validate(), Ok(()));
    }

    #[test]
    fn default_smoothness_gives_seven_sub_steps_and_twelve_tick_lookahead() {
        let s = LocomotionSettings::default();
        assert_eq!(s.sub_steps(), 7);
        assert!((s.velocity_multiplier() - 12.0).abs() < 1.0e-6);
        assert!((s.probe_half_range() - 6.0).abs() < 1.0e-6);
    }

    #[test]
    fn fractional_smoothness_floors_and_never_drops_below_one_sub_step() {
        assert_eq!(LocomotionSettings::default().with_smoothness(3.9).sub_steps(), 3);
        assert_eq!(LocomotionSettings::default().with_smoothness(0.5).sub_steps(), 1);
    }

    #[test]
    fn rejects_non_positive_smoothness() {
        let err = LocomotionSettings::default()
            .with_smoothness(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonPositiveSetting {
                name: "smoothness",
                value: 0.0
            }
        );
    }

    #[test]
    fn rejects_nan_before_sign_checks() {
        let err = LocomotionSettings::default()
            .with_step_size(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonFiniteSetting {
                name: "step_size",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_step_height() {
        let err = LocomotionSettings::default()
            .with_step_height(-0.01)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NegativeSetting {
                name: "step_height",
                ..
            }
        ));
    }

    #[test]
    fn zero_step_size_is_allowed() {
        assert!(
            LocomotionSettings::default()
                .with_step_size(0.0)
                .validate()
                .is_ok()
        );
    }
}
