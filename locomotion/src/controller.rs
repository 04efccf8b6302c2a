//! The per-tick leg controller.
//!
//! Tick order
//! 1. Apply any pending rig activation.
//! 2. Update the smoothed torso velocity.
//! 3. Elect the most-drifted leg; every leg not in the air publishes its planted position.
//! 4. If no step is running, resolve a landing for the elected leg and start its step.
//! 5. Advance the running step by one sub-step (or land it).
//! 6. Re-derive torso orientation from the published leg targets.
//!
//! Everything runs inline on the caller's tick. The only suspended work is the step in
//! flight, which resumes on the next call to [`LegController::tick`].

use crate::{
    error::ConfigError,
    layers::GroundLayers,
    leg::Leg,
    orientation::BodyOrientationSolver,
    probe::{LandingSource, SurfaceQuery, resolve_landing},
    rig::RigActivation,
    scheduler::{self, Candidate},
    settings::LocomotionSettings,
    step::{ActiveStep, StepEvent, StepGate},
    types::{Quat, TorsoPose, Vec3, vec_is_finite},
    velocity::VelocityEstimator,
};

/// A step that began this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepStart {
    pub leg: usize,
    pub target: Vec3,
    pub landing: Vec3,
    pub source: LandingSource,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Leg that most needed to step, whether or not it could.
    pub candidate: Option<Candidate>,
    pub started: Option<StepStart>,
    /// Leg whose step landed this tick.
    pub landed: Option<usize>,
    /// New torso rotation, when body orientation is enabled and well defined.
    pub rotation: Option<Quat>,
}

pub struct LegController {
    settings: LocomotionSettings,
    legs: Vec<Leg>,
    torso: TorsoPose,
    velocity: VelocityEstimator,
    gate: StepGate,
    orientation: BodyOrientationSolver,
    rig: RigActivation,
    /// Reused buffer of leg targets for the orientation solve.
    feet: Vec<Vec3>,
}

impl LegController {
    /// Capture the rig: one leg per initial world target, with rest offsets taken
    /// relative to `pose`.
    pub fn new(
        settings: LocomotionSettings,
        pose: &TorsoPose,
        leg_targets: &[Vec3],
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        if leg_targets.is_empty() {
            return Err(ConfigError::NoLegs);
        }
        if !pose.is_finite() {
            return Err(ConfigError::NonFiniteTorsoPose);
        }
        if let Some(leg) = leg_targets.iter().position(|t| !vec_is_finite(t)) {
            return Err(ConfigError::NonFiniteLegTarget { leg });
        }

        let legs: Vec<Leg> = leg_targets
            .iter()
            .map(|&target| Leg::from_world(pose, target))
            .collect();

        log::debug!(
            "leg controller ready: {} legs, step size {}, smoothness {}",
            legs.len(),
            settings.step_size,
            settings.smoothness
        );

        Ok(Self {
            feet: Vec::with_capacity(legs.len()),
            legs,
            torso: *pose,
            velocity: VelocityEstimator::new(pose.position),
            gate: StepGate::default(),
            orientation: BodyOrientationSolver::new(pose.up()),
            rig: RigActivation::default(),
            settings,
        })
    }

    /// Run one fixed-rate tick against the current torso pose.
    pub fn tick<Q: SurfaceQuery + ?Sized>(&mut self, pose: &TorsoPose, ground: &Q) -> TickReport {
        let mut report = TickReport::default();
        let s = self.settings;

        self.rig.tick();

        let velocity = self.velocity.update(pose.position, s.smoothness);
        let lookahead = scheduler::lookahead(&velocity, s.velocity_multiplier());

        report.candidate = scheduler::elect(&self.legs, pose, &lookahead, s.step_size);

        for leg in self.legs.iter_mut().filter(|leg| !leg.stepping) {
            leg.hold();
        }

        if let (Some(candidate), true) = (report.candidate, self.gate.is_idle()) {
            report.started = self.start_step(candidate, pose, ground, &velocity, &lookahead);
        }

        let up = pose.up();
        match self.gate.advance(&mut self.legs, &up, s.step_height) {
            Some(StepEvent::Moved { leg, target }) => {
                log::trace!("leg {leg} swinging through {target:?}");
            }
            Some(StepEvent::Landed { leg, position }) => {
                log::debug!("leg {leg} landed at {position:?}");
                report.landed = Some(leg);
            }
            None => {}
        }

        self.torso = *pose;
        if BodyOrientationSolver::applies_to(self.legs.len(), s.body_orientation) {
            self.feet.clear();
            self.feet.extend(self.legs.iter().map(|leg| leg.target));
            report.rotation = self
                .orientation
                .solve(&self.feet, &pose.parent_forward, s.smoothness);
            if let Some(rotation) = report.rotation {
                self.torso.rotation = rotation;
            }
        }

        report
    }

    fn start_step<Q: SurfaceQuery + ?Sized>(
        &mut self,
        candidate: Candidate,
        pose: &TorsoPose,
        ground: &Q,
        velocity: &Vec3,
        lookahead: &Vec3,
    ) -> Option<StepStart> {
        let s = &self.settings;
        let leg = &self.legs[candidate.leg];

        let target = scheduler::step_target(&candidate.desired, &leg.target, velocity, lookahead);
        let landing = resolve_landing(
            ground,
            target,
            s.probe_half_range(),
            pose.parent_up,
            *velocity,
            s.probe_radius,
            s.ground_layers,
        );

        let step = ActiveStep::new(
            candidate.leg,
            leg.last_position,
            landing.position,
            s.sub_steps(),
            s.smoothness,
        );
        if !self.gate.begin(step, &mut self.legs) {
            return None;
        }

        log::debug!(
            "leg {} stepping: drift {:.4}, landing {:?} via {:?}",
            candidate.leg,
            candidate.drift,
            landing.position,
            landing.source
        );

        Some(StepStart {
            leg: candidate.leg,
            target,
            landing: landing.position,
            source: landing.source,
        })
    }

    /// Activate or deactivate the IK rig. See [`RigActivation`].
    pub fn set_active(&mut self, enabled: bool) {
        self.rig.set_active(enabled);
    }

    pub fn set_ground_layers(&mut self, layers: GroundLayers) {
        self.settings.ground_layers = layers;
    }

    #[inline]
    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    #[inline]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// World-space targets for the IK rig, in leg order.
    pub fn targets(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.legs.iter().map(|leg| leg.target)
    }

    /// Rest positions under `pose`, without velocity lookahead.
    pub fn default_positions<'a>(
        &'a self,
        pose: &'a TorsoPose,
    ) -> impl ExactSizeIterator<Item = Vec3> + 'a {
        self.legs.iter().map(move |leg| leg.default_position(pose))
    }

    /// Torso pose as of the last tick, including any solved rotation.
    #[inline]
    pub fn torso(&self) -> &TorsoPose {
        &self.torso
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity.velocity()
    }

    #[inline]
    pub fn is_stepping(&self) -> bool {
        !self.gate.is_idle()
    }

    pub fn stepping_leg(&self) -> Option<usize> {
        self.gate.active().map(|step| step.leg)
    }

    #[inline]
    pub fn rig_weight(&self) -> f32 {
        self.rig.weight()
    }
}
