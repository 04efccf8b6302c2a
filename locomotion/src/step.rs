//! Step animation.
//!
//! A step is a resumable task advanced once per host tick: each tick moves the leg
//! target one sub-step along a lerp-plus-sine arc, and the tick after the last
//! sub-step snaps it onto the landing point. [`StepGate`] owns the only running step,
//! so at most one leg is ever in the air.

use std::f32::consts::PI;

use crate::{leg::Leg, types::Vec3};

/// Point on the step arc at `fraction` of the way from `start` to `landing`.
///
/// The arc rises `height * sin(fraction * PI)` along `up`, so it starts and ends on
/// the straight line and peaks halfway.
#[inline]
pub fn arc_point(start: &Vec3, landing: &Vec3, fraction: f32, up: &Vec3, height: f32) -> Vec3 {
    start.lerp(landing, fraction) + up * (height * (fraction * PI).sin())
}

/// One leg's step in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveStep {
    pub leg: usize,
    pub start: Vec3,
    pub landing: Vec3,
    /// Next sub-step index, 1-based.
    next: u32,
    sub_steps: u32,
    /// `S + 1`, fixed when the step starts.
    denominator: f32,
}

impl ActiveStep {
    pub fn new(leg: usize, start: Vec3, landing: Vec3, sub_steps: u32, smoothness: f32) -> Self {
        Self {
            leg,
            start,
            landing,
            next: 1,
            sub_steps: sub_steps.max(1),
            denominator: smoothness + 1.0,
        }
    }

    /// Sub-steps applied so far.
    #[inline]
    pub fn completed_sub_steps(&self) -> u32 {
        self.next - 1
    }

    /// Move one sub-step along the arc, or land once every sub-step has been applied.
    pub fn advance(&mut self, up: &Vec3, height: f32) -> StepProgress {
        if self.next > self.sub_steps {
            return StepProgress::Landed(self.landing);
        }
        let fraction = self.next as f32 / self.denominator;
        self.next += 1;
        StepProgress::Moving(arc_point(&self.start, &self.landing, fraction, up, height))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepProgress {
    Moving(Vec3),
    Landed(Vec3),
}

/// What the gate did with the running step this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepEvent {
    Moved { leg: usize, target: Vec3 },
    Landed { leg: usize, position: Vec3 },
}

/// System-wide single-stepper.
///
/// Holds at most one [`ActiveStep`]; a new step can only begin once the previous one
/// has landed. There is no way to cancel a step in flight.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepGate {
    active: Option<ActiveStep>,
}

impl StepGate {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    #[inline]
    pub fn active(&self) -> Option<&ActiveStep> {
        self.active.as_ref()
    }

    /// Start `step` if no other step is running. Returns `false` (and drops the step)
    /// when the gate is busy.
    pub fn begin(&mut self, step: ActiveStep, legs: &mut [Leg]) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(leg) = legs.get_mut(step.leg) else {
            return false;
        };
        leg.stepping = true;
        self.active = Some(step);
        true
    }

    /// Resume the running step for this tick and write its target into `legs`.
    pub fn advance(&mut self, legs: &mut [Leg], up: &Vec3, height: f32) -> Option<StepEvent> {
        let step = self.active.as_mut()?;
        let index = step.leg;
        let leg = &mut legs[index];

        match step.advance(up, height) {
            StepProgress::Moving(target) => {
                leg.target = target;
                Some(StepEvent::Moved { leg: index, target })
            }
            StepProgress::Landed(position) => {
                leg.plant(position);
                self.active = None;
                Some(StepEvent::Landed {
                    leg: index,
                    position,
                })
            }
        }
    }
}
