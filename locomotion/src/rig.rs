/// Binary blend weight for the external IK rig.
///
/// Deactivation zeroes the weight immediately; activation takes effect one tick
/// later. There is no crossfade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigActivation {
    weight: f32,
    pending_activation: bool,
}

impl Default for RigActivation {
    fn default() -> Self {
        Self {
            weight: 1.0,
            pending_activation: false,
        }
    }
}

impl RigActivation {
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.weight > 0.0
    }

    pub fn set_active(&mut self, enabled: bool) {
        if enabled {
            self.pending_activation = true;
        } else {
            self.pending_activation = false;
            self.weight = 0.0;
            log::info!("leg rig deactivated");
        }
    }

    /// Apply a pending activation. Call once at the start of every tick.
    pub fn tick(&mut self) {
        if self.pending_activation {
            self.pending_activation = false;
            self.weight = 1.0;
            log::info!("leg rig activated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_weighted() {
        assert_eq!(RigActivation::default().weight(), 1.0);
    }

    #[test]
    fn deactivation_is_immediate() {
        let mut rig = RigActivation::default();
        rig.set_active(false);
        assert_eq!(rig.weight(), 0.0);
        rig.tick();
        assert_eq!(rig.weight(), 0.0);
    }

    #[test]
    fn activation_waits_one_tick() {
        let mut rig = RigActivation::default();
        rig.set_active(false);
        rig.set_active(true);
        assert_eq!(rig.weight(), 0.0);
        rig.tick();
        assert_eq!(rig.weight(), 1.0);
    }

    #[test]
    fn deactivating_cancels_a_pending_activation() {
        let mut rig = RigActivation::default();
        rig.set_active(false);
        rig.set_active(true);
        rig.set_active(false);
        rig.tick();
        assert!(!rig.is_active());
    }
}
