//! Errors raised while building a [`LegController`](crate::LegController).
//!
//! Everything past construction degrades gracefully, so configuration is the only
//! failure surface.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The controller needs at least one leg target.
    #[error("no leg targets configured; at least one leg is required")]
    NoLegs,

    #[error("setting `{name}` must be finite, got {value}")]
    NonFiniteSetting { name: &'static str, value: f32 },

    #[error("setting `{name}` must be greater than zero, got {value}")]
    NonPositiveSetting { name: &'static str, value: f32 },

    #[error("setting `{name}` must not be negative, got {value}")]
    NegativeSetting { name: &'static str, value: f32 },

    /// A leg target's initial world position contains NaN or infinity.
    #[error("leg {leg} has a non-finite initial target position")]
    NonFiniteLegTarget { leg: usize },

    #[error("initial torso pose is not finite")]
    NonFiniteTorsoPose,
}
