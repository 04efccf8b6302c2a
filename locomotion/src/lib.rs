//! Procedural multi-leg locomotion.
//!
//! [`LegController`] keeps a set of IK leg targets planted on the ground while a
//! torso moves, stepping one leg at a time along an arc and optionally tilting the
//! torso to follow the terrain. Ground is queried through [`SurfaceQuery`];
//! [`GroundWorld`] implements it over a static rapier scene.

pub mod constants;
pub mod controller;
pub mod error;
pub mod layers;
pub mod leg;
pub mod orientation;
pub mod probe;
pub mod rapier_world;
pub mod rig;
pub mod scheduler;
pub mod settings;
pub mod step;
pub mod types;
pub mod velocity;

pub use constants::{
    DEFAULT_PROBE_RADIUS, DEFAULT_PROBE_RANGE, DEFAULT_SMOOTHNESS, DEFAULT_STEP_HEIGHT,
    DEFAULT_STEP_SIZE,
};
pub use controller::{LegController, StepStart, TickReport};
pub use error::ConfigError;
pub use layers::{GroundLayer, GroundLayers, LayerFlag, LayerMask};
pub use leg::Leg;
pub use probe::{Landing, LandingSource, SurfaceHit, SurfaceQuery};
pub use rapier_world::{ColliderShapeDef, GroundStaticDef, GroundWorld};
pub use settings::LocomotionSettings;
pub use types::{Quat, TorsoPose, Vec3};
