//! Ground probing for step landings.
//!
//! The controller never talks to a physics backend directly. It asks a
//! [`SurfaceQuery`] for the first surface a swept sphere touches, then resolves a
//! landing point from two tilted probes with a raw-target fallback.

use nalgebra as na;

use crate::{
    constants::{BACKWARD_PROBE_WEIGHT, DIST_EPS, FORWARD_PROBE_WEIGHT},
    layers::GroundLayers,
    types::Vec3,
};

/// First contact of a swept sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    /// World-space contact point on the surface.
    pub point: Vec3,
    /// Unit surface normal, pointing against the sweep.
    pub normal: Vec3,
    /// Distance travelled by the sphere center before contact.
    pub distance: f32,
}

/// Synchronous volumetric scene query used to find ground.
///
/// Implementations must not block; they run inline on the tick.
pub trait SurfaceQuery {
    /// Sweep a sphere of `radius` from `origin` along `direction` for at most
    /// `max_distance`, only considering colliders on `layers`.
    fn cast_sphere(
        &self,
        origin: &Vec3,
        direction: &na::Unit<Vec3>,
        radius: f32,
        max_distance: f32,
        layers: GroundLayers,
    ) -> Option<SurfaceHit>;
}

/// Result of matching a predicted foothold to the surface below it.
///
/// A miss keeps the queried point and reports a zero normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeResult {
    pub position: Vec3,
    pub normal: Vec3,
}

impl ProbeResult {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.normal != Vec3::zeros()
    }
}

/// Which probe produced a landing point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LandingSource {
    Forward,
    Backward,
    /// Neither probe hit; the raw predicted target is used.
    Predicted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    pub position: Vec3,
    pub source: LandingSource,
}

/// Sweep a sphere from `point + half_range * up / 2` along `-up` for `2 * half_range`.
///
/// Returns the hit point and normal, or `point` with a zero normal when nothing is hit
/// (including a degenerate `up` or a non-positive range).
pub fn match_to_surface<Q: SurfaceQuery + ?Sized>(
    query: &Q,
    point: Vec3,
    half_range: f32,
    up: Vec3,
    radius: f32,
    layers: GroundLayers,
) -> ProbeResult {
    let miss = ProbeResult {
        position: point,
        normal: Vec3::zeros(),
    };

    let Some(up) = na::Unit::try_new(up, DIST_EPS) else {
        return miss;
    };
    if !(half_range > 0.0) {
        return miss;
    }

    let origin = point + up.into_inner() * (half_range * 0.5);
    let down = -up;

    match query.cast_sphere(&origin, &down, radius, 2.0 * half_range, layers) {
        Some(hit) => ProbeResult {
            position: hit.point,
            normal: hit.normal,
        },
        None => miss,
    }
}

/// Resolve where a stepping leg should land.
///
/// Two probes are cast around `target`:
/// - forward: up axis tilted against the velocity, `parent_up - v * 100`
/// - backward: up axis tilted with the velocity, `parent_up + v * 75`
///
/// Both probes are always cast. The forward result wins when it hits. Otherwise the
/// backward result's position is used, which is `target` itself when that probe also
/// missed.
pub fn resolve_landing<Q: SurfaceQuery + ?Sized>(
    query: &Q,
    target: Vec3,
    half_range: f32,
    parent_up: Vec3,
    velocity: Vec3,
    radius: f32,
    layers: GroundLayers,
) -> Landing {
    let forward_up = normalize_or_zero(parent_up - velocity * FORWARD_PROBE_WEIGHT);
    let backward_up = normalize_or_zero(parent_up + velocity * BACKWARD_PROBE_WEIGHT);

    let forward = match_to_surface(query, target, half_range, forward_up, radius, layers);
    let backward = match_to_surface(query, target, half_range, backward_up, radius, layers);

    if forward.is_hit() {
        Landing {
            position: forward.position,
            source: LandingSource::Forward,
        }
    } else if backward.is_hit() {
        Landing {
            position: backward.position,
            source: LandingSource::Backward,
        }
    } else {
        Landing {
            position: target,
            source: LandingSource::Predicted,
        }
    }
}

#[inline]
fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(DIST_EPS).unwrap_or_else(Vec3::zeros)
}
