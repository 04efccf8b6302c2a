/// Drift (meters, on the torso's up-plane) a leg may accumulate before it must step.
pub const DEFAULT_STEP_SIZE: f32 = 0.1;

/// Peak height of the step arc above the straight line between start and landing (meters).
pub const DEFAULT_STEP_HEIGHT: f32 = 0.05;

/// Radius of the sphere swept when probing for ground under a predicted foothold (meters).
pub const DEFAULT_PROBE_RADIUS: f32 = 0.0085;

/// Nominal probe length (meters). Scaled by the velocity multiplier before use.
pub const DEFAULT_PROBE_RANGE: f32 = 1.0;

/// Smoothing factor `S`.
///
/// Drives three things at once:
/// - velocity averaging weight: `(raw + S * prev) / (S + 1)`
/// - number of sub-steps in a step: `floor(S)`
/// - orientation blend rate: `1 / (S + 1)`
pub const DEFAULT_SMOOTHNESS: f32 = 7.0;

/// Smoothed velocities below this magnitude (meters per tick) are treated as jitter.
pub const VELOCITY_EPS: f32 = 2.5e-5;

/// Upper clamp on the speed term used to extrapolate a step target.
pub const MAX_TARGET_EXTRAPOLATION: f32 = 1.5;

/// Velocity weight tilting the preferred probe against the direction of travel.
///
/// The probe origin is lifted behind the foothold so the sweep leans forward into it.
pub const FORWARD_PROBE_WEIGHT: f32 = 100.0;

/// Velocity weight tilting the fallback probe with the direction of travel.
pub const BACKWARD_PROBE_WEIGHT: f32 = 75.0;

/// Cross products shorter than this are treated as collinear leg pairs.
pub const ORIENTATION_EPS: f32 = 1.0e-6;

/// Practical small length for direction normalization guards (meters).
pub const DIST_EPS: f32 = 1.0e-6;

/// Leg indices whose difference vectors span the body plane: `(0 - 1) x (2 - 3)`.
pub const ORIENTATION_LEG_PAIRS: [(usize, usize); 2] = [(0, 1), (2, 3)];
