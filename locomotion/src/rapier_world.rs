//! Rapier-based query world for static ground geometry.
//!
//! Hosts describe their walkable statics with [`GroundStaticDef`] and build a
//! [`GroundWorld`] once. The controller only ever asks it one question: where does
//! a sphere swept along a direction first touch ground on the allowed layers.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: no dynamics are stepped; the broad/narrow phases exist only to
//!   serve scene queries.
//! - Immutable world: statics do not move after construction.

// Re-export Rapier so downstream crates can use Rapier types without depending on
// `rapier3d` directly.
pub use rapier3d;

use nalgebra as na;
use rapier3d::{
    parry::query::ShapeCastOptions,
    prelude::*,
};

use crate::{
    layers::GroundLayers,
    probe::{SurfaceHit, SurfaceQuery},
    types::Vec3,
};

/// Schema-agnostic definition of an immutable ground collider.
#[derive(Clone, Debug)]
pub struct GroundStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation (unit quaternion).
    pub rotation: na::UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
    /// Layers this collider belongs to. Probes only see it if their mask intersects these.
    pub layers: GroundLayers,
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space).
    ///
    /// The plane normal is derived from the pose as `rotation * +Y`, and the plane is
    /// shifted by `offset_along_normal` from the pose translation.
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vec3 },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },
}

/// In-memory Rapier structures needed for scene queries against a static ground.
///
/// Built once at startup and reused every tick.
pub struct GroundWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
}

impl GroundWorld {
    /// Build a query world from a list of static ground definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN/invalid values should be
    /// filtered by the caller.
    pub fn build(mut defs: Vec<GroundStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.into_iter() {
            let iso = Isometry::from_parts(na::Translation3::from(def.translation), def.rotation);

            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);

            let collider = collider_from_def(&def);
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        log::debug!("ground world built with {} colliders", colliders.len());

        // Collision detection only (no dynamics): updates the broad-phase BVH so queries can run.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();

        let hooks = ();
        let events = ();

        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// Flat ground: a single +Y half-space at `height`, belonging to `layers`.
    pub fn flat(height: f32, layers: GroundLayers) -> Self {
        Self::build(vec![GroundStaticDef {
            id: 0,
            translation: Vec3::new(0.0, height, 0.0),
            rotation: na::UnitQuaternion::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
            layers,
        }])
    }

    /// Create a borrowed `QueryPipeline` view for scene queries.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

impl SurfaceQuery for GroundWorld {
    fn cast_sphere(
        &self,
        origin: &Vec3,
        direction: &na::Unit<Vec3>,
        radius: f32,
        max_distance: f32,
        layers: GroundLayers,
    ) -> Option<SurfaceHit> {
        if max_distance <= 0.0 || layers.is_empty() {
            return None;
        }

        let pipeline = self.query_pipeline(layers.query_filter());
        let ball = Ball::new(radius);
        let ball_iso = Isometry::translation(origin.x, origin.y, origin.z);
        let vel = direction.into_inner();

        // Unit direction: time of impact is the travelled distance.
        let mut opts = ShapeCastOptions::with_max_time_of_impact(max_distance);
        // Surfaces already overlapping the sphere at its origin are ignored.
        opts.stop_at_penetration = false;

        let (_handle, hit) = pipeline.cast_shape(&ball_iso, &vel, &ball, opts)?;

        // Ensure the normal opposes the sweep so it points out of the surface.
        let mut normal = hit.normal1.into_inner();
        if normal.dot(&vel) > 0.0 {
            normal = -normal;
        }

        // The query pipeline reports witnesses in world space.
        Some(SurfaceHit {
            point: hit.witness1.coords,
            normal,
            distance: hit.time_of_impact,
        })
    }
}

/// Build a Rapier collider from a `GroundStaticDef`.
///
/// The pose lives on the parent rigid-body, so the collider uses an identity local
/// transform (planes excepted, see below).
fn collider_from_def(def: &GroundStaticDef) -> Collider {
    let groups = InteractionGroups::all().with_memberships(def.layers.as_group());

    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // The half-space sits in the body's local frame, whose +Y is the world normal
            // once the pose rotation is applied. Shift it locally along +Y.
            let halfspace = HalfSpace::new(Vector::y_axis());
            ColliderBuilder::new(SharedShape::new(halfspace))
                .translation(Vector::y() * *offset_along_normal)
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius),
    };

    builder.collision_groups(groups).build()
}
