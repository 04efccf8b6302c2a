use bevy::prelude::*;
use locomotion::{ColliderShapeDef, GroundLayer, GroundLayers, GroundStaticDef, GroundWorld};
use nalgebra as na;

use crate::convert::{to_bevy_quat, to_bevy_vec, to_na_vec};

/// Static ground the spider walks on, shared by the renderer and the foot probes.
#[derive(Resource)]
pub struct Ground(pub GroundWorld);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Ground(GroundWorld::build(ground_defs())));
    app.add_systems(Startup, setup);
}

fn ground_defs() -> Vec<GroundStaticDef> {
    let terrain = GroundLayers::from_layers(&[GroundLayer::Terrain]);
    let props = GroundLayers::from_layers(&[GroundLayer::Props]);
    let water = GroundLayers::from_layers(&[GroundLayer::Water]);

    vec![
        GroundStaticDef {
            id: 0,
            translation: na::Vector3::zeros(),
            rotation: na::UnitQuaternion::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
            layers: terrain,
        },
        // Low platform.
        GroundStaticDef {
            id: 1,
            translation: to_na_vec(Vec3::new(0.0, 0.04, 1.5)),
            rotation: na::UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: to_na_vec(Vec3::new(0.6, 0.04, 0.4)),
            },
            layers: props,
        },
        // Ramp.
        GroundStaticDef {
            id: 2,
            translation: to_na_vec(Vec3::new(-1.5, 0.1, 0.5)),
            rotation: na::UnitQuaternion::from_axis_angle(&na::Vector3::x_axis(), -0.25),
            shape: ColliderShapeDef::Cuboid {
                half_extents: to_na_vec(Vec3::new(0.5, 0.05, 1.0)),
            },
            layers: terrain,
        },
        GroundStaticDef {
            id: 3,
            translation: to_na_vec(Vec3::new(1.2, -0.2, -0.8)),
            rotation: na::UnitQuaternion::identity(),
            shape: ColliderShapeDef::Sphere { radius: 0.35 },
            layers: props,
        },
        // Floating slab only reachable once probes include water.
        GroundStaticDef {
            id: 4,
            translation: to_na_vec(Vec3::new(1.5, 0.06, 1.5)),
            rotation: na::UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: to_na_vec(Vec3::new(0.5, 0.01, 0.5)),
            },
            layers: water,
        },
    ]
}

fn mesh_for(shape: &ColliderShapeDef) -> Mesh {
    match *shape {
        ColliderShapeDef::Plane { .. } => Plane3d::default().mesh().size(40., 40.).build(),
        ColliderShapeDef::Cuboid { half_extents } => {
            Cuboid::from_size(to_bevy_vec(&(half_extents * 2.0))).into()
        }
        ColliderShapeDef::Sphere { radius } => Sphere::new(radius).mesh().build(),
        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => Capsule3d::new(radius, half_height * 2.0).into(),
        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => Cylinder::new(radius, half_height * 2.0).into(),
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("world setup");

    let terrain = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.3, 0.25),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let prop = materials.add(Color::srgb_u8(124, 144, 255));
    let water = materials.add(StandardMaterial {
        base_color: Color::srgba(0.2, 0.45, 0.8, 0.6),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    for def in ground_defs() {
        let material = if def.layers.contains(GroundLayer::Water) {
            water.clone()
        } else if def.layers.contains(GroundLayer::Props) {
            prop.clone()
        } else {
            terrain.clone()
        };
        let mut transform = Transform::from_translation(to_bevy_vec(&def.translation))
            .with_rotation(to_bevy_quat(&def.rotation));
        if let ColliderShapeDef::Plane {
            offset_along_normal,
        } = def.shape
        {
            transform.translation += transform.rotation * Vec3::Y * offset_along_normal;
        }

        commands.spawn((
            Name::new(format!("Ground {}", def.id)),
            transform,
            Mesh3d(meshes.add(mesh_for(&def.shape))),
            MeshMaterial3d(material),
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
