//! A four-legged walker driven by the locomotion controller.
//!
//! The root entity is the parent frame steered by input. The torso is its child and
//! takes its rotation from the controller; feet are free entities placed on the
//! controller's leg targets every fixed tick.

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use locomotion::{GroundLayer, GroundLayers, LegController, LocomotionSettings, TorsoPose};

use crate::{
    convert::{to_bevy_quat, to_bevy_vec, to_na_quat, to_na_vec},
    input::InputAction,
    world::Ground,
};

const DEFAULT_TORSO_HEIGHT: f32 = 0.12;
const DEFAULT_MOVE_SPEED: f32 = 0.5;
const DEFAULT_TURN_SPEED: f32 = 1.8;

/// Rest footholds in the root frame. The order puts the foot-plane normal up.
const DEFAULT_FOOT_OFFSETS: [Vec3; 4] = [
    Vec3::new(-0.2, 0.0, 0.18), // front-right
    Vec3::new(0.2, 0.0, -0.18), // back-left
    Vec3::new(0.2, 0.0, 0.18), // front-left
    Vec3::new(-0.2, 0.0, -0.18), // back-right
];

/// Controller tuning applied to every spawned spider.
#[derive(Resource, Clone, Copy, Debug)]
pub struct SpiderSettings(pub LocomotionSettings);

impl Default for SpiderSettings {
    fn default() -> Self {
        Self(LocomotionSettings::default().with_ground_layers(walkable()))
    }
}

/// Body layout and driving speeds.
#[derive(Resource, Clone, Debug)]
pub struct SpiderLayout {
    /// Rest footholds relative to the root, in leg order.
    pub foot_offsets: Vec<Vec3>,
    pub torso_height: f32,
    pub move_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
}

impl Default for SpiderLayout {
    fn default() -> Self {
        Self {
            foot_offsets: DEFAULT_FOOT_OFFSETS.to_vec(),
            torso_height: DEFAULT_TORSO_HEIGHT,
            move_speed: DEFAULT_MOVE_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }
}

#[derive(Component)]
pub struct Spider {
    pub controller: LegController,
    pub torso: Entity,
    pub rig_enabled: bool,
}

#[derive(Component)]
pub struct Torso;

#[derive(Component)]
pub struct Foot {
    pub spider: Entity,
    pub leg: usize,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<SpiderSettings>();
    app.init_resource::<SpiderLayout>();
    app.add_systems(Startup, spawn_spider);
    app.add_systems(FixedUpdate, (steer, step_legs).chain());
    app.add_systems(Update, (toggle_rig, toggle_wading, draw_legs));
}

fn walkable() -> GroundLayers {
    GroundLayers::from_layers(&[GroundLayer::Terrain, GroundLayer::Props])
}

fn torso_pose(root: &Transform, torso: &Transform) -> TorsoPose {
    let world = root.mul_transform(*torso);
    TorsoPose::new(
        to_na_vec(world.translation),
        to_na_quat(world.rotation),
        to_na_vec(root.rotation * Vec3::Z),
        to_na_vec(root.rotation * Vec3::Y),
    )
}

fn spawn_spider(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SpiderSettings>,
    layout: Res<SpiderLayout>,
) -> Result {
    let root = Transform::default();
    let torso_local = Transform::from_xyz(0.0, layout.torso_height, 0.0);

    let targets: Vec<_> = layout
        .foot_offsets
        .iter()
        .map(|offset| to_na_vec(root.transform_point(*offset)))
        .collect();
    let controller = LegController::new(settings.0, &torso_pose(&root, &torso_local), &targets)?;

    let torso = commands
        .spawn((
            Name::new("Torso"),
            Torso,
            torso_local,
            Mesh3d(meshes.add(Cuboid::new(0.22, 0.06, 0.28))),
            MeshMaterial3d(materials.add(Color::srgb(0.25, 0.22, 0.2))),
        ))
        .id();

    let spider = commands
        .spawn((
            Name::new("Spider"),
            root,
            Visibility::default(),
            Spider {
                controller,
                torso,
                rig_enabled: true,
            },
        ))
        .add_child(torso)
        .id();

    let foot_mesh = meshes.add(Sphere::new(0.015));
    let foot_material = materials.add(Color::srgb(0.9, 0.55, 0.2));
    for (leg, target) in targets.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Foot {leg}")),
            Foot { spider, leg },
            Transform::from_translation(to_bevy_vec(target)),
            Mesh3d(foot_mesh.clone()),
            MeshMaterial3d(foot_material.clone()),
        ));
    }

    info!("spawned spider with {} legs", targets.len());
    Ok(())
}

fn steer(
    time: Res<Time>,
    layout: Res<SpiderLayout>,
    actions: Res<ActionState<InputAction>>,
    mut spiders: Query<&mut Transform, With<Spider>>,
) {
    let dt = time.delta_secs();
    let movement = actions.clamped_axis_pair(&InputAction::Move);
    let turn = actions.clamped_value(&InputAction::Turn);

    for mut root in &mut spiders {
        root.rotate_y(turn * layout.turn_speed * dt);
        // +Z is forward, so screen-right is -X.
        let local = Vec3::new(-movement.x, 0.0, movement.y);
        let delta = root.rotation * local * layout.move_speed * dt;
        root.translation += delta;
    }
}

fn step_legs(
    ground: Res<Ground>,
    mut spiders: Query<(&Transform, &mut Spider), Without<Torso>>,
    mut torsos: Query<&mut Transform, (With<Torso>, Without<Spider>)>,
    mut feet: Query<(&mut Transform, &Foot), (Without<Torso>, Without<Spider>)>,
) {
    for (root, mut spider) in &mut spiders {
        let Ok(mut torso) = torsos.get_mut(spider.torso) else {
            error!("spider torso {:?} is missing", spider.torso);
            continue;
        };
        let report = spider.controller.tick(&torso_pose(root, &torso), &ground.0);
        if let Some(rotation) = report.rotation {
            torso.rotation = root.rotation.inverse() * to_bevy_quat(&rotation);
        }
    }

    for (mut transform, foot) in &mut feet {
        let Ok((_, spider)) = spiders.get(foot.spider) else {
            continue;
        };
        if let Some(leg) = spider.controller.legs().get(foot.leg) {
            transform.translation = to_bevy_vec(&leg.target);
        }
    }
}

fn toggle_rig(actions: Res<ActionState<InputAction>>, mut spiders: Query<&mut Spider>) {
    if !actions.just_pressed(&InputAction::ToggleRig) {
        return;
    }
    for mut spider in &mut spiders {
        spider.rig_enabled = !spider.rig_enabled;
        let enabled = spider.rig_enabled;
        spider.controller.set_active(enabled);
    }
}

fn toggle_wading(actions: Res<ActionState<InputAction>>, mut spiders: Query<&mut Spider>) {
    if !actions.just_pressed(&InputAction::ToggleWading) {
        return;
    }
    for mut spider in &mut spiders {
        let mut layers = spider.controller.settings().ground_layers;
        if layers.contains(GroundLayer::Water) {
            layers.remove(GroundLayer::Water);
        } else {
            layers.insert(GroundLayer::Water);
        }
        spider.controller.set_ground_layers(layers);
        info!("feet see water: {}", layers.contains(GroundLayer::Water));
    }
}

/// Two-segment legs from hip to foot, hidden while the rig is blended out.
fn draw_legs(
    spiders: Query<&Spider>,
    torsos: Query<&GlobalTransform, With<Torso>>,
    mut gizmos: Gizmos,
) {
    for spider in &spiders {
        if spider.controller.rig_weight() <= 0.0 {
            continue;
        }
        let Ok(torso) = torsos.get(spider.torso) else {
            continue;
        };
        let up = torso.up();
        for leg in spider.controller.legs() {
            let offset = to_bevy_vec(&leg.default_offset);
            let hip = torso.transform_point(Vec3::new(offset.x * 0.35, 0.0, offset.z * 0.35));
            let foot = to_bevy_vec(&leg.target);
            let knee = hip.lerp(foot, 0.5) + *up * 0.08;
            let color = Color::srgb(0.3, 0.26, 0.22);
            gizmos.line(hip, knee, color);
            gizmos.line(knee, foot, color);
        }
    }
}
