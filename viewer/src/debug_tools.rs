//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (recommended: `#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::{convert::to_bevy_vec, spider::Spider};

const TARGET_GIZMO_RADIUS: f32 = 0.05;

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, draw_step_gizmos);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// Red: current leg targets. Green: rest positions, sized to the step threshold.
fn draw_step_gizmos(spiders: Query<&Spider>, mut gizmos: Gizmos) {
    for spider in &spiders {
        let controller = &spider.controller;
        for target in controller.targets() {
            gizmos.sphere(
                Isometry3d::from_translation(to_bevy_vec(&target)),
                TARGET_GIZMO_RADIUS,
                Color::srgb(1.0, 0.0, 0.0),
            );
        }
        let step_size = controller.settings().step_size;
        for rest in controller.default_positions(controller.torso()) {
            gizmos.sphere(
                Isometry3d::from_translation(to_bevy_vec(&rest)),
                step_size,
                Color::srgb(0.0, 1.0, 0.0),
            );
        }
    }
}
