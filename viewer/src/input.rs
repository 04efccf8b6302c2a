use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Planar movement relative to the spider's heading.
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(Axis)]
    Turn,
    /// Blend the leg rig out or back in.
    ToggleRig,
    /// Let probes see the water layer.
    ToggleWading,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let input_map = InputMap::<InputAction>::default()
        .with_dual_axis(InputAction::Move, VirtualDPad::wasd())
        .with_dual_axis(InputAction::Move, GamepadStick::LEFT)
        .with_axis(InputAction::Turn, VirtualAxis::new(KeyCode::KeyE, KeyCode::KeyQ))
        .with(InputAction::ToggleRig, KeyCode::KeyR)
        .with(InputAction::ToggleWading, KeyCode::KeyT);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}
