//! Ground control systems.
//!
//! - [`ground_control_activation`] enters the active state for newly added
//!   controllers whose body is already grounded
//! - [`ground_control_fixed_update`] runs one fixed step of every active
//!   controller against its [`GroundBody`]
//!
//! Both are thin wrappers over
//! [`GroundControl`](crate::components::groundcontrol::GroundControl); the
//! control law itself never touches the world.
use bevy_ecs::prelude::*;

use crate::components::groundbody::GroundBody;
use crate::components::groundcontrol::GroundControl;
use crate::resources::input::AxisInput;
use crate::resources::worldtime::WorldTime;

/// Activate controllers spawned onto an entity that is already on the ground.
pub fn ground_control_activation(
    mut query: Query<(&mut GroundControl, &mut GroundBody), Added<GroundControl>>,
    input: Option<Res<AxisInput>>,
) {
    let raw_input = input.map(|i| i.value).unwrap_or(0.0);
    for (mut control, mut body) in query.iter_mut() {
        if body.grounded && !control.is_active() {
            control.enter(&mut body, raw_input);
        }
    }
}

/// Advance every active controller by the current world delta.
pub fn ground_control_fixed_update(
    mut query: Query<(&mut GroundControl, &mut GroundBody)>,
    time: Res<WorldTime>,
) {
    for (mut control, mut body) in query.iter_mut() {
        control.fixed_update(&mut body, time.delta);
    }
}
