//! Input systems.
//!
//! - [`ground_control_input`] copies the shared
//!   [`AxisInput`](crate::resources::input::AxisInput) into every active
//!   [`GroundControl`](crate::components::groundcontrol::GroundControl).
//!
//! Controllers that are locked or have control disabled keep their previous
//! axis value.
use bevy_ecs::prelude::*;

use crate::components::groundcontrol::GroundControl;
use crate::resources::input::AxisInput;

/// Refresh each active controller's axis from the input resource.
pub fn ground_control_input(mut query: Query<&mut GroundControl>, input: Res<AxisInput>) {
    for mut control in query.iter_mut() {
        control.poll_axis(input.value);
    }
}
