//! Locomotion configuration change detection system.
//!
//! Monitors [`LocomotionConfig`] for changes and copies the tunables into every
//! [`GroundControl`] and [`GroundBody`]. Controllers only read their copy, so a
//! reload takes effect on the next fixed step.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::groundbody::GroundBody;
use crate::components::groundcontrol::GroundControl;
use crate::resources::locomotionconfig::LocomotionConfig;

/// System that applies locomotion configuration changes.
///
/// When the resource is added or modified, every controller is updated.
/// Otherwise only controllers added since the last run receive the current
/// values, so spawn order relative to the config does not matter.
pub fn apply_locomotion_config_changes(
    maybe_config: Option<Res<LocomotionConfig>>,
    mut query: Query<(&mut GroundControl, Option<&mut GroundBody>)>,
) {
    let Some(config) = maybe_config else {
        return;
    };
    let reload = config.is_changed() || config.is_added();

    let mut updated = 0usize;
    for (mut control, body) in query.iter_mut() {
        if !reload && !control.is_added() {
            continue;
        }
        control.velocity = config.velocity;
        control.invert_axis = config.invert_axis;
        if let Some(mut body) = body {
            body.detach_speed = config.detach_speed;
        }
        updated += 1;
    }

    if reload && updated > 0 {
        info!("Locomotion config applied to {} controller(s)", updated);
    }
}
