//! Surface contact events.
//!
//! Surface traversal reports contact changes for a character by triggering a
//! [`SurfaceContactEvent`]. The [`surface_contact_observer`] forwards the
//! contact to the entity's [`GroundControl`] so the move can enter, lock, or
//! exit without registering callbacks on the host.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(surface_contact_observer);
//! world.trigger(SurfaceContactEvent {
//!     entity: player,
//!     contact: SurfaceContact::SteepDetached,
//! });
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::components::groundbody::GroundBody;
use crate::components::groundcontrol::GroundControl;
use crate::resources::input::AxisInput;

/// Kind of contact change reported by surface traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceContact {
    /// The character landed on or snapped to a surface.
    Attached,
    /// The character lost footing because the surface is too steep.
    SteepDetached,
    /// The character left the ground (jump, fall, launch).
    Detached,
}

/// Event carrying a contact change for one entity.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContactEvent {
    /// The entity whose contact changed.
    pub entity: Entity,
    /// What happened.
    pub contact: SurfaceContact,
}

/// Observer that routes a contact change into the entity's ground control.
///
/// The current [`AxisInput`] is handed over so that entering the active state
/// starts with the live input value. Missing input counts as no input.
pub fn surface_contact_observer(
    trigger: On<SurfaceContactEvent>,
    mut query: Query<(&mut GroundControl, &mut GroundBody)>,
    input: Option<Res<AxisInput>>,
) {
    let event = trigger.event();
    let raw_input = input.map(|i| i.value).unwrap_or(0.0);

    match query.get_mut(event.entity) {
        Ok((mut control, mut body)) => {
            control.handle_event(&mut body, event.contact, raw_input);
        }
        Err(_) => {
            warn!(
                "Surface contact {:?} for {:?} ignored: entity lacks GroundControl or GroundBody",
                event.contact, event.entity
            );
        }
    }
}
