//! ECS components for ground-controlled characters.
//!
//! Submodules overview:
//! - [`controllock`] – countdown that suppresses input after losing footing
//! - [`groundbody`] – externally-owned locomotion state (velocity, angle, flags)
//! - [`groundcontrol`] – the active-state move: fixed step, predicates, events
//! - [`velocitycontroller`] – acceleration/deceleration law and its tunables

pub mod controllock;
pub mod groundbody;
pub mod groundcontrol;
pub mod velocitycontroller;
