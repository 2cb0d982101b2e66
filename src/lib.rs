//! Ground control library.
//!
//! This module exposes the ground locomotion control law, its ECS components,
//! resources, systems, and events for use in integration tests and as a
//! reusable library.

pub mod components;
pub mod events;
pub mod resources;
pub mod simulation;
pub mod systems;
