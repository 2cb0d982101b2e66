//! Simulation systems.
//!
//! Submodules overview
//! - [`groundcontrol`] – activate controllers and run their fixed step
//! - [`input`] – copy [`crate::resources::input::AxisInput`] into controllers
//! - [`locomotionconfig`] – push config changes into controllers and bodies
//! - [`time`] – update simulation time and delta

pub mod groundcontrol;
pub mod input;
pub mod locomotionconfig;
pub mod time;
