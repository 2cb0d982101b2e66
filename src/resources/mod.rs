//! ECS resources made available to systems.
//!
//! Overview
//! - `input` – per-step horizontal input axis
//! - `inputscript` – JSON-described input sequence for headless runs
//! - `locomotionconfig` – INI-backed ground control tunables
//! - `worldtime` – simulation time and delta
pub mod input;
pub mod inputscript;
pub mod locomotionconfig;
pub mod worldtime;
