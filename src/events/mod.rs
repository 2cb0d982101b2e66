//! Event types and observers.
//!
//! Submodules:
//! - [`surface`] – surface contact changes routed into ground control
pub mod surface;
