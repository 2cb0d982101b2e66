//! Scripted input for headless runs.
//!
//! An [`InputScript`] is a JSON list of segments consumed in order by the
//! simulation runner: hold an axis value for a number of fixed steps, change
//! the surface angle, or deliver a surface contact event.
//!
//! ```json
//! { "segments": [
//!   { "kind": "hold", "axis": 1.0, "steps": 60 },
//!   { "kind": "surface_angle", "degrees": 90.0 },
//!   { "kind": "contact", "contact": "steep_detached" }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::events::surface::SurfaceContact;

/// One scripted instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptSegment {
    /// Hold the axis at `axis` for `steps` fixed steps.
    Hold { axis: f32, steps: u32 },
    /// Set the surface angle (degrees) under the character.
    SurfaceAngle { degrees: f32 },
    /// Overwrite the ground velocity, e.g. after a spring or a launch.
    SetVelocity { ground_velocity: f32 },
    /// Deliver a surface contact event.
    Contact { contact: SurfaceContact },
}

/// Ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<ScriptSegment>,
}

impl InputScript {
    /// Parse a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Invalid input script: {}", e))
    }

    /// Load a script from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read input script {:?}: {}", path, e))?;
        Self::from_json(&text)
    }

    /// Total number of fixed steps the script runs for.
    pub fn total_steps(&self) -> u64 {
        self.segments
            .iter()
            .map(|s| match s {
                ScriptSegment::Hold { steps, .. } => *steps as u64,
                _ => 0,
            })
            .sum()
    }

    /// Built-in demo: run, skid, reverse, idle, then stall on a wall.
    pub fn demo() -> Self {
        use ScriptSegment::*;
        Self {
            segments: vec![
                Hold {
                    axis: 1.0,
                    steps: 150,
                },
                Hold {
                    axis: -1.0,
                    steps: 30,
                },
                Hold {
                    axis: -1.0,
                    steps: 40,
                },
                Hold {
                    axis: 0.0,
                    steps: 20,
                },
                SetVelocity {
                    ground_velocity: 0.5,
                },
                SurfaceAngle { degrees: 90.0 },
                Hold {
                    axis: 1.0,
                    steps: 20,
                },
                Contact {
                    contact: SurfaceContact::Detached,
                },
                SurfaceAngle { degrees: 0.0 },
                Hold {
                    axis: 1.0,
                    steps: 10,
                },
                Contact {
                    contact: SurfaceContact::Attached,
                },
                Hold {
                    axis: 1.0,
                    steps: 30,
                },
            ],
        }
    }
}
