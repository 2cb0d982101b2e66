//! Surface-bound locomotion state.
//!
//! [`GroundBody`] is the part of a character's locomotion state that other
//! systems own: surface traversal writes the velocity and surface angle,
//! friction and gravity read the suppression flags, and presentation reads the
//! facing direction. Ground control reads and mutates it in place each fixed
//! step.

use bevy_ecs::prelude::Component;

/// Default ground speed below which a character slides off walls and ceilings.
pub const DEFAULT_DETACH_SPEED: f32 = 1.5;

/// Locomotion state shared between ground control and its collaborators.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GroundBody {
    /// Signed speed along the surface tangent. Positive is forward.
    pub ground_velocity: f32,
    /// Surface angle relative to the character's gravity, in degrees. Zero is
    /// flat ground.
    pub surface_angle: f32,
    /// Ground speed required to stay attached to steep surfaces.
    pub detach_speed: f32,
    /// Whether the body is standing on a surface.
    pub grounded: bool,
    /// Internal facing direction (not the sprite flip).
    pub facing_forward: bool,
    /// Written by ground control: suppress slope gravity this step.
    pub disable_slope_gravity: bool,
    /// Written by ground control: suppress ground friction this step.
    pub disable_ground_friction: bool,
}

impl Default for GroundBody {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundBody {
    /// Create a body at rest on flat ground, facing forward.
    pub fn new() -> Self {
        Self {
            ground_velocity: 0.0,
            surface_angle: 0.0,
            detach_speed: DEFAULT_DETACH_SPEED,
            grounded: true,
            facing_forward: true,
            disable_slope_gravity: false,
            disable_ground_friction: false,
        }
    }

    /// Create an airborne body. Ground control stays inactive until it attaches.
    pub fn airborne() -> Self {
        Self {
            grounded: false,
            ..Self::new()
        }
    }

    /// Builder-style ground velocity.
    pub fn with_velocity(mut self, ground_velocity: f32) -> Self {
        self.ground_velocity = ground_velocity;
        self
    }

    /// Builder-style surface angle in degrees.
    pub fn with_surface_angle(mut self, degrees: f32) -> Self {
        self.surface_angle = degrees;
        self
    }

    /// Builder-style detach speed.
    pub fn with_detach_speed(mut self, detach_speed: f32) -> Self {
        self.detach_speed = detach_speed;
        self
    }

    /// Put both suppression flags back to their non-suppressed state.
    pub fn reset_suppression(&mut self) {
        self.disable_slope_gravity = false;
        self.disable_ground_friction = false;
    }
}
