//! Ground control move.
//!
//! [`GroundControl`] is the active-state controller that translates a single
//! input axis into ground velocity while a character stands on a surface. It
//! owns a [`VelocityController`] (the acceleration law) and a [`ControlLock`]
//! (the input suppression countdown), and reads/writes the character's
//! [`GroundBody`] passed in by the caller.
//!
//! # Fixed step
//!
//! Each fixed step, in this order:
//!
//! 1. Tick the control lock
//! 2. If unlocked, accelerate using the current axis
//! 3. If slower than `detach_speed` on a wall or ceiling (50°..310°), lock
//! 4. Write `disable_slope_gravity`
//! 5. Write `disable_ground_friction`
//! 6. If unlocked with input, face the direction of motion
//!
//! Entering the active state, and every attach while active, runs the same
//! step with a zero timestep so collaborators see correct flags before the
//! first timed step.
//!
//! # Related
//!
//! - [`crate::systems::groundcontrol`] – systems driving this component
//! - [`crate::events::surface`] – surface contact events delivered to
//!   [`GroundControl::handle_event`]

use bevy_ecs::prelude::Component;
use log::{debug, trace};

use crate::components::controllock::ControlLock;
use crate::components::groundbody::GroundBody;
use crate::components::velocitycontroller::{VelocityController, approx_zero};
use crate::events::surface::SurfaceContact;

/// Lower bound of the surface angle range treated as a wall or ceiling.
pub const STEEP_ANGLE_MIN: f32 = 50.0;
/// Upper bound of the surface angle range treated as a wall or ceiling.
pub const STEEP_ANGLE_MAX: f32 = 310.0;

/// Whether `angle` lies within `[a, b]`, all in degrees. Angles are normalised
/// into `[0, 360)` first; a range with `a > b` wraps through zero.
pub fn angle_in_range(angle: f32, a: f32, b: f32) -> bool {
    let angle = angle.rem_euclid(360.0);
    let a = a.rem_euclid(360.0);
    let b = b.rem_euclid(360.0);
    if a <= b {
        a <= angle && angle <= b
    } else {
        a <= angle || angle <= b
    }
}

/// Ground locomotion controller for one character.
#[derive(Component, Clone, Debug)]
pub struct GroundControl {
    /// Acceleration law tunables.
    pub velocity: VelocityController,
    /// Input suppression countdown.
    pub lock: ControlLock,
    /// Negate input before storing it as the axis.
    pub invert_axis: bool,
    /// While set, the axis is not refreshed from input.
    pub disable_control: bool,
    axis: f32,
    active: bool,
}

impl Default for GroundControl {
    fn default() -> Self {
        Self::new(VelocityController::default())
    }
}

impl GroundControl {
    /// Create an inactive controller with the given tunables.
    pub fn new(velocity: VelocityController) -> Self {
        Self {
            velocity,
            lock: ControlLock::new(),
            invert_axis: false,
            disable_control: false,
            axis: 0.0,
            active: false,
        }
    }

    /// Builder-style axis inversion.
    pub fn with_inverted_axis(mut self, invert: bool) -> Self {
        self.invert_axis = invert;
        self
    }

    /// Whether the controller is in its active (grounded) state.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current input axis in `[-1, 1]`.
    pub fn axis(&self) -> f32 {
        self.axis
    }

    /// Whether the control lock is on.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Store a raw input value as the axis, applying inversion and clamping.
    pub fn set_axis(&mut self, raw: f32) {
        let value = if self.invert_axis { -raw } else { raw };
        self.axis = value.clamp(-1.0, 1.0);
    }

    /// Refresh the axis from input, unless locked or control is disabled.
    ///
    /// Returns whether the axis was updated.
    pub fn poll_axis(&mut self, raw: f32) -> bool {
        if !self.active || self.lock.is_locked() || self.disable_control {
            return false;
        }
        self.set_axis(raw);
        true
    }

    /// Lock input for `duration` seconds.
    pub fn lock(&mut self, duration: f32) {
        self.lock.lock(duration);
    }

    /// Clear the control lock.
    pub fn unlock(&mut self) {
        self.lock.unlock();
    }

    /// Advance the control lock by `timestep` seconds.
    pub fn update_control_lock(&mut self, timestep: f32) {
        self.lock.tick(timestep);
    }

    /// Apply the acceleration law to `body` with the given magnitude.
    pub fn accelerate(&self, body: &mut GroundBody, magnitude: f32, timestep: f32) -> bool {
        self.velocity
            .accelerate(&mut body.ground_velocity, magnitude, timestep)
    }

    /// Accelerate forward. `magnitude` is in `[0, 1]`.
    pub fn accelerate_forward(&self, body: &mut GroundBody, magnitude: f32, timestep: f32) -> bool {
        self.accelerate(body, magnitude, timestep)
    }

    /// Accelerate backward. `magnitude` is in `[0, 1]`.
    pub fn accelerate_backward(
        &self,
        body: &mut GroundBody,
        magnitude: f32,
        timestep: f32,
    ) -> bool {
        self.accelerate(body, -magnitude, timestep)
    }

    // ==================== PREDICATES ====================

    /// Input pushes in the direction of motion and the lock is off.
    pub fn accelerating(&self, ground_velocity: f32) -> bool {
        !self.lock.is_locked()
            && ((ground_velocity > 0.0 && self.axis > 0.0)
                || (ground_velocity < 0.0 && self.axis < 0.0))
    }

    /// Input opposes the direction of motion and the lock is off.
    pub fn braking(&self, ground_velocity: f32) -> bool {
        !self.lock.is_locked()
            && ((ground_velocity > 0.0 && self.axis < 0.0)
                || (ground_velocity < 0.0 && self.axis > 0.0))
    }

    /// Velocity is about zero and there is no accelerating or braking.
    pub fn standing(&self, ground_velocity: f32) -> bool {
        approx_zero(ground_velocity)
            && !self.braking(ground_velocity)
            && !self.accelerating(ground_velocity)
    }

    /// Speed is within 0.1 units/s of top speed, or above it.
    pub fn at_top_speed(&self, ground_velocity: f32) -> bool {
        self.velocity.at_top_speed(ground_velocity)
    }

    /// Whether there is any directional input.
    pub fn has_input(&self) -> bool {
        !approx_zero(self.axis)
    }

    /// Absolute ground speed divided by top speed.
    pub fn top_speed_percent(&self, ground_velocity: f32) -> f32 {
        self.velocity.top_speed_percent(ground_velocity)
    }

    // ==================== STATE MACHINE ====================

    /// Run one fixed step against `body`. Does nothing while inactive.
    pub fn fixed_update(&mut self, body: &mut GroundBody, timestep: f32) {
        if !self.active {
            return;
        }

        self.lock.tick(timestep);

        if !self.lock.is_locked() {
            self.accelerate(body, self.axis, timestep);
        }

        if body.ground_velocity.abs() < body.detach_speed
            && angle_in_range(body.surface_angle, STEEP_ANGLE_MIN, STEEP_ANGLE_MAX)
        {
            self.lock.lock_default();
        }

        let accelerating = self.accelerating(body.ground_velocity);
        let braking = self.braking(body.ground_velocity);
        let locked = self.lock.is_locked();

        // Slope gravity off while standing still, so the character can stay on slopes
        body.disable_slope_gravity = !(accelerating
            || locked
            || body.ground_velocity.abs() > self.velocity.min_slope_gravity_speed);

        // Friction off while input drives the velocity
        body.disable_ground_friction = (!self.velocity.disable_acceleration && accelerating)
            || (!self.velocity.disable_deceleration && braking);

        if !locked && !approx_zero(self.axis) {
            body.facing_forward = body.ground_velocity >= 0.0;
        }

        trace!(
            "ground step dt={timestep:.4} v={:.4} axis={:.3} locked={locked}",
            body.ground_velocity, self.axis
        );
    }

    /// Zero-timestep pass so the flags reflect the current state.
    pub fn prime(&mut self, body: &mut GroundBody) {
        self.fixed_update(body, 0.0);
    }

    /// Enter the active state with the given raw input, then prime.
    ///
    /// Already-active controllers are only re-primed.
    pub fn enter(&mut self, body: &mut GroundBody, raw_input: f32) {
        if !self.active {
            debug!("Ground control active");
            self.active = true;
            self.set_axis(raw_input);
        }
        self.prime(body);
    }

    /// Leave the active state and put collaborators back to normal.
    pub fn exit(&mut self, body: &mut GroundBody) {
        if !self.active {
            return;
        }
        debug!("Ground control inactive");
        self.active = false;
        self.axis = 0.0;
        body.reset_suppression();
    }

    /// Dispatch a surface contact event.
    ///
    /// - `Attached`: enter (or re-prime) using `raw_input`
    /// - `SteepDetached`: lock with the default duration, only while active
    /// - `Detached`: exit
    pub fn handle_event(&mut self, body: &mut GroundBody, contact: SurfaceContact, raw_input: f32) {
        match contact {
            SurfaceContact::Attached => {
                body.grounded = true;
                self.enter(body, raw_input);
            }
            SurfaceContact::SteepDetached => {
                if self.active {
                    self.lock.lock_default();
                }
            }
            SurfaceContact::Detached => {
                body.grounded = false;
                self.exit(body);
            }
        }
    }
}
