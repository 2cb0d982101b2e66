//! Control lock countdown.
//!
//! The [`ControlLock`] suppresses player input for a fixed amount of time
//! after the character loses footing on a steep surface. Once triggered it
//! counts down each fixed step and clears itself when the remaining time drops
//! below zero.
//!
//! # How It Works
//!
//! 1. [`ControlLock::lock`] (re)starts the countdown, overriding any lock in
//!    progress
//! 2. [`ControlLock::tick`] subtracts the step's timestep while locked
//! 3. When `remaining < 0`, the lock calls [`ControlLock::unlock`] on itself
//!
//! A negative duration is accepted; the lock then clears on the next tick.
//!
//! # Related
//!
//! - [`crate::components::groundcontrol::GroundControl`] – owns the lock and
//!   gates acceleration on it

use log::debug;

/// Countdown that disables input translation while it is running.
///
/// Invariants: `remaining > 0` implies `locked`, and `!locked` implies
/// `remaining == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlLock {
    locked: bool,
    remaining: f32,
}

impl ControlLock {
    /// Lock duration used when losing footing on a steep surface, in seconds.
    pub const DEFAULT_DURATION: f32 = 0.5;

    /// Create an unlocked control lock.
    pub fn new() -> Self {
        Self {
            locked: false,
            remaining: 0.0,
        }
    }

    /// Whether input is currently suppressed.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Seconds until the lock clears. Zero when unlocked.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Lock for `duration` seconds, replacing whatever was running.
    pub fn lock(&mut self, duration: f32) {
        debug!("Control lock on for {duration:.3}s");
        self.remaining = duration;
        self.locked = true;
    }

    /// Lock for [`ControlLock::DEFAULT_DURATION`].
    pub fn lock_default(&mut self) {
        self.lock(Self::DEFAULT_DURATION);
    }

    /// Clear the lock immediately.
    pub fn unlock(&mut self) {
        if self.locked {
            debug!("Control lock off");
        }
        self.remaining = 0.0;
        self.locked = false;
    }

    /// Advance the countdown by `timestep` seconds. No-op while unlocked.
    pub fn tick(&mut self, timestep: f32) {
        if !self.locked {
            return;
        }

        self.remaining -= timestep;
        if self.remaining < 0.0 {
            self.unlock();
        }
    }
}
