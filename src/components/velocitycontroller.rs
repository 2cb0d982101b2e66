//! Ground acceleration law.
//!
//! [`VelocityController`] turns a clamped input magnitude into a change of the
//! signed ground velocity. Which constant is applied depends only on the sign
//! relationship between the current velocity and the requested direction:
//!
//! - input opposes motion: `deceleration` (skid)
//! - input agrees with motion, or the character is still: `acceleration`
//!
//! The two are never applied in the same call.
//!
//! # Top speed
//!
//! `top_speed` only guards the *start* of an acceleration step. A single step
//! may carry the velocity past the cap by up to `acceleration * timestep`; the
//! next call in the same direction then returns `false`. There is no clamp.

/// Tolerance used for "approximately zero" comparisons.
pub const EPSILON: f32 = 1e-4;

/// Whether `value` is within [`EPSILON`] of zero.
pub fn approx_zero(value: f32) -> bool {
    value.abs() < EPSILON
}

/// Tunables for the ground acceleration law.
///
/// Values are in world units per second (speeds) and per second squared
/// (rates). Defaults match a classic platformer run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityController {
    /// Acceleration while input agrees with motion.
    pub acceleration: f32,
    /// Skip the acceleration branch entirely.
    pub disable_acceleration: bool,
    /// Deceleration while input opposes motion.
    pub deceleration: f32,
    /// Skip the deceleration branch entirely.
    pub disable_deceleration: bool,
    /// Speed at which acceleration steps stop being started.
    pub top_speed: f32,
    /// Ground speed above which slope gravity always applies. Lets the
    /// character stand still on slopes.
    pub min_slope_gravity_speed: f32,
}

impl Default for VelocityController {
    fn default() -> Self {
        Self {
            acceleration: 1.6875,
            disable_acceleration: false,
            deceleration: 18.0,
            disable_deceleration: false,
            top_speed: 3.6,
            min_slope_gravity_speed: 0.1,
        }
    }
}

impl VelocityController {
    /// Create a controller with the given rates and speed caps.
    pub fn new(
        acceleration: f32,
        deceleration: f32,
        top_speed: f32,
        min_slope_gravity_speed: f32,
    ) -> Self {
        Self {
            acceleration,
            deceleration,
            top_speed,
            min_slope_gravity_speed,
            ..Self::default()
        }
    }

    /// Apply one step of the acceleration law to `ground_velocity`.
    ///
    /// `magnitude` is clamped to `[-1, 1]`; positive pushes forward. Returns
    /// whether the velocity was changed by a branch (a zero `timestep` still
    /// counts as a taken branch).
    pub fn accelerate(&self, ground_velocity: &mut f32, magnitude: f32, timestep: f32) -> bool {
        let magnitude = magnitude.clamp(-1.0, 1.0);
        if approx_zero(magnitude) {
            return false;
        }

        if magnitude < 0.0 {
            if !self.disable_deceleration && *ground_velocity > 0.0 {
                *ground_velocity += self.deceleration * magnitude * timestep;
                return true;
            } else if !self.disable_acceleration && *ground_velocity > -self.top_speed {
                *ground_velocity += self.acceleration * magnitude * timestep;
                return true;
            }
        } else if magnitude > 0.0 {
            if !self.disable_deceleration && *ground_velocity < 0.0 {
                *ground_velocity += self.deceleration * magnitude * timestep;
                return true;
            } else if !self.disable_acceleration && *ground_velocity < self.top_speed {
                *ground_velocity += self.acceleration * magnitude * timestep;
                return true;
            }
        }

        false
    }

    /// Whether `ground_velocity` is within 0.1 units/s of top speed, or above it.
    pub fn at_top_speed(&self, ground_velocity: f32) -> bool {
        ground_velocity.abs() - self.top_speed > -0.1
    }

    /// Absolute ground speed as a fraction of top speed.
    pub fn top_speed_percent(&self, ground_velocity: f32) -> f32 {
        ground_velocity.abs() / self.top_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < TEST_EPSILON
    }

    // ==================== NO INPUT ====================

    #[test]
    fn test_zero_magnitude_returns_false() {
        let vc = VelocityController::default();
        for start in [-5.0, -1.0, 0.0, 1.0, 5.0] {
            let mut v = start;
            assert!(!vc.accelerate(&mut v, 0.0, 1.0));
            assert_eq!(v, start);
            assert!(!vc.accelerate(&mut v, EPSILON * 0.5, 1.0));
            assert!(!vc.accelerate(&mut v, -EPSILON * 0.5, 1.0));
            assert_eq!(v, start);
        }
    }

    // ==================== ACCELERATION ====================

    #[test]
    fn test_accelerate_from_rest() {
        let vc = VelocityController {
            top_speed: 3.6,
            acceleration: 1.6875,
            ..Default::default()
        };
        let mut v = 0.0;
        assert!(vc.accelerate(&mut v, 1.0, 1.0));
        assert!(approx_eq(v, 1.6875));
    }

    #[test]
    fn test_accelerate_backward_from_rest() {
        let vc = VelocityController::default();
        let mut v = 0.0;
        assert!(vc.accelerate(&mut v, -1.0, 1.0));
        assert!(approx_eq(v, -1.6875));
    }

    #[test]
    fn test_partial_magnitude_scales_increment() {
        let vc = VelocityController::default();
        let mut v = 0.0;
        assert!(vc.accelerate(&mut v, 0.5, 0.5));
        assert!(approx_eq(v, 1.6875 * 0.25));
    }

    #[test]
    fn test_magnitude_is_clamped() {
        let vc = VelocityController::default();
        let mut clamped = 0.0;
        let mut unit = 0.0;
        vc.accelerate(&mut clamped, 7.0, 0.1);
        vc.accelerate(&mut unit, 1.0, 0.1);
        assert!(approx_eq(clamped, unit));

        let mut clamped = 0.0;
        vc.accelerate(&mut clamped, -7.0, 0.1);
        assert!(approx_eq(clamped, -unit));
    }

    // ==================== DECELERATION ====================

    #[test]
    fn test_braking_forward_uses_deceleration() {
        let vc = VelocityController {
            deceleration: 18.0,
            ..Default::default()
        };
        let mut v = 2.0;
        assert!(vc.accelerate(&mut v, -1.0, 0.1));
        assert!(approx_eq(v, 0.2));
    }

    #[test]
    fn test_braking_backward_uses_deceleration() {
        let vc = VelocityController::default();
        let mut v = -2.0;
        assert!(vc.accelerate(&mut v, 1.0, 0.1));
        assert!(approx_eq(v, -0.2));
    }

    #[test]
    fn test_braking_can_cross_zero_in_one_step() {
        let vc = VelocityController::default();
        let mut v = 0.5;
        assert!(vc.accelerate(&mut v, -1.0, 0.1));
        assert!(approx_eq(v, 0.5 - 1.8));
        // Next step moving backward accelerates, it does not brake
        let before = v;
        assert!(vc.accelerate(&mut v, -1.0, 0.1));
        assert!(approx_eq(v, before - 1.6875 * 0.1));
    }

    #[test]
    fn test_braking_ignores_top_speed() {
        let vc = VelocityController::default();
        let mut v = 5.0;
        assert!(vc.accelerate(&mut v, -1.0, 0.1));
        assert!(approx_eq(v, 3.2));
    }

    #[test]
    fn test_opposing_input_never_uses_acceleration() {
        let vc = VelocityController {
            acceleration: 1.0,
            deceleration: 10.0,
            top_speed: 100.0,
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(0x5EED);
        for _ in 0..1000 {
            let start = rng.f32() * 20.0 + 0.001;
            let magnitude = -(rng.f32() * 0.99 + 0.01);
            let timestep = rng.f32() * 0.1;

            let mut v = start;
            assert!(vc.accelerate(&mut v, magnitude, timestep));
            assert!(approx_eq(v, start + 10.0 * magnitude * timestep));

            let mut v = -start;
            assert!(vc.accelerate(&mut v, -magnitude, timestep));
            assert!(approx_eq(v, -start - 10.0 * magnitude * timestep));
        }
    }

    // ==================== TOP SPEED ====================

    #[test]
    fn test_overshoot_is_bounded_by_one_step() {
        let vc = VelocityController::default();
        let delta = 0.01;
        let timestep = 0.5;
        let mut v = vc.top_speed - delta;
        assert!(vc.accelerate(&mut v, 1.0, timestep));
        assert!(v > vc.top_speed);
        assert!(v <= vc.top_speed - delta + vc.acceleration * timestep + TEST_EPSILON);

        let before = v;
        assert!(!vc.accelerate(&mut v, 1.0, timestep));
        assert_eq!(v, before);
    }

    #[test]
    fn test_no_acceleration_at_exact_top_speed() {
        let vc = VelocityController::default();
        let mut v = vc.top_speed;
        assert!(!vc.accelerate(&mut v, 1.0, 0.1));
        let mut v = -vc.top_speed;
        assert!(!vc.accelerate(&mut v, -1.0, 0.1));
        assert_eq!(v, -vc.top_speed);
    }

    #[test]
    fn test_at_top_speed() {
        let vc = VelocityController::default();
        assert!(vc.at_top_speed(3.6));
        assert!(vc.at_top_speed(-3.55));
        assert!(vc.at_top_speed(10.0));
        assert!(!vc.at_top_speed(3.4));
        assert!(!vc.at_top_speed(0.0));
    }

    #[test]
    fn test_top_speed_percent() {
        let vc = VelocityController::default();
        assert!(approx_eq(vc.top_speed_percent(-1.8), 0.5));
        assert!(approx_eq(vc.top_speed_percent(0.0), 0.0));
    }

    // ==================== DISABLED BRANCHES ====================

    #[test]
    fn test_disabled_deceleration_falls_through_to_acceleration() {
        let vc = VelocityController {
            disable_deceleration: true,
            ..Default::default()
        };
        let mut v = 2.0;
        assert!(vc.accelerate(&mut v, -1.0, 0.1));
        assert!(approx_eq(v, 2.0 - 0.16875));
    }

    #[test]
    fn test_disabled_acceleration_only_brakes() {
        let vc = VelocityController {
            disable_acceleration: true,
            ..Default::default()
        };
        let mut v = 0.0;
        assert!(!vc.accelerate(&mut v, 1.0, 0.1));
        assert_eq!(v, 0.0);

        let mut v = -1.0;
        assert!(vc.accelerate(&mut v, 1.0, 0.1));
        assert!(approx_eq(v, -1.0 + 1.8));
    }

    #[test]
    fn test_both_disabled_never_changes_velocity() {
        let vc = VelocityController {
            disable_acceleration: true,
            disable_deceleration: true,
            ..Default::default()
        };
        for start in [-2.0, 0.0, 2.0] {
            let mut v = start;
            assert!(!vc.accelerate(&mut v, 1.0, 0.1));
            assert!(!vc.accelerate(&mut v, -1.0, 0.1));
            assert_eq!(v, start);
        }
    }

    #[test]
    fn test_new_keeps_branches_enabled() {
        let vc = VelocityController::new(2.0, 20.0, 6.0, 0.5);
        assert!(!vc.disable_acceleration);
        assert!(!vc.disable_deceleration);
        assert!(approx_eq(vc.top_speed, 6.0));
        assert!(approx_eq(vc.min_slope_gravity_speed, 0.5));
    }
}
