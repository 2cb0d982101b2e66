//! Per-step directional input resource.
//!
//! Input polling happens outside this crate; the host writes the horizontal
//! axis into [`AxisInput`] once per frame and the ground control input system
//! copies it into every active controller.
use bevy_ecs::prelude::*;

/// Horizontal movement axis in `[-1, 1]`. Positive is forward.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisInput {
    pub value: f32,
}

impl AxisInput {
    /// Create an input resource with the given axis value, clamped to `[-1, 1]`.
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(-1.0, 1.0),
        }
    }

    /// Overwrite the axis value, clamped to `[-1, 1]`.
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(-1.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(AxisInput::default().value, 0.0);
    }

    #[test]
    fn test_new_and_set_clamp() {
        assert_eq!(AxisInput::new(4.0).value, 1.0);
        let mut input = AxisInput::new(0.25);
        assert_eq!(input.value, 0.25);
        input.set(-9.0);
        assert_eq!(input.value, -1.0);
    }
}
