//! Headless simulation setup.
//!
//! Builds a [`World`] holding one ground-controlled character, registers the
//! surface contact observer, and assembles the fixed-step schedule:
//!
//! 1. `apply_locomotion_config_changes` – hot reload tunables
//! 2. `ground_control_activation` – enter for grounded newcomers
//! 3. `ground_control_input` – refresh axes from [`AxisInput`]
//! 4. `ground_control_fixed_update` – lock, accelerate, re-lock, flags
//!
//! [`Simulation::run_script`] feeds an [`InputScript`] through the schedule and
//! records a [`StepSample`] after every step.

use bevy_ecs::prelude::*;
use log::{debug, trace};
use serde::Serialize;

use crate::components::groundbody::GroundBody;
use crate::components::groundcontrol::GroundControl;
use crate::events::surface::{SurfaceContactEvent, surface_contact_observer};
use crate::resources::input::AxisInput;
use crate::resources::inputscript::{InputScript, ScriptSegment};
use crate::resources::locomotionconfig::LocomotionConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::groundcontrol::{ground_control_activation, ground_control_fixed_update};
use crate::systems::input::ground_control_input;
use crate::systems::locomotionconfig::apply_locomotion_config_changes;
use crate::systems::time::update_world_time;

/// Snapshot of one character after a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepSample {
    pub step: u64,
    pub time: f32,
    pub axis: f32,
    pub ground_velocity: f32,
    pub surface_angle: f32,
    pub active: bool,
    pub locked: bool,
    pub lock_remaining: f32,
    pub accelerating: bool,
    pub braking: bool,
    pub standing: bool,
    pub at_top_speed: bool,
    pub top_speed_percent: f32,
    pub has_input: bool,
    pub facing_forward: bool,
    pub disable_slope_gravity: bool,
    pub disable_ground_friction: bool,
}

impl StepSample {
    /// Capture the state of `control` and `body`.
    pub fn capture(step: u64, time: f32, control: &GroundControl, body: &GroundBody) -> Self {
        let v = body.ground_velocity;
        Self {
            step,
            time,
            axis: control.axis(),
            ground_velocity: v,
            surface_angle: body.surface_angle,
            active: control.is_active(),
            locked: control.is_locked(),
            lock_remaining: control.lock.remaining(),
            accelerating: control.accelerating(v),
            braking: control.braking(v),
            standing: control.standing(v),
            at_top_speed: control.at_top_speed(v),
            top_speed_percent: control.top_speed_percent(v),
            has_input: control.has_input(),
            facing_forward: body.facing_forward,
            disable_slope_gravity: body.disable_slope_gravity,
            disable_ground_friction: body.disable_ground_friction,
        }
    }
}

/// Build the fixed-step schedule.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(apply_locomotion_config_changes);
    update.add_systems(ground_control_activation.after(apply_locomotion_config_changes));
    update.add_systems(ground_control_input.after(ground_control_activation));
    update.add_systems(ground_control_fixed_update.after(ground_control_input));
    update
}

/// A world with one ground-controlled character and its schedule.
pub struct Simulation {
    pub world: World,
    pub schedule: Schedule,
    pub player: Entity,
    pub samples: Vec<StepSample>,
}

impl Simulation {
    /// Create the world, insert resources, and spawn the character at rest.
    pub fn new(config: LocomotionConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
        world.insert_resource(AxisInput::default());
        world.insert_resource(config);
        world.add_observer(surface_contact_observer);

        let player = world
            .spawn((GroundControl::default(), GroundBody::new()))
            .id();
        world.flush();

        Self {
            world,
            schedule: build_schedule(),
            player,
            samples: Vec::new(),
        }
    }

    /// Fixed timestep from the configuration.
    pub fn timestep(&self) -> f32 {
        self.world.resource::<LocomotionConfig>().timestep
    }

    /// Run one fixed step and record a sample.
    ///
    /// Picks up `time_scale` from the configuration so a reload takes effect
    /// on the next step.
    pub fn step(&mut self) -> StepSample {
        let dt = self.timestep();
        let time_scale = self.world.resource::<LocomotionConfig>().time_scale;
        self.world.resource_mut::<WorldTime>().time_scale = time_scale;
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();

        let sample = self.sample();
        trace!("{:?}", sample);
        self.samples.push(sample);
        sample
    }

    /// Capture the character's current state without stepping.
    pub fn sample(&self) -> StepSample {
        let time = *self.world.resource::<WorldTime>();
        let control = self
            .world
            .get::<GroundControl>(self.player)
            .cloned()
            .unwrap_or_default();
        let body = self
            .world
            .get::<GroundBody>(self.player)
            .copied()
            .unwrap_or_default();
        StepSample::capture(time.frame_count, time.elapsed, &control, &body)
    }

    /// Apply one script segment. `max_steps` caps the total number of samples.
    pub fn apply(&mut self, segment: &ScriptSegment, max_steps: Option<u64>) {
        match segment {
            ScriptSegment::Hold { axis, steps } => {
                self.world.resource_mut::<AxisInput>().set(*axis);
                for _ in 0..*steps {
                    if max_steps.is_some_and(|max| self.samples.len() as u64 >= max) {
                        return;
                    }
                    self.step();
                }
            }
            ScriptSegment::SurfaceAngle { degrees } => {
                if let Some(mut body) = self.world.get_mut::<GroundBody>(self.player) {
                    body.surface_angle = *degrees;
                }
            }
            ScriptSegment::SetVelocity { ground_velocity } => {
                if let Some(mut body) = self.world.get_mut::<GroundBody>(self.player) {
                    body.ground_velocity = *ground_velocity;
                }
            }
            ScriptSegment::Contact { contact } => {
                debug!("Script contact {:?}", contact);
                self.world.trigger(SurfaceContactEvent {
                    entity: self.player,
                    contact: *contact,
                });
                self.world.flush();
            }
        }
    }

    /// Run every segment of `script` in order and return the recorded samples.
    pub fn run_script(&mut self, script: &InputScript, max_steps: Option<u64>) -> &[StepSample] {
        for segment in &script.segments {
            self.apply(segment, max_steps);
        }
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::surface::SurfaceContact;

    #[test]
    fn test_first_step_activates_grounded_player() {
        let mut sim = Simulation::new(LocomotionConfig::new());
        let sample = sim.step();
        assert!(sample.active);
        assert!(sample.standing);
        assert_eq!(sample.step, 1);
    }

    #[test]
    fn test_hold_forward_reaches_top_speed() {
        let mut sim = Simulation::new(LocomotionConfig::new());
        let script = InputScript {
            segments: vec![ScriptSegment::Hold {
                axis: 1.0,
                steps: 200,
            }],
        };
        let samples = sim.run_script(&script, None);
        assert_eq!(samples.len(), 200);
        let last = samples.last().unwrap();
        assert!(last.at_top_speed);
        assert!(last.accelerating);
        assert!(last.disable_ground_friction);
        // Bounded overshoot only
        let config = LocomotionConfig::new();
        assert!(
            last.ground_velocity
                <= config.velocity.top_speed
                    + config.velocity.acceleration * config.timestep
                    + 1e-4
        );
    }

    #[test]
    fn test_sample_reports_input_and_speed_fraction() {
        let mut sim = Simulation::new(LocomotionConfig::new());
        let idle = sim.step();
        assert!(!idle.has_input);
        assert_eq!(idle.top_speed_percent, 0.0);

        sim.world.resource_mut::<AxisInput>().set(1.0);
        let moving = sim.step();
        assert!(moving.has_input);
        let expected = moving.ground_velocity / LocomotionConfig::new().velocity.top_speed;
        assert!((moving.top_speed_percent - expected).abs() < 1e-6);
        assert!(moving.top_speed_percent > 0.0);
    }

    #[test]
    fn test_time_scale_from_config_scales_step() {
        let mut config = LocomotionConfig::new();
        config.time_scale = 0.5;
        let timestep = config.timestep;
        let mut sim = Simulation::new(config);
        sim.world.resource_mut::<AxisInput>().set(1.0);
        let sample = sim.step();
        assert!((sample.time - timestep * 0.5).abs() < 1e-6);
        assert!((sample.ground_velocity - 1.6875 * timestep * 0.5).abs() < 1e-5);

        sim.world.resource_mut::<LocomotionConfig>().time_scale = 1.0;
        let sample = sim.step();
        assert!((sample.time - timestep * 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_max_steps_caps_samples() {
        let mut sim = Simulation::new(LocomotionConfig::new());
        let samples = sim.run_script(&InputScript::demo(), Some(25));
        assert_eq!(samples.len(), 25);
    }

    #[test]
    fn test_contact_segment_reaches_observer() {
        let mut sim = Simulation::new(LocomotionConfig::new());
        sim.step();
        sim.apply(
            &ScriptSegment::Contact {
                contact: SurfaceContact::SteepDetached,
            },
            None,
        );
        assert!(sim.sample().locked);
    }

    #[test]
    fn test_demo_runs_to_completion() {
        let mut sim = Simulation::new(LocomotionConfig::new());
        let script = InputScript::demo();
        let total = script.total_steps();
        let samples = sim.run_script(&script, None);
        assert_eq!(samples.len() as u64, total);
        assert!(samples.iter().any(|s| s.braking));
        assert!(samples.iter().any(|s| s.locked));
        assert!(samples.iter().any(|s| !s.active));
    }
}
