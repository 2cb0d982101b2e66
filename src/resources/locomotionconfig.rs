//! Locomotion configuration resource.
//!
//! Holds the ground control tunables loaded from an INI file. The
//! [`apply_locomotion_config_changes`] system pushes them into every
//! controller whenever the resource changes, so editing and re-inserting the
//! resource hot-reloads a running simulation.
//!
//! # Configuration File Format
//!
//! ```ini
//! [ground_control]
//! acceleration = 1.6875
//! deceleration = 18.0
//! top_speed = 3.6
//! min_slope_gravity_speed = 0.1
//! disable_acceleration = false
//! disable_deceleration = false
//! invert_axis = false
//!
//! [surface]
//! detach_speed = 1.5
//!
//! [simulation]
//! timestep = 0.0166667
//! time_scale = 1.0
//! ```
//!
//! [`apply_locomotion_config_changes`]: crate::systems::locomotionconfig::apply_locomotion_config_changes

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::groundbody::DEFAULT_DETACH_SPEED;
use crate::components::velocitycontroller::VelocityController;
use crate::resources::worldtime::DEFAULT_TIMESTEP;

const DEFAULT_INVERT_AXIS: bool = false;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./locomotion.ini";

/// Locomotion configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LocomotionConfig {
    /// Acceleration law tunables copied into every controller.
    pub velocity: VelocityController,
    /// Negate input before it reaches the controllers.
    pub invert_axis: bool,
    /// Ground speed required to stay on walls and ceilings.
    pub detach_speed: f32,
    /// Fixed simulation step in seconds.
    pub timestep: f32,
    /// Multiplier applied to `timestep` before it reaches the controllers.
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LocomotionConfig {
    /// Create a configuration with default tunables.
    pub fn new() -> Self {
        Self {
            velocity: VelocityController::default(),
            invert_axis: DEFAULT_INVERT_AXIS,
            detach_speed: DEFAULT_DETACH_SPEED,
            timestep: DEFAULT_TIMESTEP,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values. On error nothing is
    /// applied.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file {:?}: {}", self.config_path, e))?;
        self.apply_ini(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    /// Parse every key into a copy and commit it only when all of them are
    /// valid, so a failed load leaves `self` untouched.
    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        let float = |section: &str, key: &str| -> Result<Option<f32>, String> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|v| v as f32))
                .map_err(|e| format!("[{}] {}: {}", section, key, e))
        };
        let positive = |section: &str, key: &str| -> Result<Option<f32>, String> {
            match float(section, key)? {
                Some(v) if !v.is_finite() || v <= 0.0 => Err(format!(
                    "[{}] {} must be a positive number, got {}",
                    section, key, v
                )),
                other => Ok(other),
            }
        };
        let non_negative = |section: &str, key: &str| -> Result<Option<f32>, String> {
            match float(section, key)? {
                Some(v) if !v.is_finite() || v < 0.0 => Err(format!(
                    "[{}] {} must be a non-negative number, got {}",
                    section, key, v
                )),
                other => Ok(other),
            }
        };
        let boolean = |section: &str, key: &str| -> Result<Option<bool>, String> {
            config
                .getbool(section, key)
                .map_err(|e| format!("[{}] {}: {}", section, key, e))
        };

        let mut next = self.clone();

        // [ground_control] section
        if let Some(v) = positive("ground_control", "acceleration")? {
            next.velocity.acceleration = v;
        }
        if let Some(v) = positive("ground_control", "deceleration")? {
            next.velocity.deceleration = v;
        }
        if let Some(v) = positive("ground_control", "top_speed")? {
            next.velocity.top_speed = v;
        }
        if let Some(v) = non_negative("ground_control", "min_slope_gravity_speed")? {
            next.velocity.min_slope_gravity_speed = v;
        }
        if let Some(v) = boolean("ground_control", "disable_acceleration")? {
            next.velocity.disable_acceleration = v;
        }
        if let Some(v) = boolean("ground_control", "disable_deceleration")? {
            next.velocity.disable_deceleration = v;
        }
        if let Some(v) = boolean("ground_control", "invert_axis")? {
            next.invert_axis = v;
        }

        // [surface] section
        if let Some(v) = non_negative("surface", "detach_speed")? {
            next.detach_speed = v;
        }

        // [simulation] section
        if let Some(v) = positive("simulation", "timestep")? {
            next.timestep = v;
        }
        if let Some(v) = positive("simulation", "time_scale")? {
            next.time_scale = v;
        }

        *self = next;

        info!(
            "Loaded locomotion config: accel={}, decel={}, top_speed={}, min_slope_gravity_speed={}, detach_speed={}, timestep={}, time_scale={}",
            self.velocity.acceleration,
            self.velocity.deceleration,
            self.velocity.top_speed,
            self.velocity.min_slope_gravity_speed,
            self.detach_speed,
            self.timestep,
            self.time_scale
        );

        Ok(())
    }

    /// Render the configuration as INI.
    pub fn to_ini(&self) -> Ini {
        let mut config = Ini::new();

        // [ground_control] section
        let gc = &self.velocity;
        config.set("ground_control", "acceleration", Some(gc.acceleration.to_string()));
        config.set("ground_control", "deceleration", Some(gc.deceleration.to_string()));
        config.set("ground_control", "top_speed", Some(gc.top_speed.to_string()));
        config.set(
            "ground_control",
            "min_slope_gravity_speed",
            Some(gc.min_slope_gravity_speed.to_string()),
        );
        config.set(
            "ground_control",
            "disable_acceleration",
            Some(gc.disable_acceleration.to_string()),
        );
        config.set(
            "ground_control",
            "disable_deceleration",
            Some(gc.disable_deceleration.to_string()),
        );
        config.set("ground_control", "invert_axis", Some(self.invert_axis.to_string()));

        // [surface] section
        config.set("surface", "detach_speed", Some(self.detach_speed.to_string()));

        // [simulation] section
        config.set("simulation", "timestep", Some(self.timestep.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        config
    }

    /// Save configuration to the INI file at `config_path`.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved locomotion config to {:?}", self.config_path);

        Ok(())
    }
}
