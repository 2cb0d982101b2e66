//! Ground control headless runner.
//!
//! Drives a single ground-controlled character through a scripted input
//! sequence using:
//! - **bevy_ecs** for the world, schedule, and surface contact observer
//! - **configparser** for the locomotion tunables (`locomotion.ini`)
//! - **serde_json** for input scripts and the JSON trace output
//!
//! # Step Loop
//!
//! 1. Load `LocomotionConfig` from the INI file (defaults if missing, exit
//!    on any other error)
//! 2. Load the input script, or fall back to the built-in demo
//! 3. For every segment: set input, deliver contact events, run fixed steps
//! 4. Print one sample per step as a table or as JSON lines
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --script run.json --json
//! ```

use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use groundcontrol::resources::inputscript::InputScript;
use groundcontrol::resources::locomotionconfig::LocomotionConfig;
use groundcontrol::simulation::{Simulation, StepSample};

/// Ground locomotion control law runner
#[derive(Parser)]
#[command(version, about = "Runs the ground control law against a scripted input sequence.")]
struct Cli {
    /// Locomotion config INI file.
    #[arg(long, value_name = "PATH", default_value = "./locomotion.ini")]
    config: PathBuf,

    /// JSON input script. Runs the built-in demo when omitted.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Print one JSON object per step instead of a table.
    #[arg(long)]
    json: bool,

    /// Stop after this many steps.
    #[arg(long, value_name = "N")]
    steps: Option<u64>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn print_table_header() {
    println!(
        "{:>6} {:>8} {:>6} {:>9} {:>6} {:>6} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6} {:>6}",
        "step", "time", "axis", "velocity", "angle", "lock", "acc", "brk", "std", "top", "fwd",
        "noslp", "nofrc"
    );
}

fn print_table_row(s: &StepSample) {
    let flag = |b: bool| if b { "x" } else { "." };
    println!(
        "{:>6} {:>8.3} {:>6.2} {:>9.4} {:>6.1} {:>6.3} {:>5} {:>5} {:>5} {:>5} {:>5} {:>6} {:>6}",
        s.step,
        s.time,
        s.axis,
        s.ground_velocity,
        s.surface_angle,
        s.lock_remaining,
        flag(s.accelerating),
        flag(s.braking),
        flag(s.standing),
        flag(s.at_top_speed),
        flag(s.facing_forward),
        flag(s.disable_slope_gravity),
        flag(s.disable_ground_friction),
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = LocomotionConfig::with_path(&cli.config);
    if config.config_path.exists() {
        if let Err(e) = config.load_from_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    } else if !cli.write_config {
        warn!(
            "Config file {:?} not found; using defaults",
            config.config_path
        );
    }

    // Early-exit: write config and quit
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    let script = match &cli.script {
        Some(path) => match InputScript::load(path) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => {
            info!("No script given, running built-in demo");
            InputScript::demo()
        }
    };

    let mut sim = Simulation::new(config);
    let samples = sim.run_script(&script, cli.steps);

    if cli.json {
        for sample in samples {
            match serde_json::to_string(sample) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("Error serializing sample: {e}");
                    std::process::exit(1);
                }
            }
        }
    } else {
        print_table_header();
        for sample in samples {
            print_table_row(sample);
        }
    }

    info!("Ran {} steps", samples.len());
}
