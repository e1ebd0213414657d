use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use galactic_orbits::cluster::{Coordinator, DoublingHandshake};
use galactic_orbits::snapshot::JsonFileSink;
use galactic_orbits::SimulationConfig;

/// Runs a galaxy simulation and writes one JSON snapshot per step.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file; unset keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of galactic objects, the singularity included
    #[arg(short, long)]
    particles: Option<i64>,

    /// Number of snapshots to produce, the initial one included
    #[arg(short, long)]
    steps: Option<u64>,

    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Region width in light years
    #[arg(long)]
    width: Option<f64>,

    /// Region height in light years
    #[arg(long)]
    height: Option<f64>,

    /// Snapshot directory, overrides `output_dir` from the configuration
    #[arg(short, long)]
    output: Option<PathBuf>,
}

// command line values win over the file
fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(particles) = args.particles {
        config.particle_count = particles;
    }
    if let Some(steps) = args.steps {
        config.simulation_steps = steps;
    }
    if let Some(workers) = args.workers {
        config.worker_count = workers;
    }
    if let Some(width) = args.width {
        config.region_width = width;
    }
    if let Some(height) = args.height {
        config.region_height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(output) = &args.output {
        config.output_dir = Some(output.clone());
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let output_dir = config.output_dir.clone().unwrap_or_else(|| PathBuf::from("./orbit"));
    let sink = JsonFileSink::new(&output_dir)?;
    info!("Writing snapshots to {}", sink.directory().display());

    let mut coordinator = Coordinator::new(config, sink)?.with_liveness_check(DoublingHandshake);
    let summary = coordinator.run()?;

    info!(
        "{} objects, {} steps, {} workers, {:.2?}",
        summary.particle_count, summary.steps_completed, summary.worker_count, summary.elapsed
    );
    Ok(())
}
