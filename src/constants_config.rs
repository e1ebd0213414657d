// src/constants_config.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;
use crate::utils::{
    light_years_to_metres, GRAVITY, LIGHT_SPEED_METRES_SECOND, SECONDS_YEAR, SOLAR_MASS,
};

/// Every tunable of a simulation run.
///
/// A single value of this type is handed to the coordinator and cloned into
/// each worker; nothing is read from process-wide state.
///
/// Region sizes are in light years, times in seconds, masses in kilograms and
/// speeds in metres per second. The integration kernel works in metres and in
/// metres per step, see [`SimulationConfig::velocity_limit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of galactic objects, the singularity included.
    pub particle_count: i64,
    pub region_width: f64,
    pub region_height: f64,
    /// Number of snapshots produced, the initial one included.
    pub simulation_steps: u64,
    pub step_interval: f64,
    pub initial_speed_magnitude: f64,
    pub star_mass_range: (f64, f64),
    pub singularity_mass: f64,
    pub gravitational_constant: f64,
    pub speed_of_light: f64,
    pub worker_count: usize,
    /// Seconds the coordinator waits on any single worker reply.
    pub reply_timeout: f64,
    /// Seeds the generator; `None` draws the seed from the OS.
    pub seed: Option<u64>,
    /// Directory for per-step JSON snapshots.
    pub output_dir: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            region_width: 52_000.0,
            region_height: 52_000.0,
            simulation_steps: 10_000,
            step_interval: SECONDS_YEAR * 100_000.0,
            initial_speed_magnitude: 100_000.0,
            star_mass_range: (SOLAR_MASS, SOLAR_MASS * 10.0),
            singularity_mass: SOLAR_MASS * 4e22,
            gravitational_constant: GRAVITY,
            speed_of_light: LIGHT_SPEED_METRES_SECOND,
            worker_count: 4,
            reply_timeout: 60.0,
            seed: None,
            output_dir: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration, falling back to the defaults for every `None`.
    ///
    /// # Example
    /// ```
    /// use galactic_orbits::SimulationConfig;
    ///
    /// let config = SimulationConfig::new(Some(10), Some(5), None, Some(7));
    /// assert_eq!(config.particle_count, 10);
    /// assert_eq!(config.simulation_steps, 5);
    /// assert_eq!(config.worker_count, SimulationConfig::default().worker_count);
    /// assert_eq!(config.seed, Some(7));
    /// ```
    pub fn new(
        particle_count: Option<i64>,
        simulation_steps: Option<u64>,
        worker_count: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        let default = Self::default();
        Self {
            particle_count: particle_count.unwrap_or(default.particle_count),
            simulation_steps: simulation_steps.unwrap_or(default.simulation_steps),
            worker_count: worker_count.unwrap_or(default.worker_count),
            seed: seed.or(default.seed),
            ..default
        }
    }

    /// Reads a JSON document; missing keys keep their default values.
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::configuration(format!("Invalid configuration document: {}", e)))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SimulationError::configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Checks every constraint a run depends on.
    ///
    /// # Errors
    /// Returns [`SimulationError::Configuration`] naming the first offending value.
    ///
    /// # Example
    /// ```
    /// use galactic_orbits::{SimulationConfig, SimulationError};
    ///
    /// assert!(SimulationConfig::default().validate().is_ok());
    ///
    /// let config = SimulationConfig { worker_count: 0, ..Default::default() };
    /// assert!(matches!(config.validate(), Err(SimulationError::Configuration(_))));
    /// ```
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.particle_count <= 0 {
            return Err(SimulationError::configuration(format!(
                "particle_count must be at least 1, got {}",
                self.particle_count
            )));
        }
        if self.worker_count == 0 {
            return Err(SimulationError::configuration("worker_count must be at least 1"));
        }
        if self.simulation_steps == 0 {
            return Err(SimulationError::configuration("simulation_steps must be at least 1"));
        }
        let (min_mass, max_mass) = self.star_mass_range;
        if !is_positive(min_mass) || !is_positive(max_mass) || min_mass > max_mass {
            return Err(SimulationError::configuration(format!(
                "star_mass_range must satisfy 0 < min <= max, got ({}, {})",
                min_mass, max_mass
            )));
        }
        let positives = [
            ("region_width", self.region_width),
            ("region_height", self.region_height),
            ("step_interval", self.step_interval),
            ("initial_speed_magnitude", self.initial_speed_magnitude),
            ("singularity_mass", self.singularity_mass),
            ("gravitational_constant", self.gravitational_constant),
            ("speed_of_light", self.speed_of_light),
            ("reply_timeout", self.reply_timeout),
        ];
        for (name, value) in positives {
            if !is_positive(value) {
                return Err(SimulationError::configuration(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn region_width_metres(&self) -> f64 {
        light_years_to_metres(self.region_width)
    }

    pub fn region_height_metres(&self) -> f64 {
        light_years_to_metres(self.region_height)
    }

    /// Largest displacement per step along either axis, `c · Δt`.
    pub fn velocity_limit(&self) -> f64 {
        self.speed_of_light * self.step_interval
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.reply_timeout).unwrap_or(Duration::MAX)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
