//! Initial population of a run.
//!
//! The singularity always comes first, at the exact centre of the region.
//! Stars are scattered on a disc around it, and each gets a starting velocity
//! whose sign depends on the quadrant it landed in. The result is a diamond
//! shaped flow that winds up into orbits over the first few thousand steps.
//!
//! # Example
//!
//! ```
//! use galactic_orbits::SimulationConfig;
//! use galactic_orbits::galaxy::{GalaxyGenerator, ObjectKind};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = SimulationConfig::default();
//! let generator = GalaxyGenerator::new(&config);
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let galaxy = generator.generate(5, 100.0, 100.0, &mut rng).unwrap();
//! assert_eq!(galaxy.len(), 5);
//! assert_eq!(galaxy.as_slice()[0].kind, ObjectKind::Singularity);
//! ```

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants_config::SimulationConfig;
use crate::errors::SimulationError;
use crate::galaxy::{GalacticObject, Galaxy};
use crate::utils::light_years_to_metres;

/// Builds galaxies from the mass, speed and time settings of a configuration.
#[derive(Debug, Clone)]
pub struct GalaxyGenerator {
    singularity_mass: f64,
    star_mass_range: (f64, f64),
    initial_speed: f64,
    step_interval: f64,
}

impl GalaxyGenerator {
    pub fn new(config: &SimulationConfig) -> Self {
        GalaxyGenerator {
            singularity_mass: config.singularity_mass,
            star_mass_range: config.star_mass_range,
            initial_speed: config.initial_speed_magnitude,
            step_interval: config.step_interval,
        }
    }

    /// Generates `count` objects inside a `width` × `height` light year region.
    ///
    /// Object 0 is the singularity. Objects `1..count` are stars.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Configuration`] when `count <= 0`, when the
    /// region is not strictly positive, or when the star mass range is
    /// inverted or non-positive.
    pub fn generate<R: Rng>(
        &self,
        count: i64,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Result<Galaxy, SimulationError> {
        if count <= 0 {
            return Err(SimulationError::configuration(format!(
                "Galaxy needs at least one object, got {}",
                count
            )));
        }
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(SimulationError::configuration(format!(
                "Region must be positive, got {} x {}",
                width, height
            )));
        }
        let (min_mass, max_mass) = self.star_mass_range;
        if !(min_mass > 0.0 && min_mass <= max_mass && max_mass.is_finite()) {
            return Err(SimulationError::configuration(format!(
                "Invalid star mass range ({}, {})",
                min_mass, max_mass
            )));
        }

        let width_m = light_years_to_metres(width);
        let height_m = light_years_to_metres(height);
        let centre = (width_m / 2.0, height_m / 2.0);

        let mut objects = Vec::with_capacity(count as usize);
        objects.push(GalacticObject::singularity(0, centre, self.singularity_mass));

        for id in 1..count as u64 {
            let (ux, uy) = random_unit_vector(rng);
            let x = ux * light_years_to_metres(random_whole_below(rng, width / 2.0)) + centre.0;
            let y = uy * light_years_to_metres(random_whole_below(rng, height / 2.0)) + centre.1;

            let mut xs = self.initial_speed;
            let mut ys = -self.initial_speed;
            if x < centre.0 {
                ys = -ys;
            }
            if y < centre.1 {
                xs = -xs;
            }
            xs *= 1.0 - x / width_m;
            ys *= 1.0 - y / height_m;

            let mass = rng.random_range(min_mass..=max_mass);
            objects.push(GalacticObject::star(
                id,
                (x, y),
                (xs * self.step_interval, ys * self.step_interval),
                mass,
            ));
        }

        debug!("Generated {} galactic objects in a {} x {} ly region", objects.len(), width, height);
        Galaxy::from_objects(objects)
    }
}

/// Generates the galaxy a configuration describes.
///
/// The configuration's `seed` makes the result reproducible; without one the
/// generator is seeded from the operating system.
pub fn generate_galaxy(config: &SimulationConfig) -> Result<Galaxy, SimulationError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    GalaxyGenerator::new(config).generate(
        config.particle_count,
        config.region_width,
        config.region_height,
        &mut rng,
    )
}

/// Uniformly random direction on the unit circle's bounding square, normalized.
fn random_unit_vector<R: Rng>(rng: &mut R) -> (f64, f64) {
    loop {
        let x = (rng.random::<f64>() - 0.5) * 2.0;
        let y = (rng.random::<f64>() - 0.5) * 2.0;
        let length = (x * x + y * y).sqrt();
        if length > 0.0 {
            return (x / length, y / length);
        }
    }
}

/// Whole number drawn uniformly from `[0, upper)`, or 0 when that range is empty.
fn random_whole_below<R: Rng>(rng: &mut R, upper: f64) -> f64 {
    let upper = upper as u64;
    if upper == 0 {
        0.0
    } else {
        rng.random_range(0..upper) as f64
    }
}
