pub mod constants;

pub use constants::*;
pub use crate::constants_config::SimulationConfig;
pub use crate::errors::SimulationError;

/// Converts a length in light years into metres.
///
/// # Examples
///
/// ```
/// use galactic_orbits::utils::{light_years_to_metres, LIGHT_SPEED_METRES_YEAR};
///
/// assert_eq!(light_years_to_metres(2.0), 2.0 * LIGHT_SPEED_METRES_YEAR);
/// ```
pub fn light_years_to_metres(light_years: f64) -> f64 {
    light_years * LIGHT_SPEED_METRES_YEAR
}
