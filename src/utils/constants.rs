// src/utils/constants.rs

pub const LIGHT_SPEED_METRES_SECOND: f64 = 299_792_458.0;
pub const SECONDS_YEAR: f64 = 31_540_000.0;
/// Metres covered by light in one (simulation) year.
pub const LIGHT_SPEED_METRES_YEAR: f64 = LIGHT_SPEED_METRES_SECOND * SECONDS_YEAR;
pub const GRAVITY: f64 = 6.674e-11;
pub const SOLAR_MASS: f64 = 2e30;
