mod galactic_object;
mod galaxy_generator;
mod partition;

pub use galactic_object::*;
pub use galaxy_generator::*;
pub use partition::*;

#[cfg(test)]
mod galaxy_generator_tests;
