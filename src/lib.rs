//! A coordinator/worker N-body simulation of a two-dimensional galaxy.
//!
//! A central [`cluster::Coordinator`] owns the galaxy: one heavy singularity
//! at the centre of a rectangular region surrounded by randomly placed stars.
//! Every step it partitions the galaxy across a pool of workers, sends each of
//! them its subset together with the full population, and merges what they
//! send back before handing the result to a [`snapshot::SnapshotSink`].
pub mod utils;
pub mod errors;
pub mod constants_config;
pub mod kinematics;
pub mod galaxy;
pub mod cluster;
pub mod snapshot;

pub use constants_config::SimulationConfig;
pub use errors::SimulationError;


/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
