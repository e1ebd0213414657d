// src/errors.rs

use std::fmt;
use std::error::Error;

/// Represents errors that can end a simulation run.
///
/// Every variant is fatal: the coordinator never retries, buffers or swallows
/// a failure, it stops the run and hands the error back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// An invalid particle count, worker count, mass range or other setting.
    /// Raised before the first step is taken.
    Configuration(String),
    /// A worker did not answer in time, its channel closed, or the subset it
    /// returned does not match what was dispatched to it.
    Communication(String),
    /// The snapshot sink failed to persist a step.
    Persistence(String),
}

impl SimulationError {
    pub fn configuration(message: impl Into<String>) -> Self {
        SimulationError::Configuration(message.into())
    }

    pub fn communication(message: impl Into<String>) -> Self {
        SimulationError::Communication(message.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        SimulationError::Persistence(message.into())
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            SimulationError::Communication(msg) => write!(f, "Communication error: {}", msg),
            SimulationError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl Error for SimulationError {}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Persistence(err.to_string())
    }
}
