use std::sync::Arc;

use crate::galaxy::GalacticObject;

/// One step's work for a single worker.
///
/// `snapshot` is the whole galaxy as it stood when the step was dispatched.
/// Every worker receives the full snapshot every step; it is shared read-only
/// rather than copied per worker.
#[derive(Debug, Clone)]
pub struct StepTask {
    pub step: u64,
    pub assigned: Vec<GalacticObject>,
    pub snapshot: Arc<[GalacticObject]>,
}

/// A worker's answer to a [`StepTask`]: the assigned objects, advanced one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub step: u64,
    pub updated: Vec<GalacticObject>,
}

/// Messages from the coordinator to a worker.
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    /// Liveness probe; the worker answers with the value doubled.
    Probe(u64),
    Step(StepTask),
    /// Terminal message, the worker loop exits after receiving it.
    Stop,
}

/// Messages from a worker back to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerReply {
    Probe(u64),
    Step(StepResult),
}
