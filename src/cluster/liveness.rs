use std::time::Duration;

use log::{info, warn};

use crate::cluster::link::WorkerLink;
use crate::cluster::messages::{WorkerCommand, WorkerReply};
use crate::errors::SimulationError;

/// A pre-flight check that the worker pool is up before any step runs.
///
/// The simulation does not depend on how a check decides; it only requires
/// that a failed check stops the run.
pub trait LivenessCheck: Send {
    fn check(&self, workers: &[Box<dyn WorkerLink>], timeout: Duration) -> Result<(), SimulationError>;
}

/// Sends every worker `rank + 1` and expects twice that value back.
///
/// The probe is never zero, so a worker that echoes its input or answers a
/// constant 0 fails the check at every rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoublingHandshake;

impl LivenessCheck for DoublingHandshake {
    fn check(&self, workers: &[Box<dyn WorkerLink>], timeout: Duration) -> Result<(), SimulationError> {
        info!("Testing {} workers", workers.len());
        for worker in workers {
            let probe = worker.rank() as u64 + 1;
            worker.send(WorkerCommand::Probe(probe))?;
            match worker.receive(timeout)? {
                WorkerReply::Probe(answer) if answer == probe.wrapping_mul(2) => {
                    info!("Worker {} answered the handshake", worker.rank());
                }
                other => {
                    warn!("Worker {} failed the handshake: {:?}", worker.rank(), other);
                    return Err(SimulationError::communication(format!(
                        "Worker {} answered probe {} with {:?}",
                        worker.rank(),
                        probe,
                        other
                    )));
                }
            }
        }
        info!("All workers tested");
        Ok(())
    }
}
