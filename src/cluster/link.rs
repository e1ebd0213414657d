//! Coordinator-side handles onto workers.
//!
//! [`WorkerLink`] is the only thing the coordinator knows about a worker: a
//! rank, a way to send a command and a way to wait for a reply. The crate's
//! own transport runs each worker on a dedicated thread and joins it to the
//! coordinator with a pair of channels ([`ThreadWorker`]).

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::debug;

use crate::cluster::messages::{WorkerCommand, WorkerReply};
use crate::cluster::worker::Worker;
use crate::constants_config::SimulationConfig;
use crate::errors::SimulationError;

/// A point-to-point connection from the coordinator to one worker.
pub trait WorkerLink: Send {
    fn rank(&self) -> usize;

    fn send(&self, command: WorkerCommand) -> Result<(), SimulationError>;

    /// Waits at most `timeout` for the worker's next reply.
    fn receive(&self, timeout: Duration) -> Result<WorkerReply, SimulationError>;

    /// Waits for the worker to finish after it has been sent `Stop`.
    fn join(&mut self) -> Result<(), SimulationError> {
        Ok(())
    }
}

/// A worker running on its own OS thread.
pub struct ThreadWorker {
    rank: usize,
    commands: Sender<WorkerCommand>,
    replies: Receiver<WorkerReply>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadWorker {
    pub fn spawn(rank: usize, config: SimulationConfig) -> Result<Self, SimulationError> {
        let (command_tx, command_rx) = unbounded();
        let (reply_tx, reply_rx) = unbounded();
        let worker = Worker::new(rank, config, command_rx, reply_tx);

        let handle = thread::Builder::new()
            .name(format!("galaxy-worker-{}", rank))
            .spawn(move || worker.run())
            .map_err(|e| SimulationError::communication(format!("Cannot start worker {}: {}", rank, e)))?;

        Ok(ThreadWorker {
            rank,
            commands: command_tx,
            replies: reply_rx,
            handle: Some(handle),
        })
    }
}

impl WorkerLink for ThreadWorker {
    fn rank(&self) -> usize {
        self.rank
    }

    fn send(&self, command: WorkerCommand) -> Result<(), SimulationError> {
        self.commands
            .send(command)
            .map_err(|_| SimulationError::communication(format!("Worker {} is no longer accepting work", self.rank)))
    }

    fn receive(&self, timeout: Duration) -> Result<WorkerReply, SimulationError> {
        self.replies.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => SimulationError::communication(format!(
                "Worker {} did not reply within {:?}",
                self.rank, timeout
            )),
            RecvTimeoutError::Disconnected => {
                SimulationError::communication(format!("Worker {} hung up", self.rank))
            }
        })
    }

    fn join(&mut self) -> Result<(), SimulationError> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SimulationError::communication(format!("Worker {} panicked", self.rank))),
            None => Ok(()),
        }
    }
}

impl Drop for ThreadWorker {
    fn drop(&mut self) {
        // Never joined: ask the thread to finish and let it run down detached.
        if self.handle.is_some() {
            let _ = self.commands.send(WorkerCommand::Stop);
        }
    }
}

/// Starts `config.worker_count` thread workers, ranked from 0.
pub fn spawn_thread_pool(config: &SimulationConfig) -> Result<Vec<Box<dyn WorkerLink>>, SimulationError> {
    if config.worker_count == 0 {
        return Err(SimulationError::configuration("worker_count must be at least 1"));
    }
    let mut workers: Vec<Box<dyn WorkerLink>> = Vec::with_capacity(config.worker_count);
    for rank in 0..config.worker_count {
        workers.push(Box::new(ThreadWorker::spawn(rank, config.clone())?));
    }
    debug!("Spawned {} thread workers", workers.len());
    Ok(workers)
}
