//! Hand-rolled [`WorkerLink`]s that misbehave in specific ways.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::cluster::{integrate_subset, StepResult, WorkerCommand, WorkerLink, WorkerReply};
use crate::constants_config::SimulationConfig;
use crate::errors::SimulationError;
use crate::galaxy::GalacticObject;
use crate::snapshot::SnapshotSink;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fault {
    /// Accepts every command and never answers.
    Silent,
    /// Answers steps with one object missing.
    DropsObject,
    /// Answers steps tagged with the wrong step index.
    WrongStep,
    /// Answers probes with the value unchanged.
    WrongProbe,
}

pub struct FaultyWorker {
    rank: usize,
    fault: Fault,
    config: SimulationConfig,
    outbox: Sender<WorkerReply>,
    inbox: Receiver<WorkerReply>,
}

impl FaultyWorker {
    pub fn new(rank: usize, fault: Fault, config: &SimulationConfig) -> Self {
        let (outbox, inbox) = unbounded();
        FaultyWorker { rank, fault, config: config.clone(), outbox, inbox }
    }

    pub fn boxed(rank: usize, fault: Fault, config: &SimulationConfig) -> Box<dyn WorkerLink> {
        Box::new(Self::new(rank, fault, config))
    }
}

impl WorkerLink for FaultyWorker {
    fn rank(&self) -> usize {
        self.rank
    }

    fn send(&self, command: WorkerCommand) -> Result<(), SimulationError> {
        let reply = match (command, self.fault) {
            (_, Fault::Silent) | (WorkerCommand::Stop, _) => None,
            (WorkerCommand::Probe(value), Fault::WrongProbe) => Some(WorkerReply::Probe(value)),
            (WorkerCommand::Probe(value), _) => Some(WorkerReply::Probe(value * 2)),
            (WorkerCommand::Step(task), fault) => {
                let mut updated = integrate_subset(task.assigned, &task.snapshot, &self.config);
                let mut step = task.step;
                match fault {
                    Fault::DropsObject => {
                        updated.pop();
                    }
                    Fault::WrongStep => step += 1,
                    _ => {}
                }
                Some(WorkerReply::Step(StepResult { step, updated }))
            }
        };
        if let Some(reply) = reply {
            self.outbox.send(reply).expect("inbox lives as long as the worker");
        }
        Ok(())
    }

    fn receive(&self, timeout: Duration) -> Result<WorkerReply, SimulationError> {
        self.inbox
            .recv_timeout(timeout)
            .map_err(|_| SimulationError::communication(format!("Worker {} did not reply", self.rank)))
    }
}

/// A thread worker that spends `stall` on every step before answering it.
///
/// `join` blocks until the thread has finished whatever step it is on.
pub struct StalledWorker {
    rank: usize,
    commands: Sender<WorkerCommand>,
    replies: Receiver<WorkerReply>,
    handle: Option<JoinHandle<()>>,
}

impl StalledWorker {
    pub fn boxed(rank: usize, stall: Duration) -> Box<dyn WorkerLink> {
        let (command_tx, command_rx) = unbounded::<WorkerCommand>();
        let (reply_tx, reply_rx) = unbounded();
        let handle = thread::spawn(move || {
            while let Ok(command) = command_rx.recv() {
                let reply = match command {
                    WorkerCommand::Probe(value) => WorkerReply::Probe(value * 2),
                    WorkerCommand::Step(task) => {
                        thread::sleep(stall);
                        WorkerReply::Step(StepResult { step: task.step, updated: task.assigned })
                    }
                    WorkerCommand::Stop => break,
                };
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
        });
        Box::new(StalledWorker { rank, commands: command_tx, replies: reply_rx, handle: Some(handle) })
    }
}

impl WorkerLink for StalledWorker {
    fn rank(&self) -> usize {
        self.rank
    }

    fn send(&self, command: WorkerCommand) -> Result<(), SimulationError> {
        self.commands
            .send(command)
            .map_err(|_| SimulationError::communication(format!("Worker {} is gone", self.rank)))
    }

    fn receive(&self, timeout: Duration) -> Result<WorkerReply, SimulationError> {
        self.replies
            .recv_timeout(timeout)
            .map_err(|_| SimulationError::communication(format!("Worker {} did not reply", self.rank)))
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

/// Fails on the given step, records everything before it.
pub struct FailingSink {
    pub fail_on: u64,
    pub persisted: Vec<u64>,
}

impl SnapshotSink for FailingSink {
    fn persist(&mut self, step: u64, _particles: &[GalacticObject]) -> Result<(), SimulationError> {
        if step == self.fail_on {
            return Err(SimulationError::persistence(format!("disk full at step {}", step)));
        }
        self.persisted.push(step);
        Ok(())
    }
}
