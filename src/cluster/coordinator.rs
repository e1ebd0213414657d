// src/cluster/coordinator.rs

//! The coordinator owns the authoritative galaxy and drives the step loop.
//!
//! Each step is a full barrier:
//!
//! 1. partition the galaxy across the pool,
//! 2. send every worker its subset plus the whole galaxy,
//! 3. wait for every worker, in rank order,
//! 4. concatenate the replies in that same order into the new galaxy,
//! 5. hand the new galaxy to the snapshot sink.
//!
//! Because collection happens in rank order, the merged order is fixed for a
//! given partition. It is generally *not* id order: with striped partitioning
//! the ids come back grouped by worker.
//!
//! # Example
//!
//! ```
//! use galactic_orbits::SimulationConfig;
//! use galactic_orbits::cluster::Coordinator;
//! use galactic_orbits::snapshot::MemorySink;
//!
//! let config = SimulationConfig::new(Some(12), Some(3), Some(2), Some(7));
//! let mut coordinator = Coordinator::new(config, MemorySink::new()).unwrap();
//! let summary = coordinator.run().unwrap();
//!
//! assert_eq!(summary.steps_completed, 3);
//! assert_eq!(coordinator.sink().snapshots().len(), 3);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::cluster::link::{spawn_thread_pool, WorkerLink};
use crate::cluster::liveness::LivenessCheck;
use crate::cluster::messages::{StepResult, StepTask, WorkerCommand, WorkerReply};
use crate::constants_config::SimulationConfig;
use crate::errors::SimulationError;
use crate::galaxy::{generate_galaxy, partition, GalacticObject, Galaxy};
use crate::snapshot::SnapshotSink;

/// What a finished run reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Snapshots emitted, the initial one included.
    pub steps_completed: u64,
    pub particle_count: usize,
    pub worker_count: usize,
    pub elapsed: Duration,
}

pub struct Coordinator<S: SnapshotSink> {
    config: SimulationConfig,
    workers: Vec<Box<dyn WorkerLink>>,
    sink: S,
    liveness: Option<Box<dyn LivenessCheck>>,
    galaxy: Galaxy,
    /// Per worker, whether a dispatched step is still unanswered.
    awaiting: Vec<bool>,
    stopped: bool,
}

impl<S: SnapshotSink> Coordinator<S> {
    /// Validates `config` and starts a thread pool of `config.worker_count` workers.
    pub fn new(config: SimulationConfig, sink: S) -> Result<Self, SimulationError> {
        config.validate()?;
        let workers = spawn_thread_pool(&config)?;
        Self::with_workers(config, workers, sink)
    }

    /// Uses an existing pool. The pool size takes precedence over
    /// `config.worker_count`.
    pub fn with_workers(
        mut config: SimulationConfig,
        workers: Vec<Box<dyn WorkerLink>>,
        sink: S,
    ) -> Result<Self, SimulationError> {
        if workers.is_empty() {
            return Err(SimulationError::configuration("A coordinator needs at least one worker"));
        }
        config.worker_count = workers.len();
        config.validate()?;
        Ok(Coordinator {
            config,
            awaiting: vec![false; workers.len()],
            workers,
            sink,
            liveness: None,
            galaxy: Galaxy::default(),
            stopped: false,
        })
    }

    /// Runs `check` against the pool before the first step.
    pub fn with_liveness_check(mut self, check: impl LivenessCheck + 'static) -> Self {
        self.liveness = Some(Box::new(check));
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The galaxy as of the last completed step.
    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Generates a galaxy from the configuration and runs it to completion.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        let outcome = self.check_liveness().and_then(|_| {
            info!("Generating {} galactic objects", self.config.particle_count);
            let galaxy = generate_galaxy(&self.config)?;
            self.simulate(galaxy)
        });
        self.finish(outcome)
    }

    /// Runs a caller-provided galaxy to completion.
    pub fn run_with_galaxy(&mut self, galaxy: Galaxy) -> Result<RunSummary, SimulationError> {
        let outcome = self.check_liveness().and_then(|_| self.simulate(galaxy));
        self.finish(outcome)
    }

    /// Advances the current galaxy by one step and persists it as `step`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Configuration`] when there is no galaxy yet,
    /// i.e. before [`Coordinator::run`] or [`Coordinator::run_with_galaxy`].
    pub fn step(&mut self, step: u64) -> Result<(), SimulationError> {
        if self.stopped {
            return Err(SimulationError::communication("The worker pool has already been stopped"));
        }
        if self.galaxy.is_empty() {
            return Err(SimulationError::configuration(format!(
                "Step {} requested before a galaxy was loaded",
                step
            )));
        }
        let subsets = partition(&self.galaxy, self.workers.len())?;
        let snapshot: Arc<[GalacticObject]> = Arc::from(self.galaxy.as_slice());

        for ((worker, assigned), awaiting) in self.workers.iter().zip(&subsets).zip(&mut self.awaiting) {
            worker.send(WorkerCommand::Step(StepTask {
                step,
                assigned: assigned.clone(),
                snapshot: Arc::clone(&snapshot),
            }))?;
            *awaiting = true;
        }

        let timeout = self.config.reply_timeout();
        let mut merged = Vec::with_capacity(self.galaxy.len());
        for ((worker, sent), awaiting) in self.workers.iter().zip(&subsets).zip(&mut self.awaiting) {
            let reply = worker.receive(timeout)?;
            *awaiting = false;
            let updated = match reply {
                WorkerReply::Step(result) => check_step_result(worker.rank(), step, sent, result)?,
                other => {
                    return Err(SimulationError::communication(format!(
                        "Worker {} answered step {} with {:?}",
                        worker.rank(),
                        step,
                        other
                    )))
                }
            };
            merged.extend(updated);
        }

        if merged.len() != self.galaxy.len() {
            return Err(SimulationError::communication(format!(
                "Merged {} objects for step {}, expected {}",
                merged.len(),
                step,
                self.galaxy.len()
            )));
        }
        self.galaxy = Galaxy::from_objects(merged)
            .map_err(|e| SimulationError::communication(format!("Step {} merge failed: {}", step, e)))?;

        self.sink.persist(step, self.galaxy.as_slice())?;
        debug!("Step {} complete", step);
        Ok(())
    }

    /// Sends `Stop` to every worker and waits for each to exit.
    ///
    /// A worker that still owes a reply for a dispatched step is sent `Stop`
    /// but not waited for, so an aborted run returns without sitting out the
    /// worker's current computation. Every worker is stopped even if an
    /// earlier one fails; the first failure is returned.
    pub fn shutdown(&mut self) -> Result<(), SimulationError> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;
        let mut first_error = None;
        for (worker, awaiting) in self.workers.iter_mut().zip(&self.awaiting) {
            let stopped = worker.send(WorkerCommand::Stop).and_then(|_| {
                if *awaiting {
                    warn!("Worker {} is still busy, detaching it", worker.rank());
                    Ok(())
                } else {
                    worker.join()
                }
            });
            if let Err(e) = stopped {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                debug!("All {} workers stopped", self.workers.len());
                Ok(())
            }
        }
    }

    fn check_liveness(&self) -> Result<(), SimulationError> {
        match &self.liveness {
            Some(check) => check.check(&self.workers, self.config.reply_timeout()),
            None => Ok(()),
        }
    }

    fn simulate(&mut self, galaxy: Galaxy) -> Result<RunSummary, SimulationError> {
        if self.stopped {
            return Err(SimulationError::communication("The worker pool has already been stopped"));
        }
        if galaxy.is_empty() {
            return Err(SimulationError::configuration("Cannot simulate an empty galaxy"));
        }
        let started = Instant::now();
        info!(
            "Simulating {} objects for {} steps on {} workers",
            galaxy.len(),
            self.config.simulation_steps,
            self.workers.len()
        );

        self.galaxy = galaxy;
        self.sink.persist(0, self.galaxy.as_slice())?;
        for step in 1..self.config.simulation_steps {
            self.step(step)?;
        }

        Ok(RunSummary {
            steps_completed: self.config.simulation_steps,
            particle_count: self.galaxy.len(),
            worker_count: self.workers.len(),
            elapsed: started.elapsed(),
        })
    }

    fn finish(&mut self, outcome: Result<RunSummary, SimulationError>) -> Result<RunSummary, SimulationError> {
        let stopped = self.shutdown();
        match (outcome, stopped) {
            (Ok(summary), Ok(())) => {
                info!(
                    "Simulation finished: {} steps in {:.2?}",
                    summary.steps_completed, summary.elapsed
                );
                Ok(summary)
            }
            (Err(e), _) | (Ok(_), Err(e)) => {
                error!("Simulation aborted: {}", e);
                Err(e)
            }
        }
    }
}

/// Checks that a worker returned exactly the objects it was sent for `step`.
fn check_step_result(
    rank: usize,
    step: u64,
    sent: &[GalacticObject],
    result: StepResult,
) -> Result<Vec<GalacticObject>, SimulationError> {
    if result.step != step {
        return Err(SimulationError::communication(format!(
            "Worker {} replied for step {} while step {} was pending",
            rank, result.step, step
        )));
    }
    if result.updated.len() != sent.len() {
        return Err(SimulationError::communication(format!(
            "Worker {} returned {} objects, {} were sent",
            rank,
            result.updated.len(),
            sent.len()
        )));
    }
    let sent_ids: BTreeSet<u64> = sent.iter().map(|o| o.id).collect();
    let returned_ids: BTreeSet<u64> = result.updated.iter().map(|o| o.id).collect();
    if sent_ids != returned_ids {
        return Err(SimulationError::communication(format!(
            "Worker {} returned ids that do not match its assignment",
            rank
        )));
    }
    Ok(result.updated)
}
