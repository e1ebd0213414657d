// src/cluster/worker.rs

//! The worker side of the protocol and the integration kernel it runs.
//!
//! The kernel is all-pairs: every assigned object is pulled by every other
//! object in the snapshot, so one step costs `O(|assigned| · N)` per worker
//! and `O(N²)` over the whole pool.

use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cluster::messages::{StepResult, WorkerCommand, WorkerReply};
use crate::constants_config::SimulationConfig;
use crate::galaxy::GalacticObject;
use crate::kinematics::{acceleration, clamp_speed};

/// Advances a single object by one step against the full snapshot.
///
/// The object's own entry in the snapshot, and any object sharing its exact
/// position, is skipped. Velocities are clamped per axis to
/// `±c·Δt` before the position is moved by one step's displacement.
///
/// # Example
/// ```
/// use galactic_orbits::SimulationConfig;
/// use galactic_orbits::cluster::advance_object;
/// use galactic_orbits::galaxy::GalacticObject;
///
/// let config = SimulationConfig::default();
/// let heavy = GalacticObject::singularity(0, (0.0, 0.0), 1e40);
/// let mut star = GalacticObject::star(1, (1e18, 0.0), (0.0, 0.0), 1e30);
///
/// let snapshot = [heavy, star];
/// advance_object(&mut star, &snapshot, &config);
/// assert!(star.vx < 0.0, "the star falls towards the heavy mass");
/// assert!(star.x < 1e18);
/// ```
pub fn advance_object(object: &mut GalacticObject, snapshot: &[GalacticObject], config: &SimulationConfig) {
    let mut movement_x = 0.0;
    let mut movement_y = 0.0;
    for other in snapshot {
        if let Some((ax, ay)) = acceleration(object, other, config.gravitational_constant) {
            movement_x += ax;
            movement_y += ay;
        }
    }

    let limit = config.velocity_limit();
    object.vx = clamp_speed(object.vx + movement_x * config.step_interval, -limit, limit);
    object.vy = clamp_speed(object.vy + movement_y * config.step_interval, -limit, limit);

    object.x += object.vx;
    object.y += object.vy;
}

/// Advances every object of `assigned` by one step and returns them in the
/// same order.
///
/// With the `parallel` feature the objects are processed on the rayon pool.
/// Each object reads only the immutable snapshot and writes only itself, so
/// the result does not depend on scheduling.
pub fn integrate_subset(
    mut assigned: Vec<GalacticObject>,
    snapshot: &[GalacticObject],
    config: &SimulationConfig,
) -> Vec<GalacticObject> {
    #[cfg(feature = "parallel")]
    {
        assigned
            .par_iter_mut()
            .for_each(|object| advance_object(object, snapshot, config));
    }

    #[cfg(not(feature = "parallel"))]
    {
        assigned
            .iter_mut()
            .for_each(|object| advance_object(object, snapshot, config));
    }

    assigned
}

/// The receiving end of a worker: a loop that serves commands until `Stop`.
pub struct Worker {
    rank: usize,
    config: SimulationConfig,
    commands: Receiver<WorkerCommand>,
    replies: Sender<WorkerReply>,
}

impl Worker {
    pub fn new(
        rank: usize,
        config: SimulationConfig,
        commands: Receiver<WorkerCommand>,
        replies: Sender<WorkerReply>,
    ) -> Self {
        Worker { rank, config, commands, replies }
    }

    /// Serves commands until a `Stop` arrives or the coordinator hangs up.
    pub fn run(self) {
        debug!("Worker {} available", self.rank);
        loop {
            let reply = match self.commands.recv() {
                Ok(WorkerCommand::Probe(value)) => WorkerReply::Probe(value.wrapping_mul(2)),
                Ok(WorkerCommand::Step(task)) => WorkerReply::Step(StepResult {
                    step: task.step,
                    updated: integrate_subset(task.assigned, &task.snapshot, &self.config),
                }),
                Ok(WorkerCommand::Stop) => break,
                Err(_) => {
                    warn!("Worker {} lost its coordinator, exiting", self.rank);
                    break;
                }
            };
            if self.replies.send(reply).is_err() {
                warn!("Worker {} could not deliver a reply, exiting", self.rank);
                break;
            }
        }
        debug!("Worker {} stopped", self.rank);
    }
}
