// src/snapshot/snapshot_sink.rs

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::SimulationError;
use crate::galaxy::GalacticObject;

/// Receives the full population once per completed step, the initial one
/// included.
///
/// A sink that fails ends the run; the coordinator does not buffer or retry.
pub trait SnapshotSink {
    fn persist(&mut self, step: u64, particles: &[GalacticObject]) -> Result<(), SimulationError>;
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for Box<S> {
    fn persist(&mut self, step: u64, particles: &[GalacticObject]) -> Result<(), SimulationError> {
        (**self).persist(step, particles)
    }
}

/// Writes each step to `<dir>/orbits-<step>.jsn` as a JSON array.
///
/// # Example
/// ```
/// use galactic_orbits::galaxy::GalacticObject;
/// use galactic_orbits::snapshot::{JsonFileSink, SnapshotSink};
///
/// let dir = std::env::temp_dir().join(format!("galactic-orbits-doc-{}", std::process::id()));
/// let mut sink = JsonFileSink::new(&dir).unwrap();
/// sink.persist(0, &[GalacticObject::singularity(0, (1.0, 1.0), 5.0)]).unwrap();
///
/// let text = std::fs::read_to_string(sink.path_for(0)).unwrap();
/// assert!(text.contains("\"type\":\"singularity\""));
/// # std::fs::remove_dir_all(&dir).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    /// Creates the sink, creating `directory` and its parents when missing.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| {
            SimulationError::persistence(format!("Cannot create {}: {}", directory.display(), e))
        })?;
        Ok(JsonFileSink { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, step: u64) -> PathBuf {
        self.directory.join(format!("orbits-{}.jsn", step))
    }
}

impl SnapshotSink for JsonFileSink {
    fn persist(&mut self, step: u64, particles: &[GalacticObject]) -> Result<(), SimulationError> {
        let path = self.path_for(step);
        let file = File::create(&path).map_err(|e| {
            SimulationError::persistence(format!("Cannot create {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, particles)?;
        writer.flush()?;
        debug!("Wrote {} objects to {}", particles.len(), path.display());
        Ok(())
    }
}

/// Keeps every snapshot in memory, in the order they were persisted.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    snapshots: Vec<(u64, Vec<GalacticObject>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[(u64, Vec<GalacticObject>)] {
        &self.snapshots
    }

    pub fn last(&self) -> Option<&(u64, Vec<GalacticObject>)> {
        self.snapshots.last()
    }
}

impl SnapshotSink for MemorySink {
    fn persist(&mut self, step: u64, particles: &[GalacticObject]) -> Result<(), SimulationError> {
        self.snapshots.push((step, particles.to_vec()));
        Ok(())
    }
}
