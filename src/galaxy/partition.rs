use crate::errors::SimulationError;
use crate::galaxy::{GalacticObject, Galaxy};

/// Stripes a galaxy across `worker_count` workers.
///
/// Worker `k` receives the objects at positions `k, k + worker_count,
/// k + 2·worker_count, …` of the galaxy's current order. Every object lands in
/// exactly one subset and subset sizes differ by at most one. When there are
/// more workers than objects the trailing subsets are empty, but one subset is
/// still returned per worker.
///
/// # Errors
///
/// Returns [`SimulationError::Configuration`] when `worker_count` is zero.
///
/// # Example
/// ```
/// use galactic_orbits::galaxy::{partition, GalacticObject, Galaxy};
///
/// let objects = (0..5).map(|id| GalacticObject::star(id, (id as f64, 0.0), (0.0, 0.0), 1.0)).collect();
/// let galaxy = Galaxy::from_objects(objects).unwrap();
///
/// let subsets = partition(&galaxy, 2).unwrap();
/// let ids: Vec<Vec<u64>> = subsets.iter().map(|s| s.iter().map(|o| o.id).collect()).collect();
/// assert_eq!(ids, vec![vec![0, 2, 4], vec![1, 3]]);
/// ```
pub fn partition(galaxy: &Galaxy, worker_count: usize) -> Result<Vec<Vec<GalacticObject>>, SimulationError> {
    if worker_count == 0 {
        return Err(SimulationError::configuration("Cannot partition across zero workers"));
    }
    let per_worker = galaxy.len().div_ceil(worker_count);
    let mut subsets: Vec<Vec<GalacticObject>> = (0..worker_count)
        .map(|_| Vec::with_capacity(per_worker))
        .collect();
    for (position, object) in galaxy.iter().enumerate() {
        subsets[position % worker_count].push(*object);
    }
    Ok(subsets)
}
