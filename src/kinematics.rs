// src/kinematics.rs

//! Pure geometry and gravity helpers used by the integration kernel.
//!
//! None of these functions guard against a zero separation themselves:
//! [`normalize`] and [`force`] divide by the distance, so callers must skip a
//! pair whose distance is `0.0` before reaching them. [`acceleration`] does
//! that skip for a whole pair.

use crate::galaxy::GalacticObject;

/// Euclidean distance between two objects.
///
/// # Example
/// ```
/// use galactic_orbits::galaxy::GalacticObject;
/// use galactic_orbits::kinematics::distance;
///
/// let a = GalacticObject::star(1, (0.0, 0.0), (0.0, 0.0), 1.0);
/// let b = GalacticObject::star(2, (3.0, 4.0), (0.0, 0.0), 1.0);
/// assert_eq!(distance(&a, &b), 5.0);
/// assert_eq!(distance(&a, &a), 0.0);
/// ```
pub fn distance(from: &GalacticObject, to: &GalacticObject) -> f64 {
    let (dx, dy) = direction(from, to);
    (dx * dx + dy * dy).sqrt()
}

/// Unnormalized vector pointing from `from` towards `to`.
pub fn direction(from: &GalacticObject, to: &GalacticObject) -> (f64, f64) {
    (to.x - from.x, to.y - from.y)
}

/// Scales a direction by its length to obtain a unit vector.
///
/// `distance` must be non-zero.
pub fn normalize(dx: f64, dy: f64, distance: f64) -> (f64, f64) {
    (dx / distance, dy / distance)
}

/// Magnitude of the Newtonian attraction `G·m1·m2 / d²`.
///
/// `distance` must be non-zero.
///
/// # Example
/// ```
/// use galactic_orbits::kinematics::force;
///
/// let f = force(2.0, 3.0, 4.0, 1.0);
/// assert_eq!(f, 3.0);
/// ```
pub fn force(distance: f64, mass_one: f64, mass_two: f64, gravitational_constant: f64) -> f64 {
    (gravitational_constant * mass_one * mass_two) / (distance * distance)
}

/// Limits `value` to the closed interval `[min, max]`.
///
/// Assumes `min <= max`. A NaN input is mapped onto `max`.
///
/// # Example
/// ```
/// use galactic_orbits::kinematics::clamp_speed;
///
/// assert_eq!(clamp_speed(12.0, -10.0, 10.0), 10.0);
/// assert_eq!(clamp_speed(-12.0, -10.0, 10.0), -10.0);
/// assert_eq!(clamp_speed(4.0, -10.0, 10.0), 4.0);
/// ```
pub fn clamp_speed(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Acceleration that `other` imparts on `object`, in metres per second squared.
///
/// Returns `None` when the pair has to be skipped: the same id, or the two
/// objects sharing a position.
pub fn acceleration(
    object: &GalacticObject,
    other: &GalacticObject,
    gravitational_constant: f64,
) -> Option<(f64, f64)> {
    if object.id == other.id {
        return None;
    }
    let d = distance(object, other);
    if d == 0.0 {
        return None;
    }
    let (dx, dy) = direction(object, other);
    let (ux, uy) = normalize(dx, dy, d);
    let f = force(d, object.mass, other.mass, gravitational_constant);

    // force over the accelerated object's own mass
    Some((ux * f / object.mass, uy * f / object.mass))
}
