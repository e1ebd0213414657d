use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;

/// The two kinds of body a galaxy is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// The single, dominant mass anchoring the centre of the region.
    Singularity,
    Star,
}

/// A point mass in the simulated plane.
///
/// Positions are in metres and velocities in metres per step interval, so a
/// step moves an object by exactly `(vx, vy)`.
///
/// The serialized form uses the snapshot field names:
/// `id`, `type`, `x`, `y`, `xs`, `ys`, `mass`.
///
/// # Examples
///
/// ```
/// use galactic_orbits::galaxy::{GalacticObject, ObjectKind};
///
/// let star = GalacticObject::star(3, (1.0, 2.0), (0.5, -0.5), 4.0);
/// let json = serde_json::to_value(&star).unwrap();
/// assert_eq!(json["type"], "star");
/// assert_eq!(json["xs"], 0.5);
/// assert_eq!(json["ys"], -0.5);
/// assert_eq!(star.kind, ObjectKind::Star);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GalacticObject {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "xs")]
    pub vx: f64,
    #[serde(rename = "ys")]
    pub vy: f64,
    pub mass: f64,
}

impl GalacticObject {
    pub fn singularity(id: u64, position: (f64, f64), mass: f64) -> Self {
        GalacticObject {
            id,
            kind: ObjectKind::Singularity,
            x: position.0,
            y: position.1,
            vx: 0.0,
            vy: 0.0,
            mass,
        }
    }

    pub fn star(id: u64, position: (f64, f64), velocity: (f64, f64), mass: f64) -> Self {
        GalacticObject {
            id,
            kind: ObjectKind::Star,
            x: position.0,
            y: position.1,
            vx: velocity.0,
            vy: velocity.1,
            mass,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }
}

/// The authoritative, ordered population of a run.
///
/// Ids are unique and the size never changes once generated. The order is
/// whatever the last merge produced; use [`Galaxy::sorted_by_id`] when an
/// order-independent view is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Galaxy {
    objects: Vec<GalacticObject>,
}

impl Galaxy {
    /// Wraps a list of objects, rejecting duplicate ids.
    ///
    /// # Errors
    /// Returns [`SimulationError::Configuration`] if two objects share an id.
    pub fn from_objects(objects: Vec<GalacticObject>) -> Result<Self, SimulationError> {
        let mut seen = BTreeSet::new();
        for object in &objects {
            if !seen.insert(object.id) {
                return Err(SimulationError::configuration(format!(
                    "Duplicate galactic object id {}",
                    object.id
                )));
            }
        }
        Ok(Galaxy { objects })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GalacticObject> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[GalacticObject] {
        &self.objects
    }

    pub fn into_vec(self) -> Vec<GalacticObject> {
        self.objects
    }

    pub fn get(&self, id: u64) -> Option<&GalacticObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn ids(&self) -> BTreeSet<u64> {
        self.objects.iter().map(|o| o.id).collect()
    }

    pub fn singularity(&self) -> Option<&GalacticObject> {
        self.objects.iter().find(|o| o.kind == ObjectKind::Singularity)
    }

    /// Returns a copy ordered by ascending id.
    pub fn sorted_by_id(&self) -> Galaxy {
        let mut objects = self.objects.clone();
        objects.sort_by_key(|o| o.id);
        Galaxy { objects }
    }
}

impl<'a> IntoIterator for &'a Galaxy {
    type Item = &'a GalacticObject;
    type IntoIter = std::slice::Iter<'a, GalacticObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
