//! Core data models for the conflict engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Numeric drone identifier.
pub type DroneId = u64;

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub(crate) fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub(crate) fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// `self + direction * t`
    pub(crate) fn advance(self, direction: Point3, t: f64) -> Point3 {
        Point3::new(
            self.x + direction.x * t,
            self.y + direction.y * t,
            self.z + direction.z * t,
        )
    }
}

fn default_speed() -> f64 {
    1.0
}

/// A drone flying a straight segment from `start` to `end` at constant speed.
///
/// This is the engine-side shape: the id is always present. Callers holding
/// records without ids go through [`DroneRecord::into_drones`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: DroneId,
    pub start: Point3,
    pub end: Point3,
    /// Units per time unit. Non-positive means the path never completes.
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Drone {
    /// Create a drone with the default speed of 1.0.
    pub fn new(id: DroneId, start: Point3, end: Point3) -> Self {
        Self {
            id,
            start,
            end,
            speed: default_speed(),
        }
    }

    /// Set the cruise speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
}

/// A drone as supplied by a caller (catalog entry, request body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneRecord {
    #[serde(default)]
    pub id: Option<DroneId>,
    #[serde(default)]
    pub name: Option<String>,
    pub start: Point3,
    pub end: Point3,
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Presentation only; detection ignores it.
    #[serde(default)]
    pub is_primary: bool,
}

impl DroneRecord {
    /// Resolve this record's id, falling back to its position in the input.
    pub fn resolved_id(&self, index: usize) -> DroneId {
        self.id.unwrap_or(index as DroneId)
    }

    pub fn to_drone(&self, index: usize) -> Drone {
        Drone {
            id: self.resolved_id(index),
            start: self.start,
            end: self.end,
            speed: self.speed,
        }
    }

    /// Convert a sequence of records into engine drones.
    ///
    /// Records without an explicit id get their index in `records`.
    pub fn into_drones(records: &[DroneRecord]) -> Vec<Drone> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| record.to_drone(index))
            .collect()
    }
}

/// Identifiers of every drone involved in at least one conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictSet(BTreeSet<DroneId>);

impl ConflictSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record both drones of a conflicting pair.
    pub fn insert_pair(&mut self, drone1_id: DroneId, drone2_id: DroneId) {
        self.0.insert(drone1_id);
        self.0.insert(drone2_id);
    }

    pub fn contains(&self, id: DroneId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = DroneId> + '_ {
        self.0.iter().copied()
    }

    pub fn is_subset(&self, other: &ConflictSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl FromIterator<DroneId> for ConflictSet {
    fn from_iter<I: IntoIterator<Item = DroneId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ConflictSet {
    type Item = DroneId;
    type IntoIter = std::collections::btree_set::IntoIter<DroneId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
