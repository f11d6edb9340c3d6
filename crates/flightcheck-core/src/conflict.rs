//! Conflict detection module for flightcheck.
//!
//! Each drone pair is checked twice: a time-sampled scan over the shared
//! flight horizon, and a geometric check at the closest approach of the two
//! segments. Either one firing marks the pair as conflicting.

use serde::{Deserialize, Serialize};

use crate::models::{ConflictSet, Drone, DroneId};
use crate::rules::{DetectionRules, ARRIVAL_TIME_TOLERANCE};
use crate::spatial::{distance, path_approach, path_duration, position_at_progress};

/// Which check flagged a conflicting pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSource {
    /// Drones were within the threshold at a sampled instant
    Sampled,
    /// Drones reach the closest-approach points at nearly the same time
    IntersectionTiming,
    Both,
}

impl ConflictSource {
    fn from_checks(sampled: bool, timing: bool) -> Option<Self> {
        match (sampled, timing) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Sampled),
            (false, true) => Some(Self::IntersectionTiming),
            (false, false) => None,
        }
    }
}

/// A conflicting pair of drones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConflict {
    pub drone1_id: DroneId,
    pub drone2_id: DroneId,
    pub source: ConflictSource,
}

/// Progress of a drone at `time` on the shared clock.
///
/// A drone that has finished (or has a zero-length path) stays at its end.
fn progress_at(time: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (time / duration).min(1.0)
    } else {
        1.0
    }
}

/// Time-sampled separation check.
///
/// Both drones leave their start at time 0 and fly their own segment at their
/// own speed. The window runs to the longer of the two path durations, split
/// into `sample_count` intervals; a drone that arrives early holds at its end.
/// Returns on the first sample closer than `threshold`.
pub fn sampled_conflict(
    drone1: &Drone,
    drone2: &Drone,
    threshold: f64,
    sample_count: u32,
) -> bool {
    let duration1 = path_duration(drone1);
    let duration2 = path_duration(drone2);
    let horizon = duration1.max(duration2);
    let steps = sample_count.max(1);

    for sample in 0..=steps {
        let time = f64::from(sample) / f64::from(steps) * horizon;
        let pos1 = position_at_progress(drone1, progress_at(time, duration1));
        let pos2 = position_at_progress(drone2, progress_at(time, duration2));

        if distance(pos1, pos2) < threshold {
            return true;
        }
    }

    false
}

/// Closest-approach timing check.
///
/// Only runs when the segments come within the pre-filter distance. The pair
/// conflicts when the clamped closest points are within `threshold` and the
/// drones reach them less than [`ARRIVAL_TIME_TOLERANCE`] apart. Parallel
/// segments never conflict here.
pub fn intersection_timing_conflict(
    drone1: &Drone,
    drone2: &Drone,
    rules: &DetectionRules,
) -> bool {
    let approach = path_approach(drone1, drone2);
    if approach.distance >= rules.prefilter_distance() {
        tracing::trace!(
            drone1 = drone1.id,
            drone2 = drone2.id,
            distance = approach.distance,
            "segments outside pre-filter distance"
        );
        return false;
    }
    if approach.parallel {
        return false;
    }

    let pos1 = position_at_progress(drone1, approach.t1);
    let pos2 = position_at_progress(drone2, approach.t2);
    if distance(pos1, pos2) > rules.threshold {
        return false;
    }

    let time1 = approach.t1 * path_duration(drone1);
    let time2 = approach.t2 * path_duration(drone2);
    (time1 - time2).abs() < ARRIVAL_TIME_TOLERANCE
}

/// Conflict detection engine over straight-line flight paths.
///
/// Holds only the rules; every call is a pure function of its input.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    rules: DetectionRules,
}

impl ConflictDetector {
    pub fn new(rules: DetectionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DetectionRules {
        &self.rules
    }

    /// Run both checks on one pair.
    pub fn check_pair(&self, drone1: &Drone, drone2: &Drone) -> Option<PairConflict> {
        let sampled = sampled_conflict(
            drone1,
            drone2,
            self.rules.threshold,
            self.rules.sample_count,
        );
        let timing = intersection_timing_conflict(drone1, drone2, &self.rules);

        ConflictSource::from_checks(sampled, timing).map(|source| PairConflict {
            drone1_id: drone1.id,
            drone2_id: drone2.id,
            source,
        })
    }

    /// Every conflicting pair, in input order (i < j).
    pub fn detect_pairs(&self, drones: &[Drone]) -> Vec<PairConflict> {
        let mut conflicts = Vec::new();
        if drones.len() < 2 {
            return conflicts;
        }

        for (i, drone1) in drones.iter().enumerate() {
            for drone2 in &drones[i + 1..] {
                if let Some(conflict) = self.check_pair(drone1, drone2) {
                    tracing::debug!(
                        drone1 = conflict.drone1_id,
                        drone2 = conflict.drone2_id,
                        source = ?conflict.source,
                        "conflict detected"
                    );
                    conflicts.push(conflict);
                }
            }
        }

        tracing::debug!(
            drones = drones.len(),
            conflicts = conflicts.len(),
            threshold = self.rules.threshold,
            samples = self.rules.sample_count,
            "conflict scan complete"
        );
        conflicts
    }

    /// Ids of all drones involved in at least one conflict.
    pub fn detect(&self, drones: &[Drone]) -> ConflictSet {
        let mut set = ConflictSet::new();
        for conflict in self.detect_pairs(drones) {
            set.insert_pair(conflict.drone1_id, conflict.drone2_id);
        }
        set
    }
}

/// Detect conflicts with an explicit threshold and sample count.
///
/// `DetectionRules::default()` holds the usual values (2.0 and 200).
pub fn detect_conflicts(drones: &[Drone], threshold: f64, sample_count: u32) -> ConflictSet {
    ConflictDetector::new(DetectionRules::new(threshold, sample_count)).detect(drones)
}
