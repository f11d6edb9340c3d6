//! Spatio-temporal conflict detection for drones flying straight-line paths.

pub mod conflict;
pub mod models;
pub mod rules;
pub mod spatial;

pub use conflict::{
    detect_conflicts, intersection_timing_conflict, sampled_conflict, ConflictDetector,
    ConflictSource, PairConflict,
};
pub use models::{ConflictSet, Drone, DroneId, DroneRecord, Point3};
pub use rules::{DetectionRules, RulesError};
pub use spatial::{
    closest_approach, distance, path_duration, position_at_progress, segment_distance,
    ClosestApproach,
};
