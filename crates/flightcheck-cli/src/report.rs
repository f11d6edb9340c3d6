//! Detection reports: per-drone conflict status plus the conflicting pairs.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use flightcheck_core::{ConflictDetector, DetectionRules, DroneId, DroneRecord, PairConflict};
use serde::Serialize;

/// Conflict status of one drone.
#[derive(Debug, Clone, Serialize)]
pub struct DroneStatus {
    pub id: DroneId,
    pub name: Option<String>,
    pub is_primary: bool,
    pub has_conflict: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub generated_at: DateTime<Utc>,
    pub rules: DetectionRules,
    pub drones: Vec<DroneStatus>,
    /// Ids of conflicting drones, ascending
    pub conflicts: Vec<DroneId>,
    pub pairs: Vec<PairConflict>,
}

impl DetectionReport {
    /// Run detection over `records` and annotate each one.
    pub fn build(records: &[DroneRecord], detector: &ConflictDetector) -> Self {
        let drones = DroneRecord::into_drones(records);
        let pairs = detector.detect_pairs(&drones);

        let mut conflicts: Vec<DroneId> = pairs
            .iter()
            .flat_map(|pair| [pair.drone1_id, pair.drone2_id])
            .collect();
        conflicts.sort_unstable();
        conflicts.dedup();

        let drones = records
            .iter()
            .zip(&drones)
            .map(|(record, drone)| DroneStatus {
                id: drone.id,
                name: record.name.clone(),
                is_primary: record.is_primary,
                has_conflict: conflicts.binary_search(&drone.id).is_ok(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            rules: *detector.rules(),
            drones,
            conflicts,
            pairs,
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Plain-text table for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "threshold {} | samples {} | {} drone(s), {} in conflict",
            self.rules.threshold,
            self.rules.sample_count,
            self.drones.len(),
            self.conflicts.len()
        );
        for drone in &self.drones {
            let name = drone.name.as_deref().unwrap_or("-");
            let marker = if drone.is_primary { "*" } else { " " };
            let status = if drone.has_conflict { "CONFLICT" } else { "clear" };
            let _ = writeln!(out, "{marker} {:>4}  {:<24} {status}", drone.id, name);
        }
        for pair in &self.pairs {
            let _ = writeln!(
                out,
                "  {} <-> {} ({:?})",
                pair.drone1_id, pair.drone2_id, pair.source
            );
        }
        out
    }
}
