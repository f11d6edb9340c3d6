//! Pre-defined drone flight scenarios.

use flightcheck_core::{Drone, DroneRecord, Point3};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("scenario {0} not found")]
    NotFound(u32),
}

/// A named scenario consisting of multiple drones with flight paths.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Whether the scenario is meant to produce conflicts
    pub has_conflicts: bool,
    pub drones: Vec<DroneRecord>,
}

impl Scenario {
    /// Engine drones, identified by their position in the scenario.
    pub fn drones(&self) -> Vec<Drone> {
        DroneRecord::into_drones(&self.drones)
    }
}

fn record(
    name: &str,
    start: (f64, f64, f64),
    end: (f64, f64, f64),
    speed: f64,
    is_primary: bool,
) -> DroneRecord {
    DroneRecord {
        id: None,
        name: Some(name.to_string()),
        start: Point3::new(start.0, start.1, start.2),
        end: Point3::new(end.0, end.1, end.2),
        speed,
        is_primary,
    }
}

/// Three drones in parallel lanes 5 units apart.
pub fn create_parallel_scenario() -> Scenario {
    Scenario {
        id: 1,
        name: "Conflict-Free Parallel Paths".to_string(),
        description: "Multiple drones flying in parallel paths with safe distances".to_string(),
        has_conflicts: false,
        drones: vec![
            record("Primary Drone", (0.0, 0.0, 5.0), (20.0, 0.0, 5.0), 1.0, true),
            record("Escort Drone 1", (0.0, 5.0, 5.0), (20.0, 5.0, 5.0), 1.0, false),
            record("Escort Drone 2", (0.0, -5.0, 5.0), (20.0, -5.0, 5.0), 1.0, false),
        ],
    }
}

/// Two drones flying the same line in opposite directions.
pub fn create_head_on_scenario() -> Scenario {
    Scenario {
        id: 2,
        name: "Head-On Collision Course".to_string(),
        description: "Two drones on collision course - high conflict scenario".to_string(),
        has_conflicts: true,
        drones: vec![
            record("Primary Drone", (0.0, 0.0, 5.0), (20.0, 0.0, 5.0), 1.0, true),
            record("Incoming Drone", (20.0, 0.0, 5.0), (0.0, 0.0, 5.0), 1.0, false),
        ],
    }
}

/// Two drones cutting across the primary's path at different speeds and altitudes.
pub fn create_crossing_scenario() -> Scenario {
    Scenario {
        id: 3,
        name: "Crossing Paths".to_string(),
        description: "Drones with intersecting flight paths at different times".to_string(),
        has_conflicts: true,
        drones: vec![
            record("Primary Drone", (0.0, 0.0, 5.0), (20.0, 0.0, 5.0), 1.5, true),
            record("Crossing Drone 1", (10.0, -10.0, 5.0), (10.0, 10.0, 5.0), 2.0, false),
            record("Crossing Drone 2", (15.0, 10.0, 3.0), (15.0, -10.0, 7.0), 1.5, false),
        ],
    }
}

/// Four drones stacked on separate altitude levels.
pub fn create_formation_scenario() -> Scenario {
    Scenario {
        id: 4,
        name: "Multi-Level Safe Formation".to_string(),
        description: "Complex formation with multiple altitude levels - conflict-free".to_string(),
        has_conflicts: false,
        drones: vec![
            record("Lead Drone", (0.0, 0.0, 8.0), (25.0, 0.0, 8.0), 1.0, true),
            record("Wing Drone Left", (-2.0, -3.0, 6.0), (23.0, -3.0, 6.0), 1.0, false),
            record("Wing Drone Right", (-2.0, 3.0, 6.0), (23.0, 3.0, 6.0), 1.0, false),
            record("Support Drone", (-4.0, 0.0, 4.0), (21.0, 0.0, 4.0), 1.0, false),
        ],
    }
}

/// All scenarios, ordered by id.
pub fn catalog() -> Vec<Scenario> {
    vec![
        create_parallel_scenario(),
        create_head_on_scenario(),
        create_crossing_scenario(),
        create_formation_scenario(),
    ]
}

pub fn find_scenario(id: u32) -> Result<Scenario, ScenarioError> {
    catalog()
        .into_iter()
        .find(|scenario| scenario.id == id)
        .ok_or(ScenarioError::NotFound(id))
}
