//! flightcheck CLI - scenario catalog, request input and reports around the
//! conflict engine.

pub mod config;
pub mod input;
pub mod report;
pub mod scenarios;

pub use config::Config;
pub use report::{DetectionReport, DroneStatus};
pub use scenarios::{catalog, find_scenario, Scenario, ScenarioError};
