//! Detection thresholds and tuning constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Below this magnitude the closest-approach system is treated as singular.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Segments closer than `threshold * PREFILTER_MARGIN` get the timing refinement.
pub const PREFILTER_MARGIN: f64 = 1.5;

/// Maximum gap in arrival times at the closest-approach points, in time units.
/// Independent of the spatial threshold.
pub const ARRIVAL_TIME_TOLERANCE: f64 = 3.0;

pub const DEFAULT_THRESHOLD: f64 = 2.0;
pub const DEFAULT_SAMPLE_COUNT: u32 = 200;

/// Configuration for one detection call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionRules {
    /// Minimum safe distance between two drones
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Number of intervals the shared flight horizon is split into
    #[serde(default = "default_sample_count")]
    pub sample_count: u32,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_sample_count() -> u32 {
    DEFAULT_SAMPLE_COUNT
}

impl Default for DetectionRules {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

/// Rejected detection configuration.
#[derive(Debug, Error, PartialEq)]
pub enum RulesError {
    #[error("threshold must be a finite, non-negative number (got {0})")]
    InvalidThreshold(f64),

    #[error("sample count must be at least 1")]
    ZeroSamples,
}

impl DetectionRules {
    pub fn new(threshold: f64, sample_count: u32) -> Self {
        Self {
            threshold,
            sample_count,
        }
    }

    /// Check the rules before handing them to the detector.
    ///
    /// The engine itself never fails; this is for configuration boundaries.
    pub fn validate(&self) -> Result<(), RulesError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RulesError::InvalidThreshold(self.threshold));
        }
        if self.sample_count == 0 {
            return Err(RulesError::ZeroSamples);
        }
        Ok(())
    }

    /// Distance under which a segment pair is refined.
    pub fn prefilter_distance(&self) -> f64 {
        self.threshold * PREFILTER_MARGIN
    }
}
