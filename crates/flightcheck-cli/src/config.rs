//! Detection configuration from environment.

use std::env;

use flightcheck_core::DetectionRules;

pub const THRESHOLD_VAR: &str = "FLIGHTCHECK_THRESHOLD";
pub const SAMPLES_VAR: &str = "FLIGHTCHECK_SAMPLES";

#[derive(Debug, Clone)]
pub struct Config {
    pub threshold: f64,
    pub sample_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        let rules = DetectionRules::default();
        Self {
            threshold: rules.threshold,
            sample_count: rules.sample_count,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            threshold: lookup(THRESHOLD_VAR)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.threshold),
            sample_count: lookup(SAMPLES_VAR)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.sample_count),
        }
    }

    /// Apply command line overrides.
    pub fn with_overrides(mut self, threshold: Option<f64>, sample_count: Option<u32>) -> Self {
        if let Some(threshold) = threshold {
            self.threshold = threshold;
        }
        if let Some(sample_count) = sample_count {
            self.sample_count = sample_count;
        }
        self
    }

    pub fn rules(&self) -> DetectionRules {
        DetectionRules::new(self.threshold, self.sample_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.threshold, 2.0);
        assert_eq!(config.sample_count, 200);
    }

    #[test]
    fn test_reads_variables() {
        let config =
            Config::from_lookup(lookup(&[(THRESHOLD_VAR, "3.5"), (SAMPLES_VAR, " 50 ")]));
        assert_eq!(config.threshold, 3.5);
        assert_eq!(config.sample_count, 50);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config =
            Config::from_lookup(lookup(&[(THRESHOLD_VAR, "wide"), (SAMPLES_VAR, "-4")]));
        assert_eq!(config.threshold, 2.0);
        assert_eq!(config.sample_count, 200);
    }

    #[test]
    fn test_overrides_win() {
        let rules = Config::from_lookup(lookup(&[(THRESHOLD_VAR, "3.5")]))
            .with_overrides(Some(1.0), None)
            .rules();
        assert_eq!(rules.threshold, 1.0);
        assert_eq!(rules.sample_count, 200);
    }
}
