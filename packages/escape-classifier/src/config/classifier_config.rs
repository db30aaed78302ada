//! Escape classifier configuration
//!
//! Knobs for how the classifier records and schedules its work. None of them
//! change an outcome: the rules are fixed, only traces, logging and batch
//! scheduling are configurable.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Escape Classifier Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Record the rule trace on every site verdict
    pub record_traces: bool,

    /// Classify independent programs of a batch on the rayon pool
    pub parallel: bool,

    /// Minimum batch size before a batch goes parallel (1..=10000)
    pub parallel_threshold: usize,

    /// Emit one debug event per classified site
    pub log_sites: bool,
}

impl ClassifierConfig {
    /// Builder: Set record_traces
    pub fn record_traces(mut self, v: bool) -> Self {
        self.record_traces = v;
        self
    }

    /// Builder: Set parallel
    pub fn parallel(mut self, v: bool) -> Self {
        self.parallel = v;
        self
    }

    /// Builder: Set parallel_threshold
    pub fn parallel_threshold(mut self, v: usize) -> Self {
        self.parallel_threshold = v;
        self
    }

    /// Builder: Set log_sites
    pub fn log_sites(mut self, v: bool) -> Self {
        self.log_sites = v;
        self
    }

    /// Whether a batch of `len` programs should be scheduled in parallel
    pub fn batch_is_parallel(&self, len: usize) -> bool {
        self.parallel && len >= self.parallel_threshold
    }

    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                record_traces: false,
                parallel: true,
                parallel_threshold: 2,
                log_sites: false,
            },
            Preset::Balanced => Self {
                record_traces: true,
                parallel: true,
                parallel_threshold: 8,
                log_sites: false,
            },
            Preset::Thorough => Self {
                record_traces: true,
                parallel: false,
                parallel_threshold: 8,
                log_sites: true,
            },
        }
    }
}

impl Validatable for ClassifierConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.parallel_threshold == 0 || self.parallel_threshold > 10000 {
            return Err(ConfigError::range_with_hint(
                "parallel_threshold",
                self.parallel_threshold,
                1,
                10000,
                "Batch threshold must be at least 1 program",
            ));
        }

        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for preset in [Preset::Fast, Preset::Balanced, Preset::Thorough] {
            assert!(ClassifierConfig::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_default_is_balanced() {
        assert_eq!(
            ClassifierConfig::default(),
            ClassifierConfig::from_preset(Preset::Balanced)
        );
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = ClassifierConfig::default().parallel_threshold(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Range { ref field, .. }) if field == "parallel_threshold"
        ));

        let config = ClassifierConfig::default().parallel_threshold(10001);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_batch_is_parallel() {
        let config = ClassifierConfig::from_preset(Preset::Fast);
        assert!(!config.batch_is_parallel(1));
        assert!(config.batch_is_parallel(2));

        let config = ClassifierConfig::from_preset(Preset::Thorough);
        assert!(!config.batch_is_parallel(100));
    }

    #[test]
    fn test_builder_chain() {
        let config = ClassifierConfig::from_preset(Preset::Fast)
            .record_traces(true)
            .log_sites(true)
            .parallel(false);
        assert!(config.record_traces);
        assert!(config.log_sites);
        assert!(!config.parallel);
    }
}
