//! Patch types
//!
//! All-optional mirrors of the config structs, applied on top of a preset.

use super::classifier_config::ClassifierConfig;
use serde::{Deserialize, Serialize};

/// Patch type for ClassifierConfig (all fields optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_traces: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_threshold: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_sites: Option<bool>,
}

impl ClassifierConfig {
    /// Apply a patch; fields left `None` keep their current value
    pub fn apply_patch(mut self, patch: &ClassifierConfigPatch) -> Self {
        if let Some(v) = patch.record_traces {
            self.record_traces = v;
        }
        if let Some(v) = patch.parallel {
            self.parallel = v;
        }
        if let Some(v) = patch.parallel_threshold {
            self.parallel_threshold = v;
        }
        if let Some(v) = patch.log_sites {
            self.log_sites = v;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    #[test]
    fn test_empty_patch_is_identity() {
        let base = ClassifierConfig::from_preset(Preset::Thorough);
        let patched = base.clone().apply_patch(&ClassifierConfigPatch::default());
        assert_eq!(base, patched);
    }

    #[test]
    fn test_patch_overrides_only_set_fields() {
        let patch = ClassifierConfigPatch {
            parallel_threshold: Some(64),
            ..Default::default()
        };
        let patched = ClassifierConfig::from_preset(Preset::Fast).apply_patch(&patch);
        assert_eq!(patched.parallel_threshold, 64);
        assert!(!patched.record_traces);
        assert!(patched.parallel);
    }
}
