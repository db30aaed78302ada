//! Configuration I/O (YAML loading)
//!
//! ```yaml
//! version: 1
//! preset: balanced
//! overrides:
//!   parallel_threshold: 32
//! ```

use super::classifier_config::ClassifierConfig;
use super::error::{ConfigError, ConfigResult};
use super::patch::ClassifierConfigPatch;
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ClassifierConfigPatch>,
}

impl ClassifierConfig {
    /// Load and validate a configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load and validate a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&file.preset)
            .map_err(|_| ConfigError::UnknownPreset(file.preset.clone()))?;

        let mut config = Self::from_preset(preset);
        if let Some(overrides) = &file.overrides {
            config = config.apply_patch(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (balanced preset plus every field as an override)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: Preset::Balanced.to_string(),
            overrides: Some(ClassifierConfigPatch {
                record_traces: Some(self.record_traces),
                parallel: Some(self.parallel),
                parallel_threshold: Some(self.parallel_threshold),
                log_sites: Some(self.log_sites),
            }),
        };

        Ok(serde_yaml::to_string(&file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = ClassifierConfig::from_preset(Preset::Thorough).parallel_threshold(3);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("parallel_threshold: 3"));

        let recovered = ClassifierConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(recovered, config);
    }

    #[test]
    fn test_yaml_loading_from_file() {
        let yaml_content = r#"
version: 1
preset: fast
overrides:
  record_traces: true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = ClassifierConfig::from_yaml(temp_file.path()).unwrap();
        assert!(config.record_traces);
        assert_eq!(config.parallel_threshold, 2);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = ClassifierConfig::from_yaml_str("preset: fast\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = ClassifierConfig::from_yaml_str("version: 2\npreset: fast\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let result = ClassifierConfig::from_yaml_str("version: 1\npreset: turbo\n");
        assert!(matches!(result, Err(ConfigError::UnknownPreset(ref p)) if p == "turbo"));
    }

    #[test]
    fn test_yaml_override_is_validated() {
        let yaml = r#"
version: 1
preset: balanced
overrides:
  parallel_threshold: 0
"#;
        assert!(matches!(
            ClassifierConfig::from_yaml_str(yaml),
            Err(ConfigError::Range { .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_override_field_rejected() {
        let yaml = r#"
version: 1
preset: balanced
overrides:
  max_depth: 4
"#;
        assert!(matches!(
            ClassifierConfig::from_yaml_str(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }
}
