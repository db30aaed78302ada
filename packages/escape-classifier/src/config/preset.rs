//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI: verdicts only
    ///
    /// - No rule traces
    /// - Batches go parallel from 2 programs
    Fast,

    /// Development: verdicts with traces
    ///
    /// - Rule traces recorded
    /// - Batches go parallel from 8 programs
    Balanced,

    /// Audit: everything recorded, sequential batches
    ///
    /// - Rule traces recorded
    /// - One debug event per classified site
    Thorough,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: fast, balanced, thorough",
                s
            )),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str_case_insensitive() {
        assert_eq!(Preset::from_str("FAST").unwrap(), Preset::Fast);
        assert_eq!(Preset::from_str("Balanced").unwrap(), Preset::Balanced);
        assert_eq!(Preset::from_str("thorough").unwrap(), Preset::Thorough);
        assert!(Preset::from_str("custom").is_err());
    }

    #[test]
    fn test_preset_roundtrip_as_str() {
        for preset in [Preset::Fast, Preset::Balanced, Preset::Thorough] {
            assert_eq!(Preset::from_str(preset.as_str()).unwrap(), preset);
        }
    }
}
