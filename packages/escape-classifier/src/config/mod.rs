//! Configuration System
//!
//! Two tiers:
//! - Level 1: Preset - simple one-liner
//! - Level 2: YAML with per-field overrides on top of a preset
//!
//! # Examples
//!
//! ```rust,ignore
//! use escape_classifier::config::{ClassifierConfig, Preset};
//!
//! // Level 1: preset plus builder tweaks
//! let config = ClassifierConfig::from_preset(Preset::Fast).record_traces(true);
//!
//! // Level 2: YAML
//! let config = ClassifierConfig::from_yaml("classifier.yaml")?;
//! ```

pub mod classifier_config;
pub mod error;
pub mod io;
pub mod patch;
pub mod preset;
pub mod validation;

// Re-exports
pub use classifier_config::ClassifierConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use patch::ClassifierConfigPatch;
pub use preset::Preset;
pub use validation::Validatable;
