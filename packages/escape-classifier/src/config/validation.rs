//! Configuration validation
//!
//! Provides the validation trait shared by configuration objects.

use super::error::ConfigResult;

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use escape_classifier::config::Validatable;
///
/// fn build_service<C: Validatable>(config: C) -> Result<Service, ConfigError> {
///     config.validate()?;
///     // ... build service
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;
}
