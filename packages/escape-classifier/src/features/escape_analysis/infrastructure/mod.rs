//! Escape Classification Infrastructure - port implementations

pub mod rule_classifier;
pub mod validator;

pub use rule_classifier::RuleClassifier;
pub use validator::ProgramValidator;
