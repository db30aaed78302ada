/*
 * Escape Classifier - static stack/heap classification of construction sites
 *
 * Feature-First Hexagonal Architecture:
 * - features/    : Vertical slices (type_catalog → program_graph → escape_analysis → verdict_report)
 * - config/      : Presets, validation, YAML
 * - harness/     : Program descriptions, ground truth, built-in scenarios
 *
 * Catalog and program are built once, then only borrowed; `classify` is a
 * single linear pass per function.
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Program descriptions and ground-truth validation
pub mod harness;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use errors::{EntityKind, EscapeError, Result};
pub use features::escape_analysis::{
    classify, classify_batch, classify_with, EscapeClassificationService, Outcome, SiteVerdict,
    Verdict,
};
pub use features::program_graph::{
    BranchKey, ConstructMode, Discriminator, Function, FunctionBuilder, Program, ReturnKind, SiteId,
};
pub use features::type_catalog::{ConcreteTypeId, InterfaceId, TypeCatalog};
pub use features::verdict_report::{render, RenderedSite};
