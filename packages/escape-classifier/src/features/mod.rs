//! Feature modules - each feature follows Hexagonal Architecture
//!
//! Each feature contains (as needed):
//! - domain/         - Pure model, no external dependencies
//! - ports/          - Interface definitions (traits)
//! - application/    - Use cases
//! - infrastructure/ - Port implementations

/// Registry of concrete types, interfaces and conformance
pub mod type_catalog;

/// Functions, operations and their checked builders
pub mod program_graph;

/// Stack/heap classification rules
pub mod escape_analysis;

/// Text, JSON and Markdown rendering of verdicts
pub mod verdict_report;
