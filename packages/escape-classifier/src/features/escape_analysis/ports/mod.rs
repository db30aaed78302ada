//! Escape Classification Ports
//!
//! ```rust,ignore
//! fn run<C: EscapeClassifierPort>(classifier: &C, catalog: &TypeCatalog, program: &Program) {
//!     let verdict = classifier.classify(catalog, program)?;
//! }
//! ```

use crate::errors::Result;
use crate::features::escape_analysis::domain::Verdict;
use crate::features::program_graph::Program;
use crate::features::type_catalog::TypeCatalog;

/// Program validation
pub trait ProgramValidatorPort: Send + Sync {
    /// Fails with `IllFormedProgram` on the first violated invariant
    fn validate(&self, catalog: &TypeCatalog, program: &Program) -> Result<()>;
}

/// Site classification
pub trait EscapeClassifierPort: Send + Sync {
    /// Classify every construction site of an already validated program
    fn classify(&self, catalog: &TypeCatalog, program: &Program) -> Verdict;

    /// Classifier name for logging
    fn name(&self) -> &'static str;
}
