//! Escape Classifier
//!
//! Decides, for every construction site of a program, whether the value is
//! confined to its constructing frame (`Stack`) or may outlive it (`Heap`).
//!
//! ## Architecture
//!
//! ```text
//! domain/          Outcome, SiteVerdict, Verdict, rule names
//! ports/           ProgramValidatorPort, EscapeClassifierPort
//! infrastructure/  ProgramValidator (petgraph call graph), RuleClassifier
//! application/     EscapeClassificationService, classify, classify_batch
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let verdict = classify(&catalog, &program)?;
//! assert_eq!(verdict.outcome("s0"), Some(Outcome::Stack));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{classify, classify_batch, classify_with, EscapeClassificationService};
pub use domain::{rules, Outcome, SiteVerdict, Verdict};
pub use infrastructure::{ProgramValidator, RuleClassifier};
pub use ports::{EscapeClassifierPort, ProgramValidatorPort};
