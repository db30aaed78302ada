//! Harness
//!
//! YAML program descriptions with expected outcomes, ground-truth
//! validation and the built-in scenarios.
//!
//! ```rust,ignore
//! let spec = ProgramSpec::from_yaml("demos/ptr_iface_multi_impl.yaml")?;
//! let built = spec.build()?;
//! let verdict = classify(&built.catalog, &built.program)?;
//! assert!(validate(&verdict, &spec.expect).all_passed());
//! ```

pub mod ground_truth;
pub mod program_spec;
pub mod scenarios;

pub use ground_truth::{validate, SiteCheck, ValidationReport, ValidationStatus};
pub use program_spec::{
    BranchSpec, BuiltProgram, ConformanceSpec, FunctionSpec, InterfaceSpec, OpSpec, ProgramSpec,
    ReturnSpec,
};
pub use scenarios::Scenario;
