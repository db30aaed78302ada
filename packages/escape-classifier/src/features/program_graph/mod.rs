//! Program Graph
//!
//! Loop-free descriptions of functions: which values they construct, how
//! they return them, which functions they call and where they dispatch.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut f = FunctionBuilder::new(&catalog, "returnResult", ReturnKind::Value(result))?;
//! let s0 = f.construct_value("s0", result)?;
//! f.return_value(&s0)?;
//!
//! let mut program = Program::builder();
//! program.add(f.build()?)?;
//! let program = program.build();
//! ```

pub mod application;
pub mod domain;

pub use application::{BodyBuilder, DispatchBuilder, FunctionBuilder, ProgramBuilder};
pub use domain::{
    Branch, BranchKey, CallSite, ConstructMode, ConstructionSite, Discriminator, Dispatch, Function,
    Operation, Program, ReturnKind, SiteId,
};
