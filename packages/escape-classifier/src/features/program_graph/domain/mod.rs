//! Program Graph domain model

pub mod function;
pub mod operation;
pub(crate) mod structure;

pub use function::{Function, Program, ReturnKind};
pub use operation::{
    Branch, BranchKey, CallSite, ConstructMode, ConstructionSite, Discriminator, Dispatch, Operation,
    SiteId,
};
