//! Program Graph construction

pub mod builder;

pub use builder::{BodyBuilder, DispatchBuilder, FunctionBuilder, ProgramBuilder};
