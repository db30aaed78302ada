//! Functions and programs

use std::fmt;

use super::operation::{CallSite, ConstructionSite, Operation};
use crate::features::type_catalog::{ConcreteTypeId, InterfaceId};

/// Declared return kind of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    Value(ConcreteTypeId),
    Pointer(ConcreteTypeId),
    Interface(InterfaceId),
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnKind::Value(_) => write!(f, "ReturnsValue"),
            ReturnKind::Pointer(_) => write!(f, "ReturnsPointer"),
            ReturnKind::Interface(_) => write!(f, "ReturnsInterface"),
        }
    }
}

/// A function: name, declared return kind and an ordered, loop-free body
///
/// Only [`FunctionBuilder`](crate::features::program_graph::FunctionBuilder)
/// creates functions, so a `Function` value always passed the structural
/// checks against the catalog it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub(crate) name: String,
    pub(crate) return_kind: ReturnKind,
    pub(crate) body: Vec<Operation>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_kind(&self) -> ReturnKind {
        self.return_kind
    }

    pub fn body(&self) -> &[Operation] {
        &self.body
    }

    /// Every construction site of the function, branches included, in body order
    pub fn sites(&self) -> Vec<&ConstructionSite> {
        let mut sites = Vec::new();
        for op in &self.body {
            match op {
                Operation::Construct(site) => sites.push(site),
                Operation::Dispatch(dispatch) => {
                    for branch in dispatch.branches() {
                        sites.extend(branch.sites());
                    }
                }
                _ => {}
            }
        }
        sites
    }

    /// Every call the function makes, branches included, in body order
    pub fn calls(&self) -> Vec<&CallSite> {
        let mut calls = Vec::new();
        for op in &self.body {
            match op {
                Operation::Call(call) => calls.push(call),
                Operation::Dispatch(dispatch) => {
                    for branch in dispatch.branches() {
                        calls.extend(branch.body().iter().filter_map(|op| match op {
                            Operation::Call(call) => Some(call),
                            _ => None,
                        }));
                    }
                }
                _ => {}
            }
        }
        calls
    }

    /// All operations in body order, each dispatch followed by its branch bodies
    pub fn operations(&self) -> Vec<&Operation> {
        let mut ops = Vec::with_capacity(self.body.len());
        for op in &self.body {
            ops.push(op);
            if let Operation::Dispatch(dispatch) = op {
                for branch in dispatch.branches() {
                    ops.extend(branch.body());
                }
            }
        }
        ops
    }

    /// Number of operations, branch bodies included
    pub fn operation_count(&self) -> usize {
        self.operations().len()
    }
}

/// A whole program description: functions in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    functions: Vec<Function>,
}

impl Program {
    /// Assemble a program without checks; `classify` validates it
    pub fn from_functions(functions: Vec<Function>) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn site_count(&self) -> usize {
        self.functions.iter().map(|f| f.sites().len()).sum()
    }

    pub fn operation_count(&self) -> usize {
        self.functions.iter().map(Function::operation_count).sum()
    }

    pub(crate) fn push(&mut self, function: Function) {
        self.functions.push(function);
    }
}
