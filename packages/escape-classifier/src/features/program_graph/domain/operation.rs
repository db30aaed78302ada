//! Operations of a function body

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::features::type_catalog::{ConcreteTypeId, InterfaceId};

/// Identifier of a construction site, unique across a program
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SiteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Whether a site produces the raw composite or an indirection to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructMode {
    ByValue,
    ByPointer,
}

impl fmt::Display for ConstructMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructMode::ByValue => write!(f, "by-value"),
            ConstructMode::ByPointer => write!(f, "by-pointer"),
        }
    }
}

/// "A value of type `ty` is created here"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructionSite {
    pub id: SiteId,
    pub ty: ConcreteTypeId,
    pub mode: ConstructMode,
}

/// Invocation of another function of the same program
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub callee: String,
    /// The caller reads through the returned pointer/interface with at least
    /// one further method call
    pub observed: bool,
}

/// The value selecting a dispatch branch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Discriminator {
    /// Only known at runtime
    Unresolved { name: String },
    /// Known at analysis time
    Resolved { name: String, value: String },
}

impl Discriminator {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Discriminator::Unresolved { name: name.into() }
    }

    pub fn resolved(name: impl Into<String>, value: impl Into<String>) -> Self {
        Discriminator::Resolved {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Discriminator::Unresolved { name } | Discriminator::Resolved { name, .. } => name,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Discriminator::Resolved { .. })
    }
}

/// Key selecting a branch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BranchKey {
    /// Taken when the discriminator equals this value
    Value(String),
    /// Taken when no other key matches
    Default,
}

impl BranchKey {
    pub fn value(v: impl Into<String>) -> Self {
        BranchKey::Value(v.into())
    }
}

impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchKey::Value(v) => write!(f, "{:?}", v),
            BranchKey::Default => write!(f, "default"),
        }
    }
}

/// One alternative of a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub(crate) key: BranchKey,
    pub(crate) body: Vec<Operation>,
}

impl Branch {
    pub fn key(&self) -> &BranchKey {
        &self.key
    }

    pub fn body(&self) -> &[Operation] {
        &self.body
    }

    /// Sites constructed in this branch, in body order
    pub fn sites(&self) -> impl Iterator<Item = &ConstructionSite> {
        self.body.iter().filter_map(|op| match op {
            Operation::Construct(site) => Some(site),
            _ => None,
        })
    }
}

/// Exactly one branch executes, chosen by the discriminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub(crate) discriminator: Discriminator,
    pub(crate) branches: Vec<Branch>,
}

impl Dispatch {
    pub fn discriminator(&self) -> &Discriminator {
        &self.discriminator
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Index of the branch a resolved discriminator selects
    ///
    /// `None` for an unresolved discriminator, or when no key matches and
    /// there is no default branch.
    pub fn live_branch(&self) -> Option<usize> {
        let Discriminator::Resolved { value, .. } = &self.discriminator else {
            return None;
        };

        self.branches
            .iter()
            .position(|b| matches!(&b.key, BranchKey::Value(v) if v == value))
            .or_else(|| {
                self.branches
                    .iter()
                    .position(|b| b.key == BranchKey::Default)
            })
    }
}

/// One step of a straight-line function body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Construct(ConstructionSite),
    /// The value at the site is copied out to the caller
    ReturnValue(SiteId),
    /// The pointer at the site is handed to the caller
    ReturnPointer(SiteId),
    /// The pointer at the site is wrapped to satisfy the interface and handed to the caller
    ReturnViaInterface(SiteId, InterfaceId),
    Call(CallSite),
    Dispatch(Dispatch),
}

impl Operation {
    /// Returns and dispatches end a body
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Operation::ReturnValue(_)
                | Operation::ReturnPointer(_)
                | Operation::ReturnViaInterface(..)
                | Operation::Dispatch(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Construct(_) => "Construct",
            Operation::ReturnValue(_) => "ReturnValue",
            Operation::ReturnPointer(_) => "ReturnPointer",
            Operation::ReturnViaInterface(..) => "ReturnViaInterface",
            Operation::Call(_) => "Call",
            Operation::Dispatch(_) => "Dispatch",
        }
    }

    /// The site a return operation hands to the caller
    pub fn returned_site(&self) -> Option<&SiteId> {
        match self {
            Operation::ReturnValue(site)
            | Operation::ReturnPointer(site)
            | Operation::ReturnViaInterface(site, _) => Some(site),
            _ => None,
        }
    }
}
