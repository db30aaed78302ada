//! Type Catalog Domain - Value Objects
//!
//! Handles issued by a [`TypeCatalog`](super::TypeCatalog). Every handle is
//! tagged with the catalog that issued it, so a handle from one catalog is
//! never silently accepted by another.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a registered concrete (composite) type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConcreteTypeId {
    pub(crate) catalog: u32,
    pub(crate) index: u32,
}

impl fmt::Display for ConcreteTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}@{}", self.index, self.catalog)
    }
}

/// Identity of a registered interface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InterfaceId {
    pub(crate) catalog: u32,
    pub(crate) index: u32,
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interface#{}@{}", self.index, self.catalog)
    }
}

/// A named composite value type
///
/// Fields are irrelevant for escape purposes; only identity matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConcreteType {
    id: ConcreteTypeId,
    name: String,
}

impl ConcreteType {
    pub(crate) fn new(id: ConcreteTypeId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> ConcreteTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named capability contract and the concrete types satisfying it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType {
    id: InterfaceId,
    name: String,
    implementors: BTreeSet<ConcreteTypeId>,
}

impl InterfaceType {
    pub(crate) fn new(id: InterfaceId, name: String, implementors: BTreeSet<ConcreteTypeId>) -> Self {
        Self {
            id,
            name,
            implementors,
        }
    }

    pub fn id(&self) -> InterfaceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Satisfying types, in registration order
    pub fn implementors(&self) -> impl Iterator<Item = ConcreteTypeId> + '_ {
        self.implementors.iter().copied()
    }

    /// Number of satisfying types
    pub fn arity(&self) -> usize {
        self.implementors.len()
    }

    pub fn is_satisfied_by(&self, concrete: ConcreteTypeId) -> bool {
        self.implementors.contains(&concrete)
    }

    pub fn dispatch_shape(&self) -> DispatchShape {
        DispatchShape::from_arity(self.arity())
    }
}

/// How many concrete types may stand behind an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchShape {
    /// No satisfying type; nothing can be returned through it
    Uninhabited,
    /// Exactly one satisfying type
    Monomorphic,
    /// Two or more satisfying types
    Polymorphic,
}

impl DispatchShape {
    pub fn from_arity(arity: usize) -> Self {
        match arity {
            0 => DispatchShape::Uninhabited,
            1 => DispatchShape::Monomorphic,
            _ => DispatchShape::Polymorphic,
        }
    }
}

impl fmt::Display for DispatchShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchShape::Uninhabited => write!(f, "uninhabited"),
            DispatchShape::Monomorphic => write!(f, "monomorphic"),
            DispatchShape::Polymorphic => write!(f, "polymorphic"),
        }
    }
}
