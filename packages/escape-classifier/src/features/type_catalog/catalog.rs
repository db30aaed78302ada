//! Type Catalog - registry of concrete types, interfaces and conformance
//!
//! Conformance is an explicit set-membership relation fixed when the
//! interface is registered. Mutation needs `&mut TypeCatalog`; analysis only
//! ever borrows the catalog immutably, so the relation cannot change under it.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

use super::domain::{ConcreteType, ConcreteTypeId, InterfaceId, InterfaceType};
use crate::errors::{EntityKind, EscapeError, Result};

static NEXT_CATALOG_TAG: AtomicU32 = AtomicU32::new(1);

/// Registry of composite value types and interface types
#[derive(Debug)]
pub struct TypeCatalog {
    tag: u32,
    concretes: Vec<ConcreteType>,
    interfaces: Vec<InterfaceType>,
    concrete_names: FxHashMap<String, ConcreteTypeId>,
    interface_names: FxHashMap<String, InterfaceId>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self {
            tag: NEXT_CATALOG_TAG.fetch_add(1, Ordering::Relaxed),
            concretes: Vec::new(),
            interfaces: Vec::new(),
            concrete_names: FxHashMap::default(),
            interface_names: FxHashMap::default(),
        }
    }

    /// Register a concrete composite type
    pub fn register_type(&mut self, name: impl Into<String>) -> Result<ConcreteType> {
        let name = name.into();
        if self.concrete_names.contains_key(&name) {
            return Err(EscapeError::duplicate(EntityKind::ConcreteType, name));
        }

        let id = ConcreteTypeId {
            catalog: self.tag,
            index: self.concretes.len() as u32,
        };
        let concrete = ConcreteType::new(id, name.clone());
        self.concrete_names.insert(name, id);
        self.concretes.push(concrete.clone());

        debug!("catalog: registered type '{}' as {}", concrete.name(), id);
        Ok(concrete)
    }

    /// Register an interface together with every type that satisfies it
    ///
    /// Fails with `UnknownType` if any satisfying type was not registered
    /// here first.
    pub fn register_interface(
        &mut self,
        name: impl Into<String>,
        satisfying: &[ConcreteTypeId],
    ) -> Result<InterfaceType> {
        let name = name.into();
        if self.interface_names.contains_key(&name) {
            return Err(EscapeError::duplicate(EntityKind::Interface, name));
        }

        let mut implementors = BTreeSet::new();
        for &concrete in satisfying {
            self.concrete_by_id(concrete)?;
            implementors.insert(concrete);
        }

        let id = InterfaceId {
            catalog: self.tag,
            index: self.interfaces.len() as u32,
        };
        let interface = InterfaceType::new(id, name.clone(), implementors);
        self.interface_names.insert(name, id);
        self.interfaces.push(interface.clone());

        debug!(
            "catalog: registered interface '{}' ({}, arity {})",
            interface.name(),
            interface.dispatch_shape(),
            interface.arity()
        );
        Ok(interface)
    }

    /// Does `concrete` satisfy `interface`?
    pub fn satisfies(&self, concrete: ConcreteTypeId, interface: InterfaceId) -> Result<bool> {
        self.concrete_by_id(concrete)?;
        Ok(self.interface_by_id(interface)?.is_satisfied_by(concrete))
    }

    /// Number of types satisfying `interface`
    pub fn arity(&self, interface: InterfaceId) -> Result<usize> {
        Ok(self.interface_by_id(interface)?.arity())
    }

    /// Explicit conformance assertion
    ///
    /// The program-level counterpart of `var _ I = &T{}`: succeeds only when
    /// `concrete` was registered as satisfying `interface`.
    pub fn assert_conforms(&self, concrete: ConcreteTypeId, interface: InterfaceId) -> Result<()> {
        if self.satisfies(concrete, interface)? {
            return Ok(());
        }
        Err(EscapeError::ill_formed(format!(
            "type '{}' does not satisfy interface '{}'",
            self.concrete_by_id(concrete)?.name(),
            self.interface_by_id(interface)?.name()
        )))
    }

    /// Look up a concrete type by name
    pub fn concrete(&self, name: &str) -> Result<&ConcreteType> {
        self.concrete_names
            .get(name)
            .map(|id| &self.concretes[id.index as usize])
            .ok_or_else(|| EscapeError::unknown_type(name))
    }

    /// Look up an interface by name
    pub fn interface(&self, name: &str) -> Result<&InterfaceType> {
        self.interface_names
            .get(name)
            .map(|id| &self.interfaces[id.index as usize])
            .ok_or_else(|| EscapeError::unknown_interface(name))
    }

    pub fn concrete_by_id(&self, id: ConcreteTypeId) -> Result<&ConcreteType> {
        if id.catalog != self.tag {
            return Err(EscapeError::unknown_type(id.to_string()));
        }
        self.concretes
            .get(id.index as usize)
            .ok_or_else(|| EscapeError::unknown_type(id.to_string()))
    }

    pub fn interface_by_id(&self, id: InterfaceId) -> Result<&InterfaceType> {
        if id.catalog != self.tag {
            return Err(EscapeError::unknown_interface(id.to_string()));
        }
        self.interfaces
            .get(id.index as usize)
            .ok_or_else(|| EscapeError::unknown_interface(id.to_string()))
    }

    pub fn contains_concrete(&self, id: ConcreteTypeId) -> bool {
        self.concrete_by_id(id).is_ok()
    }

    pub fn contains_interface(&self, id: InterfaceId) -> bool {
        self.interface_by_id(id).is_ok()
    }

    /// Name of a concrete type, or its raw handle when unknown here
    pub fn concrete_name(&self, id: ConcreteTypeId) -> String {
        self.concrete_by_id(id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Name of an interface, or its raw handle when unknown here
    pub fn interface_name(&self, id: InterfaceId) -> String {
        self.interface_by_id(id)
            .map(|i| i.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    }

    pub fn types(&self) -> &[ConcreteType] {
        &self.concretes
    }

    pub fn interfaces(&self) -> &[InterfaceType] {
        &self.interfaces
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
