//! Checked builders for functions and programs
//!
//! Operations are appended in order. Every append is checked eagerly, so a
//! bad reference fails at the call that made it:
//! - unregistered type/interface handles fail with `UnknownType`
//! - forward references, duplicate sites, appends after a terminator and
//!   return/kind mismatches fail with `MalformedFunction`
//!
//! Interface conformance is deliberately left to `classify`.

use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::{Deref, DerefMut};

use crate::errors::{EntityKind, EscapeError, Result};
use crate::features::program_graph::domain::structure;
use crate::features::program_graph::domain::{
    Branch, BranchKey, CallSite, ConstructMode, ConstructionSite, Discriminator, Dispatch, Function,
    Operation, Program, ReturnKind, SiteId,
};
use crate::features::type_catalog::{ConcreteTypeId, InterfaceId, TypeCatalog};

/// Appends operations to one body (a function body or a dispatch branch)
pub struct BodyBuilder<'a> {
    catalog: &'a TypeCatalog,
    function: String,
    return_kind: ReturnKind,
    visible: FxHashMap<SiteId, ConstructionSite>,
    seen: FxHashSet<SiteId>,
    ops: Vec<Operation>,
    in_branch: bool,
}

impl<'a> BodyBuilder<'a> {
    /// Append `Construct`
    pub fn construct(
        &mut self,
        site: impl Into<SiteId>,
        mode: ConstructMode,
        ty: ConcreteTypeId,
    ) -> Result<SiteId> {
        self.catalog.concrete_by_id(ty)?;
        self.ensure_open("Construct")?;

        let id = site.into();
        if self.seen.contains(&id) {
            return Err(self.malformed(format!("site '{}' is constructed twice", id)));
        }

        let site = ConstructionSite {
            id: id.clone(),
            ty,
            mode,
        };
        self.seen.insert(id.clone());
        self.visible.insert(id.clone(), site.clone());
        self.ops.push(Operation::Construct(site));
        Ok(id)
    }

    pub fn construct_value(&mut self, site: impl Into<SiteId>, ty: ConcreteTypeId) -> Result<SiteId> {
        self.construct(site, ConstructMode::ByValue, ty)
    }

    pub fn construct_pointer(&mut self, site: impl Into<SiteId>, ty: ConcreteTypeId) -> Result<SiteId> {
        self.construct(site, ConstructMode::ByPointer, ty)
    }

    /// Append `ReturnValue`
    pub fn return_value(&mut self, site: &SiteId) -> Result<()> {
        self.push_return(site, Operation::ReturnValue(site.clone()))
    }

    /// Append `ReturnPointer`
    pub fn return_pointer(&mut self, site: &SiteId) -> Result<()> {
        self.push_return(site, Operation::ReturnPointer(site.clone()))
    }

    /// Append `ReturnViaInterface`
    pub fn return_via_interface(&mut self, site: &SiteId, interface: InterfaceId) -> Result<()> {
        self.catalog.interface_by_id(interface)?;
        self.push_return(site, Operation::ReturnViaInterface(site.clone(), interface))
    }

    /// Append `Call`
    pub fn call(&mut self, callee: impl Into<String>, observed: bool) -> Result<()> {
        self.ensure_open("Call")?;
        self.ops.push(Operation::Call(CallSite {
            callee: callee.into(),
            observed,
        }));
        Ok(())
    }

    /// Append `Dispatch`; `build` adds the branches
    ///
    /// ```rust,ignore
    /// f.dispatch(Discriminator::unresolved("vers"), |d| {
    ///     d.value_branch("v1", |b| {
    ///         let s = b.construct_pointer("s0", v1)?;
    ///         b.return_via_interface(&s, reader)
    ///     })?;
    ///     d.default_branch(|b| {
    ///         let s = b.construct_pointer("s1", v2)?;
    ///         b.return_via_interface(&s, reader)
    ///     })
    /// })?;
    /// ```
    pub fn dispatch<F>(&mut self, discriminator: Discriminator, build: F) -> Result<()>
    where
        F: FnOnce(&mut DispatchBuilder<'a>) -> Result<()>,
    {
        self.ensure_open("Dispatch")?;
        if self.in_branch {
            return Err(self.malformed("dispatch nested inside a dispatch branch"));
        }

        let mut builder = DispatchBuilder {
            catalog: self.catalog,
            function: self.function.clone(),
            return_kind: self.return_kind,
            visible: self.visible.clone(),
            seen: self.seen.clone(),
            branches: Vec::new(),
        };
        build(&mut builder)?;

        let dispatch = Dispatch {
            discriminator,
            branches: builder.branches,
        };
        structure::check_dispatch_shape(&dispatch).map_err(|reason| self.malformed(reason))?;

        self.seen = builder.seen;
        self.ops.push(Operation::Dispatch(dispatch));
        Ok(())
    }

    pub fn is_terminated(&self) -> bool {
        self.ops.last().is_some_and(Operation::is_terminator)
    }

    fn push_return(&mut self, id: &SiteId, op: Operation) -> Result<()> {
        self.ensure_open(op.name())?;

        let site = self.visible.get(id).ok_or_else(|| {
            self.malformed(format!(
                "{} references site '{}' before its construction",
                op.name(),
                id
            ))
        })?;
        structure::check_return(self.catalog, self.return_kind, &op, site)
            .map_err(|reason| self.malformed(reason))?;

        self.ops.push(op);
        Ok(())
    }

    fn ensure_open(&self, appending: &str) -> Result<()> {
        match self.ops.last() {
            Some(last) if last.is_terminator() => Err(self.malformed(format!(
                "{} follows the terminating {}",
                appending,
                last.name()
            ))),
            _ => Ok(()),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> EscapeError {
        EscapeError::malformed(&self.function, reason)
    }
}

/// Collects the branches of one dispatch
pub struct DispatchBuilder<'a> {
    catalog: &'a TypeCatalog,
    function: String,
    return_kind: ReturnKind,
    visible: FxHashMap<SiteId, ConstructionSite>,
    seen: FxHashSet<SiteId>,
    branches: Vec<Branch>,
}

impl<'a> DispatchBuilder<'a> {
    /// Add a branch; its body must end in a return
    pub fn branch<F>(&mut self, key: BranchKey, build: F) -> Result<()>
    where
        F: FnOnce(&mut BodyBuilder<'a>) -> Result<()>,
    {
        let mut body = BodyBuilder {
            catalog: self.catalog,
            function: self.function.clone(),
            return_kind: self.return_kind,
            visible: self.visible.clone(),
            seen: self.seen.clone(),
            ops: Vec::new(),
            in_branch: true,
        };
        build(&mut body)?;

        if !body.is_terminated() {
            return Err(body.malformed(format!("branch {} does not end in a return", key)));
        }

        self.seen = body.seen;
        self.branches.push(Branch { key, body: body.ops });
        Ok(())
    }

    pub fn value_branch<F>(&mut self, value: impl Into<String>, build: F) -> Result<()>
    where
        F: FnOnce(&mut BodyBuilder<'a>) -> Result<()>,
    {
        self.branch(BranchKey::value(value), build)
    }

    pub fn default_branch<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&mut BodyBuilder<'a>) -> Result<()>,
    {
        self.branch(BranchKey::Default, build)
    }
}

/// Builds one function
pub struct FunctionBuilder<'a> {
    body: BodyBuilder<'a>,
}

impl<'a> FunctionBuilder<'a> {
    /// Start a function; the return kind's type/interface must be registered
    pub fn new(catalog: &'a TypeCatalog, name: impl Into<String>, return_kind: ReturnKind) -> Result<Self> {
        match return_kind {
            ReturnKind::Value(ty) | ReturnKind::Pointer(ty) => {
                catalog.concrete_by_id(ty)?;
            }
            ReturnKind::Interface(iface) => {
                catalog.interface_by_id(iface)?;
            }
        }

        Ok(Self {
            body: BodyBuilder {
                catalog,
                function: name.into(),
                return_kind,
                visible: FxHashMap::default(),
                seen: FxHashSet::default(),
                ops: Vec::new(),
                in_branch: false,
            },
        })
    }

    /// Finish the function
    pub fn build(self) -> Result<Function> {
        let function = Function {
            name: self.body.function,
            return_kind: self.body.return_kind,
            body: self.body.ops,
        };
        structure::check_function(self.body.catalog, &function)
            .map_err(|reason| EscapeError::malformed(&function.name, reason))?;
        Ok(function)
    }
}

impl<'a> Deref for FunctionBuilder<'a> {
    type Target = BodyBuilder<'a>;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

impl<'a> DerefMut for FunctionBuilder<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.body
    }
}

/// Collects functions into a program, rejecting duplicate names
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
    names: FxHashSet<String>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, function: Function) -> Result<&mut Self> {
        if !self.names.insert(function.name().to_string()) {
            return Err(EscapeError::duplicate(EntityKind::Function, function.name()));
        }
        self.program.push(function);
        Ok(self)
    }

    pub fn build(self) -> Program {
        self.program
    }
}

impl Program {
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::new()
    }
}
