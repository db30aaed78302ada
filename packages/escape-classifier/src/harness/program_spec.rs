//! YAML program descriptions
//!
//! ```yaml
//! name: multi-impl
//! types: [readerV1, readerV2]
//! interfaces:
//!   - name: io.Reader
//!     implementors: [readerV1, readerV2]
//! conforms:
//!   - { type: readerV1, interface: io.Reader }
//! functions:
//!   - name: New
//!     returns: { kind: interface, interface: io.Reader }
//!     body:
//!       - op: dispatch
//!         on: vers
//!         branches:
//!           - key: v1
//!             body:
//!               - { op: construct, site: s0, type: readerV1, mode: by_pointer }
//!               - { op: return_via_interface, site: s0, interface: io.Reader }
//!           - body:   # no key: default branch
//!               - { op: construct, site: s1, type: readerV2, mode: by_pointer }
//!               - { op: return_via_interface, site: s1, interface: io.Reader }
//! expect:
//!   s0: heap
//!   s1: heap
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::errors::{EscapeError, Result};
use crate::features::escape_analysis::Outcome;
use crate::features::program_graph::{
    BodyBuilder, BranchKey, ConstructMode, Discriminator, Function, FunctionBuilder, Program,
    ReturnKind, SiteId,
};
use crate::features::type_catalog::TypeCatalog;

/// A whole program description with optional expected outcomes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceSpec>,
    /// Explicit conformance assertions, checked while building
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conforms: Vec<ConformanceSpec>,
    #[serde(default)]
    pub functions: Vec<FunctionSpec>,
    /// Site id → expected outcome
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expect: BTreeMap<String, Outcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceSpec {
    pub name: String,
    #[serde(default)]
    pub implementors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConformanceSpec {
    #[serde(rename = "type")]
    pub ty: String,
    pub interface: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionSpec {
    pub name: String,
    pub returns: ReturnSpec,
    pub body: Vec<OpSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ReturnSpec {
    Value {
        #[serde(rename = "type")]
        ty: String,
    },
    Pointer {
        #[serde(rename = "type")]
        ty: String,
    },
    Interface {
        interface: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum OpSpec {
    Construct {
        site: String,
        #[serde(rename = "type")]
        ty: String,
        mode: ConstructMode,
    },
    ReturnValue {
        site: String,
    },
    ReturnPointer {
        site: String,
    },
    ReturnViaInterface {
        site: String,
        interface: String,
    },
    Call {
        callee: String,
        #[serde(default)]
        observed: bool,
    },
    Dispatch {
        /// Discriminator name
        on: String,
        /// Known discriminator value; absent when only known at runtime
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        branches: Vec<BranchSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchSpec {
    /// Branch key; absent for the default branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub body: Vec<OpSpec>,
}

/// Catalog and program built from a description
#[derive(Debug)]
pub struct BuiltProgram {
    pub catalog: TypeCatalog,
    pub program: Program,
}

impl ProgramSpec {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
            .map_err(|e| EscapeError::harness(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| EscapeError::harness(format!("invalid program description: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| EscapeError::harness(format!("cannot serialize program description: {}", e)))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Register the catalog, check conformance assertions, build every function
    pub fn build(&self) -> Result<BuiltProgram> {
        let mut catalog = TypeCatalog::new();
        for ty in &self.types {
            catalog.register_type(ty.as_str())?;
        }
        for iface in &self.interfaces {
            let implementors = iface
                .implementors
                .iter()
                .map(|name| catalog.concrete(name).map(|c| c.id()))
                .collect::<Result<Vec<_>>>()?;
            catalog.register_interface(iface.name.as_str(), &implementors)?;
        }
        for assertion in &self.conforms {
            catalog.assert_conforms(
                catalog.concrete(&assertion.ty)?.id(),
                catalog.interface(&assertion.interface)?.id(),
            )?;
        }

        let mut program = Program::builder();
        for function in &self.functions {
            program.add(function.build(&catalog)?)?;
        }
        let program = program.build();

        debug!(
            name = self.display_name(),
            types = catalog.types().len(),
            interfaces = catalog.interfaces().len(),
            functions = program.functions().len(),
            "program description built"
        );
        Ok(BuiltProgram { catalog, program })
    }
}

impl FunctionSpec {
    fn build(&self, catalog: &TypeCatalog) -> Result<Function> {
        let return_kind = match &self.returns {
            ReturnSpec::Value { ty } => ReturnKind::Value(catalog.concrete(ty)?.id()),
            ReturnSpec::Pointer { ty } => ReturnKind::Pointer(catalog.concrete(ty)?.id()),
            ReturnSpec::Interface { interface } => {
                ReturnKind::Interface(catalog.interface(interface)?.id())
            }
        };

        let mut builder = FunctionBuilder::new(catalog, self.name.as_str(), return_kind)?;
        apply_body(catalog, &mut builder, &self.body)?;
        builder.build()
    }
}

fn apply_body(catalog: &TypeCatalog, body: &mut BodyBuilder<'_>, ops: &[OpSpec]) -> Result<()> {
    for op in ops {
        match op {
            OpSpec::Construct { site, ty, mode } => {
                body.construct(site.as_str(), *mode, catalog.concrete(ty)?.id())?;
            }
            OpSpec::ReturnValue { site } => body.return_value(&SiteId::from(site.as_str()))?,
            OpSpec::ReturnPointer { site } => body.return_pointer(&SiteId::from(site.as_str()))?,
            OpSpec::ReturnViaInterface { site, interface } => body.return_via_interface(
                &SiteId::from(site.as_str()),
                catalog.interface(interface)?.id(),
            )?,
            OpSpec::Call { callee, observed } => body.call(callee.as_str(), *observed)?,
            OpSpec::Dispatch {
                on,
                value,
                branches,
            } => {
                let discriminator = match value {
                    Some(value) => Discriminator::resolved(on.as_str(), value.as_str()),
                    None => Discriminator::unresolved(on.as_str()),
                };
                body.dispatch(discriminator, |d| {
                    for branch in branches {
                        let key = match &branch.key {
                            Some(key) => BranchKey::value(key.as_str()),
                            None => BranchKey::Default,
                        };
                        d.branch(key, |b| apply_body(catalog, b, &branch.body))?;
                    }
                    Ok(())
                })?;
            }
        }
    }
    Ok(())
}
