//! Whole-program validation run before classification
//!
//! Programs assembled through the builders already passed the per-function
//! checks; `Program::from_functions` bypasses them, so they run again here.
//! Every failure is `IllFormedProgram` and no site is classified.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::errors::{EscapeError, Result};
use crate::features::escape_analysis::ports::ProgramValidatorPort;
use crate::features::program_graph::domain::structure;
use crate::features::program_graph::{Function, Operation, Program};
use crate::features::type_catalog::{ConcreteTypeId, TypeCatalog};

#[derive(Debug, Default, Clone, Copy)]
pub struct ProgramValidator;

impl ProgramValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_names(program: &Program) -> Result<()> {
        let mut names = FxHashSet::default();
        for function in program.functions() {
            if !names.insert(function.name()) {
                return Err(EscapeError::ill_formed(format!(
                    "function '{}' is defined twice",
                    function.name()
                )));
            }
        }
        Ok(())
    }

    fn check_site_ownership(program: &Program) -> Result<()> {
        let mut owners: FxHashMap<&str, &str> = FxHashMap::default();
        for function in program.functions() {
            for site in function.sites() {
                match owners.get(site.id.as_str()) {
                    Some(owner) if *owner != function.name() => {
                        return Err(EscapeError::ill_formed(format!(
                            "site '{}' is constructed in both '{}' and '{}'",
                            site.id,
                            owner,
                            function.name()
                        )));
                    }
                    _ => {
                        owners.insert(site.id.as_str(), function.name());
                    }
                }
            }
        }
        Ok(())
    }

    fn check_conformance(catalog: &TypeCatalog, function: &Function) -> Result<()> {
        let types: FxHashMap<_, ConcreteTypeId> = function
            .sites()
            .into_iter()
            .map(|site| (&site.id, site.ty))
            .collect();

        for op in function.operations() {
            let Operation::ReturnViaInterface(site, iface) = op else {
                continue;
            };
            let Some(&ty) = types.get(site) else {
                continue;
            };
            if !catalog.satisfies(ty, *iface)? {
                return Err(EscapeError::ill_formed(format!(
                    "function '{}' returns site '{}' of type '{}' via '{}', which it does not satisfy",
                    function.name(),
                    site,
                    catalog.concrete_name(ty),
                    catalog.interface_name(*iface)
                )));
            }
        }
        Ok(())
    }

    fn check_call_graph(program: &Program) -> Result<()> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut index: FxHashMap<&str, NodeIndex> = FxHashMap::default();
        for function in program.functions() {
            index.insert(function.name(), graph.add_node(function.name()));
        }

        for function in program.functions() {
            let caller = index[function.name()];
            for call in function.calls() {
                let Some(&callee) = index.get(call.callee.as_str()) else {
                    return Err(EscapeError::ill_formed(format!(
                        "function '{}' calls unknown function '{}'",
                        function.name(),
                        call.callee
                    )));
                };
                graph.add_edge(caller, callee, ());
            }
        }

        toposort(&graph, None).map(|_| ()).map_err(|cycle| {
            let name = graph.node_weight(cycle.node_id()).copied().unwrap_or("?");
            EscapeError::ill_formed(format!("call graph has a cycle through '{}'", name))
        })
    }

    fn validate_program(catalog: &TypeCatalog, program: &Program) -> Result<()> {
        Self::check_names(program)?;
        Self::check_site_ownership(program)?;

        for function in program.functions() {
            structure::check_function(catalog, function).map_err(|reason| {
                EscapeError::ill_formed(format!("function '{}': {}", function.name(), reason))
            })?;
            Self::check_conformance(catalog, function)?;
        }

        Self::check_call_graph(program)
    }
}

impl ProgramValidatorPort for ProgramValidator {
    fn validate(&self, catalog: &TypeCatalog, program: &Program) -> Result<()> {
        Self::validate_program(catalog, program).inspect_err(|e| {
            warn!(error = %e, functions = program.functions().len(), "program rejected");
        })
    }
}
