//! Rule-based site classifier
//!
//! One pass per function in body order. Each return operation decides the
//! fate of the site it hands out; every other site is conservatively `Heap`.
//!
//! ```text
//! ReturnValue(s)                  -> Stack  value-return:copied
//! ReturnPointer(s)                -> Heap   pointer-return:escapes
//! ReturnViaInterface(s, I)        -> Heap   interface-return:{monomorphic,polymorphic}
//! Dispatch(resolved)              -> live branch as above, prefixed dispatch:resolved
//! Dispatch(unresolved, 1 type)    -> each branch as above, prefixed dispatch:uniform
//! Dispatch(unresolved, >=2 types) -> Heap   dispatch:polymorphic-unresolved
//! anything else                   -> Heap   unresolved:conservative
//! ```
//!
//! Returned pointers escape whatever the interface arity; a monomorphic
//! interface only changes the trace.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::config::ClassifierConfig;
use crate::features::escape_analysis::domain::{rules, Outcome, SiteVerdict, Verdict};
use crate::features::escape_analysis::ports::EscapeClassifierPort;
use crate::features::program_graph::{
    Branch, ConstructionSite, Dispatch, Discriminator, Function, Operation, Program, SiteId,
};
use crate::features::type_catalog::TypeCatalog;

type Fate = (Outcome, Vec<&'static str>);

#[derive(Debug, Clone)]
pub struct RuleClassifier {
    record_traces: bool,
    log_sites: bool,
}

impl RuleClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            record_traces: config.record_traces,
            log_sites: config.log_sites,
        }
    }

    /// Functions whose returned value some caller reads through
    fn observed_functions(program: &Program) -> FxHashSet<&str> {
        program
            .functions()
            .iter()
            .flat_map(|f| f.calls())
            .filter(|call| call.observed)
            .map(|call| call.callee.as_str())
            .collect()
    }

    /// Rules 1 and 2 for a single return operation
    fn return_fate<'p>(
        catalog: &TypeCatalog,
        op: &'p Operation,
        observed: bool,
        prefix: Option<&'static str>,
    ) -> Option<(&'p SiteId, Fate)> {
        let mut trace: Vec<&'static str> = prefix.into_iter().collect();

        let (site, outcome) = match op {
            Operation::ReturnValue(site) => {
                trace.push(rules::VALUE_RETURN);
                (site, Outcome::Stack)
            }
            Operation::ReturnPointer(site) => {
                trace.push(rules::POINTER_RETURN);
                (site, Outcome::Heap)
            }
            Operation::ReturnViaInterface(site, iface) => {
                trace.push(match catalog.arity(*iface) {
                    Ok(1) => rules::INTERFACE_MONOMORPHIC,
                    _ => rules::INTERFACE_POLYMORPHIC,
                });
                (site, Outcome::Heap)
            }
            _ => return None,
        };

        if observed && outcome == Outcome::Heap {
            trace.push(rules::CALLER_OBSERVED);
        }
        Some((site, (outcome, trace)))
    }

    /// Rules 3 and 4
    fn dispatch_fates<'p>(
        catalog: &TypeCatalog,
        dispatch: &'p Dispatch,
        sites: &FxHashMap<&SiteId, &ConstructionSite>,
        observed: bool,
        fates: &mut FxHashMap<&'p SiteId, Fate>,
    ) {
        let returns = |branch: &'p Branch| branch.body().last().and_then(Operation::returned_site);

        let prefix = match dispatch.discriminator() {
            Discriminator::Resolved { .. } => {
                // Dead branches are left to the conservative default
                if let Some(live) = dispatch.live_branch().map(|i| &dispatch.branches()[i]) {
                    Self::branch_fates(catalog, live, observed, rules::DISPATCH_RESOLVED, fates);
                }
                return;
            }
            Discriminator::Unresolved { .. } => rules::DISPATCH_UNIFORM,
        };

        let returned_types: BTreeSet<_> = dispatch
            .branches()
            .iter()
            .filter_map(returns)
            .filter_map(|site| sites.get(site).map(|s| s.ty))
            .collect();

        if returned_types.len() < 2 {
            for branch in dispatch.branches() {
                Self::branch_fates(catalog, branch, observed, prefix, fates);
            }
            return;
        }

        for branch in dispatch.branches() {
            let in_branch = branch.sites().map(|s| &s.id);
            for site in in_branch.chain(returns(branch)) {
                fates
                    .entry(site)
                    .or_insert_with(|| (Outcome::Heap, vec![rules::DISPATCH_POLYMORPHIC]));
            }
        }
    }

    fn branch_fates<'p>(
        catalog: &TypeCatalog,
        branch: &'p Branch,
        observed: bool,
        prefix: &'static str,
        fates: &mut FxHashMap<&'p SiteId, Fate>,
    ) {
        for op in branch.body() {
            if let Some((site, fate)) = Self::return_fate(catalog, op, observed, Some(prefix)) {
                fates.entry(site).or_insert(fate);
            }
        }
    }

    fn classify_function(
        &self,
        catalog: &TypeCatalog,
        function: &Function,
        observed: bool,
        verdict: &mut Verdict,
    ) {
        let sites = function.sites();
        let by_id: FxHashMap<&SiteId, &ConstructionSite> =
            sites.iter().map(|&s| (&s.id, s)).collect();
        let mut fates: FxHashMap<&SiteId, Fate> = FxHashMap::default();

        for op in function.body() {
            match op {
                Operation::Dispatch(dispatch) => {
                    Self::dispatch_fates(catalog, dispatch, &by_id, observed, &mut fates);
                }
                op => {
                    if let Some((site, fate)) = Self::return_fate(catalog, op, observed, None) {
                        fates.entry(site).or_insert(fate);
                    }
                }
            }
        }

        for site in sites {
            let (outcome, mut trace) = fates
                .remove(&site.id)
                .unwrap_or_else(|| (Outcome::Heap, vec![rules::CONSERVATIVE]));

            if self.log_sites {
                debug!(site = %site.id, function = function.name(), %outcome, ?trace, "site classified");
            } else {
                trace!(site = %site.id, function = function.name(), %outcome, "site classified");
            }
            if !self.record_traces {
                trace.clear();
            }

            verdict.insert(
                site.id.clone(),
                SiteVerdict {
                    function: function.name().to_string(),
                    ty: catalog.concrete_name(site.ty),
                    outcome,
                    trace,
                },
            );
        }
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl EscapeClassifierPort for RuleClassifier {
    fn classify(&self, catalog: &TypeCatalog, program: &Program) -> Verdict {
        let observed = Self::observed_functions(program);
        let mut verdict = Verdict::default();
        for function in program.functions() {
            self.classify_function(
                catalog,
                function,
                observed.contains(function.name()),
                &mut verdict,
            );
        }
        verdict
    }

    fn name(&self) -> &'static str {
        "rule-classifier"
    }
}
