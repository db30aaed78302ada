//! Escape Classification Domain
//!
//! Outcomes, per-site verdicts and the rule names that make up a trace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::features::program_graph::SiteId;

/// Where a constructed value may live
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Provably confined to the constructing frame
    Stack,
    /// May outlive the constructing frame
    Heap,
}

impl Outcome {
    pub fn is_stack(&self) -> bool {
        matches!(self, Outcome::Stack)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Stack => "stack",
            Outcome::Heap => "heap",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule names recorded in traces
pub mod rules {
    pub const VALUE_RETURN: &str = "value-return:copied";
    pub const POINTER_RETURN: &str = "pointer-return:escapes";
    pub const INTERFACE_MONOMORPHIC: &str = "interface-return:monomorphic";
    pub const INTERFACE_POLYMORPHIC: &str = "interface-return:polymorphic";
    pub const CALLER_OBSERVED: &str = "caller:observed";
    pub const DISPATCH_RESOLVED: &str = "dispatch:resolved";
    pub const DISPATCH_UNIFORM: &str = "dispatch:uniform";
    pub const DISPATCH_POLYMORPHIC: &str = "dispatch:polymorphic-unresolved";
    pub const CONSERVATIVE: &str = "unresolved:conservative";
}

/// Classification of one construction site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteVerdict {
    /// Function owning the site
    pub function: String,
    /// Name of the constructed type
    pub ty: String,
    pub outcome: Outcome,
    /// Rules applied, in order; empty when traces are disabled
    pub trace: Vec<&'static str>,
}

/// Outcome of every construction site of a program, ordered by site id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    sites: BTreeMap<SiteId, SiteVerdict>,
}

impl Verdict {
    pub(crate) fn insert(&mut self, site: SiteId, verdict: SiteVerdict) {
        self.sites.insert(site, verdict);
    }

    pub fn get(&self, site: &SiteId) -> Option<&SiteVerdict> {
        self.sites.get(site)
    }

    /// Outcome of a site by its id
    pub fn outcome(&self, site: &str) -> Option<Outcome> {
        self.sites.get(&SiteId::from(site)).map(|v| v.outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SiteId, &SiteVerdict)> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn stack_count(&self) -> usize {
        self.sites.values().filter(|v| v.outcome.is_stack()).count()
    }

    pub fn heap_count(&self) -> usize {
        self.len() - self.stack_count()
    }

    /// Site id → outcome, for comparisons
    pub fn outcomes(&self) -> BTreeMap<String, Outcome> {
        self.sites
            .iter()
            .map(|(id, v)| (id.as_str().to_string(), v.outcome))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Verdict {
    type Item = (&'a SiteId, &'a SiteVerdict);
    type IntoIter = std::collections::btree_map::Iter<'a, SiteId, SiteVerdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}
