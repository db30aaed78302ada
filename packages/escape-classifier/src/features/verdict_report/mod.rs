//! Verdict Reporter
//!
//! Flattens a verdict into rendered rows sorted by site id, and renders them
//! as plain text, JSON or Markdown.

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use text::TextRenderer;

use serde::{Deserialize, Serialize};

use crate::features::escape_analysis::{Outcome, Verdict};

/// One row of a rendered verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSite {
    pub site: String,
    pub function: String,
    pub outcome: Outcome,
    pub trace: Vec<String>,
}

/// Rendered verdict with totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictReport {
    pub sites: Vec<RenderedSite>,
    pub stack: usize,
    pub heap: usize,
}

impl VerdictReport {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        Self {
            sites: render(verdict),
            stack: verdict.stack_count(),
            heap: verdict.heap_count(),
        }
    }
}

/// Rows sorted by site id
pub fn render(verdict: &Verdict) -> Vec<RenderedSite> {
    verdict
        .iter()
        .map(|(site, v)| RenderedSite {
            site: site.as_str().to_string(),
            function: v.function.clone(),
            outcome: v.outcome,
            trace: v.trace.iter().map(|r| r.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::features::escape_analysis::{classify, Verdict};
    use crate::features::program_graph::{Discriminator, FunctionBuilder, Program, ReturnKind};
    use crate::features::type_catalog::TypeCatalog;

    /// `returnResult` (s0 by value) and a polymorphic `New` (s1, s2)
    pub fn mixed_verdict() -> Verdict {
        let mut catalog = TypeCatalog::new();
        let result = catalog.register_type("result").unwrap().id();
        let v1 = catalog.register_type("readerV1").unwrap().id();
        let v2 = catalog.register_type("readerV2").unwrap().id();
        let reader = catalog.register_interface("io.Reader", &[v1, v2]).unwrap().id();

        let mut value = FunctionBuilder::new(&catalog, "returnResult", ReturnKind::Value(result)).unwrap();
        let s0 = value.construct_value("s0", result).unwrap();
        value.return_value(&s0).unwrap();

        let mut new = FunctionBuilder::new(&catalog, "New", ReturnKind::Interface(reader)).unwrap();
        new.dispatch(Discriminator::unresolved("vers"), |d| {
            d.value_branch("v1", |b| {
                let s = b.construct_pointer("s1", v1)?;
                b.return_via_interface(&s, reader)
            })?;
            d.default_branch(|b| {
                let s = b.construct_pointer("s2", v2)?;
                b.return_via_interface(&s, reader)
            })
        })
        .unwrap();

        let mut program = Program::builder();
        program.add(value.build().unwrap()).unwrap();
        program.add(new.build().unwrap()).unwrap();
        classify(&catalog, &program.build()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_sorted_by_site() {
        let rows = render(&test_support::mixed_verdict());
        let sites: Vec<_> = rows.iter().map(|r| r.site.as_str()).collect();
        assert_eq!(sites, vec!["s0", "s1", "s2"]);
        assert_eq!(rows[0].outcome, Outcome::Stack);
        assert_eq!(rows[0].trace, vec!["value-return:copied".to_string()]);
        assert_eq!(rows[2].function, "New");
    }

    #[test]
    fn test_report_totals() {
        let report = VerdictReport::from_verdict(&test_support::mixed_verdict());
        assert_eq!(report.stack, 1);
        assert_eq!(report.heap, 2);
    }
}
