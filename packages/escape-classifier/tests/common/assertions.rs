//! Custom assertions for verdicts

use escape_classifier::{Outcome, SiteId, Verdict};

/// Assert the exact site → outcome map of a verdict
pub fn assert_outcomes(verdict: &Verdict, expected: &[(&str, Outcome)]) {
    let expected: std::collections::BTreeMap<String, Outcome> = expected
        .iter()
        .map(|(site, outcome)| (site.to_string(), *outcome))
        .collect();
    pretty_assertions::assert_eq!(verdict.outcomes(), expected);
}

/// Assert the trace of one site
pub fn assert_trace(verdict: &Verdict, site: &str, expected: &[&str]) {
    let actual = &verdict
        .get(&SiteId::from(site))
        .unwrap_or_else(|| panic!("site '{site}' was not classified"))
        .trace;
    pretty_assertions::assert_eq!(actual.as_slice(), expected, "trace of '{site}'");
}
