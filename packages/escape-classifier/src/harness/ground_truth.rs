//! Ground-truth validation
//!
//! Compares a verdict against the expected outcome of each site.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::features::escape_analysis::{Outcome, Verdict};

/// Validation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationStatus {
    Pass,
    Fail,
    /// Classified, but no expectation recorded
    Skip,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Pass => write!(f, "PASS"),
            ValidationStatus::Fail => write!(f, "FAIL"),
            ValidationStatus::Skip => write!(f, "SKIP"),
        }
    }
}

/// Check of one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCheck {
    pub site: String,
    pub expected: Option<Outcome>,
    /// `None` when the site was not classified at all
    pub actual: Option<Outcome>,
    pub status: ValidationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<SiteCheck>,
}

impl ValidationReport {
    pub fn count(&self, status: ValidationStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    pub fn passed(&self) -> usize {
        self.count(ValidationStatus::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(ValidationStatus::Fail)
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &SiteCheck> {
        self.checks
            .iter()
            .filter(|c| c.status == ValidationStatus::Fail)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "{} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.count(ValidationStatus::Skip)
        )];
        for check in self.failures() {
            lines.push(format!(
                "{}: expected {}, got {}",
                check.site,
                check.expected.map_or("-", |o| o.as_str()),
                check.actual.map_or("unclassified", |o| o.as_str())
            ));
        }
        lines.join("\n")
    }
}

/// Compare `verdict` with `expectations` (site id → outcome), sorted by site id
pub fn validate(verdict: &Verdict, expectations: &BTreeMap<String, Outcome>) -> ValidationReport {
    let actual = verdict.outcomes();
    let mut sites: Vec<&String> = actual.keys().chain(expectations.keys()).collect();
    sites.sort();
    sites.dedup();

    let checks = sites
        .into_iter()
        .map(|site| {
            let expected = expectations.get(site).copied();
            let actual = actual.get(site).copied();
            let status = match (expected, actual) {
                (None, _) => ValidationStatus::Skip,
                (Some(e), Some(a)) if e == a => ValidationStatus::Pass,
                _ => ValidationStatus::Fail,
            };
            SiteCheck {
                site: site.clone(),
                expected,
                actual,
                status,
            }
        })
        .collect();

    ValidationReport { checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::verdict_report::test_support::mixed_verdict;
    use pretty_assertions::assert_eq;

    fn expect(pairs: &[(&str, Outcome)]) -> BTreeMap<String, Outcome> {
        pairs.iter().map(|(s, o)| (s.to_string(), *o)).collect()
    }

    #[test]
    fn test_all_pass() {
        let report = validate(
            &mixed_verdict(),
            &expect(&[("s0", Outcome::Stack), ("s1", Outcome::Heap), ("s2", Outcome::Heap)]),
        );
        assert!(report.all_passed());
        assert_eq!(report.passed(), 3);
        assert_eq!(report.summary(), "3 passed, 0 failed, 0 skipped");
    }

    #[test]
    fn test_mismatch_missing_and_skipped() {
        let report = validate(
            &mixed_verdict(),
            &expect(&[("s0", Outcome::Heap), ("s9", Outcome::Stack), ("s1", Outcome::Heap)]),
        );
        assert!(!report.all_passed());
        let statuses: Vec<_> = report.checks.iter().map(|c| (c.site.as_str(), c.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("s0", ValidationStatus::Fail),
                ("s1", ValidationStatus::Pass),
                ("s2", ValidationStatus::Skip),
                ("s9", ValidationStatus::Fail),
            ]
        );
        assert_eq!(
            report.summary(),
            "1 passed, 2 failed, 1 skipped\ns0: expected heap, got stack\ns9: expected stack, got unclassified"
        );
    }
}
