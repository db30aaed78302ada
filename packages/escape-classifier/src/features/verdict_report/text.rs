//! Plain text rendering

use crate::features::escape_analysis::Verdict;

use super::render;

pub struct TextRenderer;

impl TextRenderer {
    /// One line per site: `site  outcome  function  trace`
    pub fn render(verdict: &Verdict) -> String {
        let rows = render(verdict);
        let site_width = rows.iter().map(|r| r.site.len()).max().unwrap_or(4).max(4);
        let fn_width = rows.iter().map(|r| r.function.len()).max().unwrap_or(8).max(8);

        let mut out = format!(
            "{:<site_width$}  {:<5}  {:<fn_width$}  trace\n",
            "site", "where", "function"
        );
        for row in &rows {
            out.push_str(&format!(
                "{:<site_width$}  {:<5}  {:<fn_width$}  {}\n",
                row.site,
                row.outcome.as_str(),
                row.function,
                row.trace.join(" > ")
            ));
        }
        out.push_str(&format!(
            "{} sites: {} stack, {} heap\n",
            verdict.len(),
            verdict.stack_count(),
            verdict.heap_count()
        ));
        out
    }

    pub fn print(verdict: &Verdict) {
        print!("{}", Self::render(verdict));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::verdict_report::test_support::mixed_verdict;

    #[test]
    fn test_text_rows() {
        let text = TextRenderer::render(&mixed_verdict());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("site"));
        assert!(lines[1].starts_with("s0"));
        assert!(lines[1].contains("stack"));
        assert!(lines[2].contains("dispatch:polymorphic-unresolved"));
        assert_eq!(lines[4], "3 sites: 1 stack, 2 heap");
    }
}
