//! Markdown rendering

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::features::escape_analysis::Verdict;

use super::render;

pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn render(verdict: &Verdict) -> String {
        format!(
            r#"# Escape Verdict

**Sites**: {} ({} stack, {} heap)

| Site | Outcome | Function | Trace |
|------|---------|----------|-------|
{}
"#,
            verdict.len(),
            verdict.stack_count(),
            verdict.heap_count(),
            render(verdict)
                .iter()
                .map(|row| {
                    format!(
                        "| `{}` | {} | `{}` | {} |",
                        row.site,
                        row.outcome,
                        row.function,
                        row.trace
                            .iter()
                            .map(|r| format!("`{}`", r))
                            .collect::<Vec<_>>()
                            .join(" → ")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        )
    }

    /// Write `verdict.md` into `output_dir`
    pub fn save(verdict: &Verdict, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join("verdict.md");
        std::fs::write(&path, Self::render(verdict))?;
        Ok(path)
    }
}
