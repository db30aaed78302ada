//! JSON rendering

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::features::escape_analysis::Verdict;

use super::VerdictReport;

pub struct JsonRenderer;

impl JsonRenderer {
    pub fn render(verdict: &Verdict) -> Result<String> {
        Ok(serde_json::to_string_pretty(&VerdictReport::from_verdict(verdict))?)
    }

    /// Write `verdict.json` into `output_dir`
    pub fn save(verdict: &Verdict, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join("verdict.json");
        std::fs::write(&path, Self::render(verdict)?)?;
        Ok(path)
    }
}
