//! Verification report generation.

use serde::{Deserialize, Serialize};

use crate::config::HarnessConfig;
use crate::properties::PropertyResult;
use crate::structured_log::now_utc;

/// Summary of a `harness verify` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub run_id: String,
    pub generated_utc: String,
    pub seed: String,
    pub trials: u32,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<PropertyResult>,
}

impl VerificationReport {
    #[must_use]
    pub fn new(
        run_id: impl Into<String>,
        config: &HarnessConfig,
        results: Vec<PropertyResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        Self {
            run_id: run_id.into(),
            generated_utc: now_utc(),
            seed: format!("{:#x}", config.seed),
            trials: config.trials,
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render as a markdown table.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# fortify-shim verification\n\n");
        out.push_str(&format!(
            "- run: `{}`\n- generated: {}\n- seed: `{}`\n- trials: {}\n- passed: {}/{}\n\n",
            self.run_id, self.generated_utc, self.seed, self.trials, self.passed, self.total
        ));
        out.push_str("| Property | Symbol | Outcome | Cases | ms | Detail |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for r in &self.results {
            let outcome = if r.passed() { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | `{}` | {} | {} | {} | {} |\n",
                r.property.id(),
                r.property.symbol(),
                outcome,
                r.cases,
                r.duration_ms,
                r.detail.replace('|', "\\|"),
            ));
        }
        out
    }
}
