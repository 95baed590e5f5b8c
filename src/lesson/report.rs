//! Assembly diagnostics
//!
//! Aggregated counters for every lossy fallback absorbed across the
//! pipeline. None of these are errors; they exist so callers can see
//! how much repair a lesson needed.

use super::assemble::AssembleReport;
use super::pool::PoolReport;
use serde::{Deserialize, Serialize};

/// Counters from one full compose run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub pool: PoolReport,
    pub assemble: AssembleReport,
}

impl AssemblyReport {
    pub fn new(pool: PoolReport, assemble: AssembleReport) -> Self {
        Self { pool, assemble }
    }

    /// Whether any lossy fallback fired at all.
    pub fn is_clean(&self) -> bool {
        self == &Self::default()
    }

    /// Format as display string
    pub fn format_display(&self) -> String {
        let mut output = String::new();
        output.push_str("Assembly report:\n");
        output.push_str(&format!(
            "├── Dropped candidates:   {:>4}\n",
            self.pool.dropped
        ));
        output.push_str(&format!(
            "├── Truncated fields:     {:>4}\n",
            self.pool.truncated
        ));
        output.push_str(&format!(
            "├── Padded fields:        {:>4}\n",
            self.pool.padded
        ));
        output.push_str(&format!(
            "├── Defaulted fields:     {:>4}\n",
            self.pool.defaulted
        ));
        output.push_str(&format!(
            "├── Author rewrites:      {:>4}\n",
            self.pool.author_rewrites
        ));
        output.push_str(&format!(
            "├── Synthesized defaults: {:>4}\n",
            self.pool.synthesized
        ));
        output.push_str(&format!(
            "├── Skipped slots:        {:>4}\n",
            self.assemble.skipped_slots
        ));
        output.push_str(&format!(
            "├── Capped quote tokens:  {:>4}\n",
            self.assemble.capped_quotes
        ));
        output.push_str(&format!(
            "└── Backfilled items:     {:>4}\n",
            self.assemble.backfilled
        ));
        output
    }
}
