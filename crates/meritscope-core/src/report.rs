//! Admission-chance reports with JSON persistence and run comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{ScoringResult, StudentScores};
use crate::statistics::{summarize, ChanceSummary};

/// A saved batch of admission-chance results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChanceReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The inputs the results were computed from.
    pub scores: StudentScores,
    /// Results, best chance first.
    pub results: Vec<ScoringResult>,
    pub summary: ChanceSummary,
}

impl ChanceReport {
    pub fn new(scores: StudentScores, results: Vec<ScoringResult>) -> Self {
        let summary = summarize(&results);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            scores,
            results,
            summary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ChanceReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline, program by program.
    ///
    /// Changes of at most `threshold` percentage points count as unchanged.
    pub fn compare(&self, baseline: &ChanceReport, threshold: u8) -> ComparisonReport {
        let key = |r: &ScoringResult| (r.institution_id.clone(), r.program_id.clone());
        let baseline_map: HashMap<(String, String), &ScoringResult> =
            baseline.results.iter().map(|r| (key(r), r)).collect();

        let mut improvements = Vec::new();
        let mut declines = Vec::new();
        let mut unchanged = 0usize;
        let mut new_programs = 0usize;

        for current in &self.results {
            let Some(previous) = baseline_map.get(&key(current)) else {
                new_programs += 1;
                continue;
            };
            let delta = i16::from(current.percentage) - i16::from(previous.percentage);
            let change = ChanceChange {
                institution_id: current.institution_id.clone(),
                program_id: current.program_id.clone(),
                baseline_percentage: previous.percentage,
                current_percentage: current.percentage,
                baseline_status: previous.status.clone(),
                current_status: current.status.clone(),
                delta,
            };
            if delta > i16::from(threshold) {
                improvements.push(change);
            } else if delta < -i16::from(threshold) {
                declines.push(change);
            } else {
                unchanged += 1;
            }
        }

        let current_keys: Vec<(String, String)> = self.results.iter().map(key).collect();
        let removed_programs = baseline_map
            .keys()
            .filter(|k| !current_keys.contains(*k))
            .count();

        ComparisonReport {
            improvements,
            declines,
            unchanged,
            new_programs,
            removed_programs,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Programs where the chance went up.
    pub improvements: Vec<ChanceChange>,
    /// Programs where the chance went down.
    pub declines: Vec<ChanceChange>,
    /// Programs with no significant change.
    pub unchanged: usize,
    /// Programs in current but not baseline.
    pub new_programs: usize,
    /// Programs in baseline but not current.
    pub removed_programs: usize,
}

/// A per-program change between two runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChanceChange {
    pub institution_id: String,
    pub program_id: String,
    pub baseline_percentage: u8,
    pub current_percentage: u8,
    pub baseline_status: String,
    pub current_status: String,
    /// Percentage-point change, current minus baseline.
    pub delta: i16,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} improvements, {} declines, {} unchanged\n\n",
            self.improvements.len(),
            self.declines.len(),
            self.unchanged
        ));

        let mut table = |title: &str, rows: &[ChanceChange]| {
            if rows.is_empty() {
                return;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Institution | Program | Baseline | Current | Delta |\n");
            md.push_str("|-------------|---------|----------|---------|-------|\n");
            for c in rows {
                md.push_str(&format!(
                    "| {} | {} | {}% ({}) | {}% ({}) | {:+} |\n",
                    c.institution_id,
                    c.program_id,
                    c.baseline_percentage,
                    c.baseline_status,
                    c.current_percentage,
                    c.current_status,
                    c.delta
                ));
            }
            md.push('\n');
        };

        table("Improvements", &self.improvements);
        table("Declines", &self.declines);

        md
    }

    /// Returns true if any program's chance went down.
    pub fn has_declines(&self) -> bool {
        !self.declines.is_empty()
    }
}
