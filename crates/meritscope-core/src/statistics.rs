//! Aggregate statistics over a batch of admission-chance results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ScoringResult;

/// Summary of one batch of scored programs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChanceSummary {
    /// Number of programs scored.
    pub total: usize,
    /// Programs whose minimum requirements the student meets.
    pub eligible: usize,
    /// Number of programs per status label.
    pub per_status: BTreeMap<String, usize>,
    /// Mean percentage over eligible programs.
    pub avg_eligible_chance: f64,
    /// Best result as (institution id, program id, percentage).
    pub best: Option<BestChance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestChance {
    pub institution_id: String,
    pub program_id: String,
    pub percentage: u8,
}

/// Summarize a batch of results. The first result with the highest
/// percentage is reported as the best.
pub fn summarize(results: &[ScoringResult]) -> ChanceSummary {
    let mut per_status: BTreeMap<String, usize> = BTreeMap::new();
    for r in results {
        *per_status.entry(r.status.clone()).or_default() += 1;
    }

    let eligible: Vec<&ScoringResult> = results.iter().filter(|r| r.is_eligible()).collect();
    let avg_eligible_chance = if eligible.is_empty() {
        0.0
    } else {
        eligible.iter().map(|r| f64::from(r.percentage)).sum::<f64>() / eligible.len() as f64
    };

    let best = results
        .iter()
        .fold(None::<&ScoringResult>, |best, r| match best {
            Some(b) if b.percentage >= r.percentage => Some(b),
            _ => Some(r),
        })
        .map(|r| BestChance {
            institution_id: r.institution_id.clone(),
            program_id: r.program_id.clone(),
            percentage: r.percentage,
        });

    ChanceSummary {
        total: results.len(),
        eligible: eligible.len(),
        per_status,
        avg_eligible_chance,
        best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::NOT_ELIGIBLE;

    fn result(program: &str, percentage: u8, status: &str) -> ScoringResult {
        ScoringResult {
            institution_id: "nust".into(),
            institution_name: "NUST".into(),
            program_id: program.into(),
            program_name: program.into(),
            aggregate: 0.0,
            percentage,
            status: status.into(),
            color: String::new(),
            recommendations: vec![],
        }
    }

    #[test]
    fn summary_counts_statuses() {
        let results = vec![
            result("a", 75, "Good Chance"),
            result("b", 90, "Excellent Chance"),
            result("c", 5, NOT_ELIGIBLE),
            result("d", 90, "Excellent Chance"),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.eligible, 3);
        assert_eq!(summary.per_status["Excellent Chance"], 2);
        assert_eq!(summary.per_status[NOT_ELIGIBLE], 1);
        assert!((summary.avg_eligible_chance - 85.0).abs() < 1e-9);
        // first of the tied best wins
        assert_eq!(summary.best.unwrap().program_id, "b");
    }

    #[test]
    fn empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_eligible_chance, 0.0);
        assert!(summary.best.is_none());
    }
}
