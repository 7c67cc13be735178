//! Admission-chance scoring.
//!
//! Blends a student's marks and entrance-test percentage with each program's
//! weights, compares the aggregate against last year's cutoff, and maps the
//! ratio onto a fixed set of bands. The result is never certain either way:
//! percentages stay within 5..=95.

use crate::error::ScoringError;
use crate::model::{Catalog, Institution, Program, ScoringResult, StudentScores};

/// Status used when a minimum requirement is not met.
pub const NOT_ELIGIBLE: &str = "Not Eligible";

/// Lowest percentage the engine reports.
pub const MIN_CHANCE: u8 = 5;
/// Highest percentage the engine reports.
pub const MAX_CHANCE: u8 = 95;

const NOT_ELIGIBLE_COLOR: &str = "#6B7280";

/// One ratio-to-outcome bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Smallest aggregate/cutoff ratio that falls in this band.
    pub min_ratio: f64,
    pub percentage: u8,
    pub status: &'static str,
    pub color: &'static str,
    pub message: &'static str,
}

/// Bands ordered highest ratio first; the first match wins.
pub const BANDS: [Band; 6] = [
    Band {
        min_ratio: 1.15,
        percentage: 90,
        status: "Excellent Chance",
        color: "#10B981",
        message: "Your aggregate is well above last year's cutoff. Apply with confidence.",
    },
    Band {
        min_ratio: 1.05,
        percentage: 75,
        status: "Good Chance",
        color: "#22C55E",
        message: "You are above last year's cutoff. Keep your documents ready and apply early.",
    },
    Band {
        min_ratio: 0.98,
        percentage: 55,
        status: "Moderate Chance",
        color: "#F59E0B",
        message: "You are close to last year's cutoff. Apply, and keep a few backup options.",
    },
    Band {
        min_ratio: 0.92,
        percentage: 35,
        status: "Needs Improvement",
        color: "#F97316",
        message: "You are slightly below last year's cutoff. A better test score would help a lot.",
    },
    Band {
        min_ratio: 0.85,
        percentage: 20,
        status: "Low Chance",
        color: "#EF4444",
        message: "You are below last year's cutoff. Consider programs with lower merit as well.",
    },
    Band {
        min_ratio: f64::NEG_INFINITY,
        percentage: 10,
        status: "Very Low Chance",
        color: "#DC2626",
        message: "You are far below last year's cutoff. Focus on alternative programs or a retake.",
    },
];

/// Find the band for an aggregate/cutoff ratio.
pub fn band_for(ratio: f64) -> &'static Band {
    BANDS
        .iter()
        .find(|band| ratio >= band.min_ratio)
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

/// Bring a program's historical cutoff onto a 0–100 scale.
///
/// Uses the explicit `cutoff_scale` when the catalog provides one. Otherwise
/// a cutoff above 100 is assumed to be recorded on a 200-point scale and is
/// halved. An explicit scale that is not a positive finite number yields NaN,
/// which scoring rejects.
pub fn normalized_cutoff(program: &Program) -> f64 {
    match program.cutoff_scale {
        Some(scale) if scale.is_finite() && scale > 0.0 => {
            program.last_year_cutoff * 100.0 / scale
        }
        Some(_) => f64::NAN,
        None if program.last_year_cutoff > 100.0 => program.last_year_cutoff / 2.0,
        None => program.last_year_cutoff,
    }
}

/// Weighted blend of marks and test percentage for a program.
pub fn aggregate(scores: &StudentScores, program: &Program) -> f64 {
    scores.marks * program.marks_weight / 100.0
        + scores.test_percentage() * program.test_weight / 100.0
}

/// Apply the difficulty shift and clamp to the reportable range.
fn adjust_for_difficulty(percentage: u8, program: &Program) -> u8 {
    let adjusted = i16::from(percentage) + program.difficulty.adjustment();
    adjusted.clamp(i16::from(MIN_CHANCE), i16::from(MAX_CHANCE)) as u8
}

/// Estimate the admission chance of one student for one program.
pub fn score_program(
    scores: &StudentScores,
    institution: &Institution,
    program: &Program,
) -> Result<ScoringResult, ScoringError> {
    scores.validate()?;

    let aggregate = aggregate(scores, program);
    let mut result = ScoringResult {
        institution_id: institution.id.clone(),
        institution_name: institution.name.clone(),
        program_id: program.id.clone(),
        program_name: program.name.clone(),
        aggregate,
        percentage: MIN_CHANCE,
        status: NOT_ELIGIBLE.to_string(),
        color: NOT_ELIGIBLE_COLOR.to_string(),
        recommendations: Vec::new(),
    };

    if scores.marks < program.min_marks {
        result.recommendations.push(format!(
            "Improve your marks by {:.1}% to meet the minimum requirement of {}%",
            program.min_marks - scores.marks,
            program.min_marks
        ));
    }
    if scores.test_score < program.min_test_score {
        result.recommendations.push(format!(
            "Score {:.0} more marks in the entry test to reach the minimum of {}",
            (program.min_test_score - scores.test_score).ceil(),
            program.min_test_score
        ));
    }
    if !result.recommendations.is_empty() {
        tracing::debug!(
            institution = %institution.id,
            program = %program.id,
            "student does not meet minimum requirements"
        );
        return Ok(result);
    }

    let cutoff = normalized_cutoff(program);
    if !(cutoff.is_finite() && cutoff > 0.0) {
        return Err(ScoringError::InvalidCatalog {
            institution: institution.id.clone(),
            program: program.id.clone(),
            reason: match program.cutoff_scale {
                Some(scale) => format!(
                    "cutoff {} on scale {} is not usable",
                    program.last_year_cutoff, scale
                ),
                None => format!("cutoff {} is not positive", program.last_year_cutoff),
            },
        });
    }

    let ratio = aggregate / cutoff;
    let band = band_for(ratio);
    let percentage = adjust_for_difficulty(band.percentage, program);

    tracing::debug!(
        institution = %institution.id,
        program = %program.id,
        aggregate,
        cutoff,
        ratio,
        band = band.status,
        percentage,
        "scored program"
    );

    result.percentage = percentage;
    result.status = band.status.to_string();
    result.color = band.color.to_string();
    result.recommendations.push(band.message.to_string());
    result.recommendations.push(format!(
        "Your aggregate is {aggregate:.2}% against last year's cutoff of {cutoff:.2}%"
    ));
    if program.difficulty == crate::model::Difficulty::VeryHard {
        result
            .recommendations
            .push("This program is highly competitive; keep backup options on your list".into());
    }

    Ok(result)
}

/// Score many programs for the same student, best chance first.
///
/// Programs with unusable catalog data are skipped with a warning; only bad
/// student input fails the batch. Sorting is stable: programs with equal
/// percentages keep their input order.
pub fn score_programs<'a, I>(
    scores: &StudentScores,
    pairs: I,
) -> Result<Vec<ScoringResult>, ScoringError>
where
    I: IntoIterator<Item = (&'a Institution, &'a Program)>,
{
    scores.validate()?;

    let mut results = Vec::new();
    for (institution, program) in pairs {
        match score_program(scores, institution, program) {
            Ok(result) => results.push(result),
            Err(e @ ScoringError::InvalidCatalog { .. }) => {
                tracing::warn!("skipping program: {e}");
            }
            Err(e) => return Err(e),
        }
    }
    results.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    Ok(results)
}

/// Score every program in the catalog, optionally restricted to some
/// institutions. An empty filter scores everything.
pub fn score_catalog(
    scores: &StudentScores,
    catalog: &Catalog,
    institution_ids: &[String],
) -> Result<Vec<ScoringResult>, ScoringError> {
    for id in institution_ids {
        if catalog.institution(id).is_none() {
            tracing::warn!("institution '{id}' not in catalog, ignoring");
        }
    }

    let pairs = catalog
        .pairs()
        .filter(|(inst, _)| institution_ids.is_empty() || institution_ids.contains(&inst.id));
    score_programs(scores, pairs)
}
