//! Core data model types for meritscope.
//!
//! These are the reference records (institutions, programs, quiz questions,
//! career profiles) and the result types the scoring engine produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoringError;

/// Qualitative competitiveness tier of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    /// Points added to (or removed from) a banded percentage.
    pub fn adjustment(self) -> i16 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 0,
            Difficulty::Hard => -5,
            Difficulty::VeryHard => -15,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::VeryHard => write!(f, "Very Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "moderate" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "veryhard" => Ok(Difficulty::VeryHard),
            _ => Err(format!("unknown difficulty: {s}")),
        }
    }
}

/// A degree program offered by an institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Identifier, unique within its institution.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Abbreviated name (e.g. "BSCS").
    #[serde(default)]
    pub short_name: String,
    /// Minimum academic marks percentage.
    pub min_marks: f64,
    /// Minimum raw entrance-test score.
    pub min_test_score: f64,
    /// Share of the aggregate taken from marks (0–100).
    pub marks_weight: f64,
    /// Share of the aggregate taken from the test percentage (0–100).
    pub test_weight: f64,
    /// Closing aggregate of the previous admission cycle.
    pub last_year_cutoff: f64,
    /// Scale the cutoff was recorded on, when it is not a percentage.
    #[serde(default)]
    pub cutoff_scale: Option<f64>,
    /// Number of seats offered.
    #[serde(default)]
    pub seats: u32,
    pub difficulty: Difficulty,
}

/// A university or college with its ordered program list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    /// Accent color, presentation only.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub programs: Vec<Program>,
}

impl Institution {
    /// Look up a program by its identifier.
    pub fn program(&self, id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == id)
    }
}

/// The full, read-only institution catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub institutions: Vec<Institution>,
}

impl Catalog {
    pub fn institution(&self, id: &str) -> Option<&Institution> {
        self.institutions.iter().find(|i| i.id == id)
    }

    /// Resolve a program by its composite key.
    pub fn program(
        &self,
        institution_id: &str,
        program_id: &str,
    ) -> Result<(&Institution, &Program), ScoringError> {
        self.institution(institution_id)
            .and_then(|inst| inst.program(program_id).map(|prog| (inst, prog)))
            .ok_or_else(|| ScoringError::UnknownProgram {
                institution: institution_id.to_string(),
                program: program_id.to_string(),
            })
    }

    /// Every (institution, program) pair in catalog order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Institution, &Program)> {
        self.institutions
            .iter()
            .flat_map(|inst| inst.programs.iter().map(move |prog| (inst, prog)))
    }

    pub fn program_count(&self) -> usize {
        self.institutions.iter().map(|i| i.programs.len()).sum()
    }
}

/// A student's raw numbers for the admission-chance flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentScores {
    /// Academic marks percentage.
    pub marks: f64,
    /// Raw entrance-test score.
    pub test_score: f64,
    /// Maximum possible entrance-test score.
    pub test_max: f64,
}

impl StudentScores {
    /// Build validated scores.
    pub fn new(marks: f64, test_score: f64, test_max: f64) -> Result<Self, ScoringError> {
        let scores = Self {
            marks,
            test_score,
            test_max,
        };
        scores.validate()?;
        Ok(scores)
    }

    /// Parse scores from free-text fields.
    pub fn parse(marks: &str, test_score: &str, test_max: &str) -> Result<Self, ScoringError> {
        Self::new(
            parse_number("marks", marks)?,
            parse_number("test_score", test_score)?,
            parse_number("test_max", test_max)?,
        )
    }

    /// Reject values the engine cannot score.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (field, value) in [
            ("marks", self.marks),
            ("test_score", self.test_score),
            ("test_max", self.test_max),
        ] {
            if !value.is_finite() {
                return Err(ScoringError::invalid(field, "not a finite number"));
            }
        }
        if self.test_max <= 0.0 {
            return Err(ScoringError::invalid(
                "test_max",
                format!("must be greater than zero, got {}", self.test_max),
            ));
        }
        Ok(())
    }

    /// Entrance-test score as a percentage of the maximum.
    pub fn test_percentage(&self) -> f64 {
        self.test_score / self.test_max * 100.0
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ScoringError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScoringError::invalid(field, "value is empty"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| ScoringError::invalid(field, format!("'{trimmed}' is not a number")))
}

/// Outcome of scoring one program for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub institution_id: String,
    pub institution_name: String,
    pub program_id: String,
    pub program_name: String,
    /// Weighted blend of marks and test percentage.
    pub aggregate: f64,
    /// Estimated admission chance, always within 5..=95.
    pub percentage: u8,
    pub status: String,
    pub color: String,
    /// Advice, most important first.
    pub recommendations: Vec<String>,
}

impl ScoringResult {
    pub fn is_eligible(&self) -> bool {
        self.status != crate::admission::NOT_ELIGIBLE
    }
}

/// A single quiz answer choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    /// Career identifiers this answer counts towards.
    #[serde(default)]
    pub careers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub text: String,
    pub options: Vec<QuizOption>,
}

/// Job-market outlook of a career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outlook {
    Excellent,
    Good,
    Moderate,
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outlook::Excellent => write!(f, "Excellent"),
            Outlook::Good => write!(f, "Good"),
            Outlook::Moderate => write!(f, "Moderate"),
        }
    }
}

impl FromStr for Outlook {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excellent" | "high" => Ok(Outlook::Excellent),
            "good" | "growing" => Ok(Outlook::Good),
            "moderate" | "stable" => Ok(Outlook::Moderate),
            _ => Err(format!("unknown outlook: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerProfile {
    pub id: String,
    pub name: String,
    /// Entrance exam usually required (e.g. "MDCAT").
    #[serde(default)]
    pub entrance_exam: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub duration: String,
    /// Representative institutions for this career.
    #[serde(default)]
    pub institutions: Vec<String>,
    pub outlook: Outlook,
}

/// The quiz questions and the career lookup table they refer to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizBank {
    pub questions: Vec<QuizQuestion>,
    pub careers: Vec<CareerProfile>,
}

impl QuizBank {
    pub fn career_profile(&self, id: &str) -> Option<&CareerProfile> {
        self.careers.iter().find(|c| c.id == id)
    }

    /// Display name of a career, falling back to the raw identifier.
    pub fn career_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.career_profile(id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }
}

/// One ranked career recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub career_id: String,
    pub name: String,
    /// Number of selected answers that pointed at this career.
    pub score: u32,
    /// Match relative to the top career (top is always 100).
    pub percentage: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub matches: Vec<CareerMatch>,
}

impl QuizResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn top(&self) -> Option<&CareerMatch> {
        self.matches.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(id: &str) -> Program {
        Program {
            id: id.into(),
            name: id.to_uppercase(),
            short_name: String::new(),
            min_marks: 60.0,
            min_test_score: 50.0,
            marks_weight: 50.0,
            test_weight: 50.0,
            last_year_cutoff: 80.0,
            cutoff_scale: None,
            seats: 100,
            difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::VeryHard.to_string(), "Very Hard");
        assert_eq!("very hard".parse::<Difficulty>().unwrap(), Difficulty::VeryHard);
        assert_eq!("VeryHard".parse::<Difficulty>().unwrap(), Difficulty::VeryHard);
        assert_eq!("very_hard".parse::<Difficulty>().unwrap(), Difficulty::VeryHard);
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn outlook_parse() {
        assert_eq!("Excellent".parse::<Outlook>().unwrap(), Outlook::Excellent);
        assert_eq!("growing".parse::<Outlook>().unwrap(), Outlook::Good);
        assert!("bleak".parse::<Outlook>().is_err());
    }

    #[test]
    fn scores_reject_non_positive_test_max() {
        let err = StudentScores::new(80.0, 100.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::InvalidInput {
                field: "test_max",
                ..
            }
        ));
        assert!(StudentScores::new(80.0, 100.0, -5.0).is_err());
    }

    #[test]
    fn scores_reject_nan_and_infinity() {
        assert!(StudentScores::new(f64::NAN, 100.0, 200.0).is_err());
        assert!(StudentScores::new(80.0, f64::INFINITY, 200.0).is_err());
    }

    #[test]
    fn scores_parse_text() {
        let scores = StudentScores::parse(" 85.5 ", "150", "200").unwrap();
        assert_eq!(scores.marks, 85.5);
        assert!((scores.test_percentage() - 75.0).abs() < 1e-9);

        let err = StudentScores::parse("eighty", "150", "200").unwrap_err();
        assert!(err.to_string().contains("marks"));
        assert!(StudentScores::parse("", "150", "200").is_err());
        assert!(StudentScores::parse("80", "150", "NaN").is_err());
    }

    #[test]
    fn catalog_composite_key_lookup() {
        let catalog = Catalog {
            institutions: vec![
                Institution {
                    id: "nust".into(),
                    name: "NUST".into(),
                    short_name: String::new(),
                    color: String::new(),
                    city: None,
                    programs: vec![program("bscs"), program("bsee")],
                },
                Institution {
                    id: "comsats".into(),
                    name: "COMSATS".into(),
                    short_name: String::new(),
                    color: String::new(),
                    city: None,
                    programs: vec![program("bscs")],
                },
            ],
        };

        let (inst, prog) = catalog.program("comsats", "bscs").unwrap();
        assert_eq!(inst.id, "comsats");
        assert_eq!(prog.id, "bscs");
        assert_eq!(catalog.program_count(), 3);
        assert_eq!(catalog.pairs().count(), 3);
        assert!(matches!(
            catalog.program("comsats", "bsee"),
            Err(ScoringError::UnknownProgram { .. })
        ));
    }

    #[test]
    fn career_name_falls_back_to_id() {
        let bank = QuizBank {
            questions: vec![],
            careers: vec![CareerProfile {
                id: "medicine".into(),
                name: "Doctor (MBBS)".into(),
                entrance_exam: "MDCAT".into(),
                salary_range: String::new(),
                degree: String::new(),
                duration: String::new(),
                institutions: vec![],
                outlook: Outlook::Excellent,
            }],
        };
        assert_eq!(bank.career_name("medicine"), "Doctor (MBBS)");
        assert_eq!(bank.career_name("astronaut"), "astronaut");
    }
}
