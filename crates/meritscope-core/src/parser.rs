//! TOML reference-data parser.
//!
//! Loads the institution catalog, the quiz bank, and the alias table from TOML
//! files, and validates them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::admission::normalized_cutoff;
use crate::alias::{AliasEntry, AliasTable};
use crate::model::{
    CareerProfile, Catalog, Difficulty, Institution, Outlook, Program, QuizBank, QuizOption,
    QuizQuestion,
};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    institutions: Vec<TomlInstitution>,
}

#[derive(Debug, Deserialize)]
struct TomlInstitution {
    id: String,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    color: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    programs: Vec<TomlProgram>,
}

#[derive(Debug, Deserialize)]
struct TomlProgram {
    id: String,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    min_marks: f64,
    min_test_score: f64,
    marks_weight: f64,
    #[serde(default)]
    test_weight: Option<f64>,
    last_year_cutoff: f64,
    #[serde(default)]
    cutoff_scale: Option<f64>,
    #[serde(default)]
    seats: u32,
    #[serde(default = "default_difficulty")]
    difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let institutions = parsed
        .institutions
        .into_iter()
        .map(convert_institution)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid catalog: {}", source_path.display()))?;

    Ok(Catalog { institutions })
}

fn convert_institution(inst: TomlInstitution) -> Result<Institution> {
    let mut seen = HashSet::new();
    let mut programs = Vec::with_capacity(inst.programs.len());

    for p in inst.programs {
        if !seen.insert(p.id.clone()) {
            anyhow::bail!("duplicate program id '{}' in institution '{}'", p.id, inst.id);
        }

        let difficulty: Difficulty = p
            .difficulty
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{}/{}: {}", inst.id, p.id, e))?;

        // test weight defaults to the complement of the marks weight
        let test_weight = p.test_weight.unwrap_or(100.0 - p.marks_weight);
        anyhow::ensure!(
            (p.marks_weight + test_weight - 100.0).abs() < 1e-6,
            "{}/{}: marks_weight ({}) and test_weight ({}) must add up to 100",
            inst.id,
            p.id,
            p.marks_weight,
            test_weight
        );
        anyhow::ensure!(
            (0.0..=100.0).contains(&p.marks_weight),
            "{}/{}: marks_weight must be between 0 and 100",
            inst.id,
            p.id
        );
        if let Some(scale) = p.cutoff_scale {
            anyhow::ensure!(
                scale.is_finite() && scale > 0.0,
                "{}/{}: cutoff_scale must be greater than zero, got {}",
                inst.id,
                p.id,
                scale
            );
        }

        programs.push(Program {
            short_name: p.short_name.unwrap_or_else(|| p.id.to_uppercase()),
            id: p.id,
            name: p.name,
            min_marks: p.min_marks,
            min_test_score: p.min_test_score,
            marks_weight: p.marks_weight,
            test_weight,
            last_year_cutoff: p.last_year_cutoff,
            cutoff_scale: p.cutoff_scale,
            seats: p.seats,
            difficulty,
        });
    }

    Ok(Institution {
        short_name: inst.short_name.unwrap_or_else(|| inst.id.to_uppercase()),
        id: inst.id,
        name: inst.name,
        color: inst.color,
        city: inst.city,
        programs,
    })
}

/// Load every `.toml` catalog file in a directory (recursively) into one catalog.
///
/// Files that fail to parse are skipped with a warning. Files are read in
/// name order so the merged catalog order is stable.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut catalog = Catalog::default();
    for path in paths {
        if path.is_dir() {
            catalog
                .institutions
                .extend(load_catalog_directory(&path)?.institutions);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(part) => catalog.institutions.extend(part.institutions),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalog)
}

/// Load a catalog from a file or a directory of files.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

// ---------------------------------------------------------------------------
// Quiz bank
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    careers: Vec<TomlCareer>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    category: String,
    text: String,
    #[serde(default)]
    options: Vec<QuizOption>,
}

#[derive(Debug, Deserialize)]
struct TomlCareer {
    id: String,
    name: String,
    #[serde(default)]
    entrance_exam: String,
    #[serde(default)]
    salary_range: String,
    #[serde(default)]
    degree: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    institutions: Vec<String>,
    #[serde(default = "default_outlook")]
    outlook: String,
}

fn default_outlook() -> String {
    "good".to_string()
}

pub fn parse_quiz_bank(path: &Path) -> Result<QuizBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz bank: {}", path.display()))?;

    parse_quiz_bank_str(&content, path)
}

pub fn parse_quiz_bank_str(content: &str, source_path: &Path) -> Result<QuizBank> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let careers = parsed
        .careers
        .into_iter()
        .map(|c| {
            let outlook: Outlook = c
                .outlook
                .parse()
                .map_err(|e: String| anyhow::anyhow!("career {}: {}", c.id, e))?;
            Ok(CareerProfile {
                id: c.id,
                name: c.name,
                entrance_exam: c.entrance_exam,
                salary_range: c.salary_range,
                degree: c.degree,
                duration: c.duration,
                institutions: c.institutions,
                outlook,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| QuizQuestion {
            id: q.id,
            category: q.category,
            text: q.text,
            options: q.options,
        })
        .collect();

    Ok(QuizBank { questions, careers })
}

// ---------------------------------------------------------------------------
// Alias table
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TomlAliasFile {
    #[serde(default)]
    institutions: Vec<AliasEntry>,
    #[serde(default)]
    legacy: BTreeMap<String, String>,
}

pub fn parse_alias_table(path: &Path) -> Result<AliasTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read alias table: {}", path.display()))?;

    parse_alias_table_str(&content, path)
}

pub fn parse_alias_table_str(content: &str, source_path: &Path) -> Result<AliasTable> {
    let parsed: TomlAliasFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(AliasTable::new(
        parsed.institutions,
        parsed.legacy.into_iter().collect(),
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning from reference-data validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The record the warning is about (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for common data issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for inst in &catalog.institutions {
        if !seen_ids.insert(&inst.id) {
            warnings.push(ValidationWarning::new(
                &inst.id,
                format!("duplicate institution ID: {}", inst.id),
            ));
        }
        if inst.programs.is_empty() {
            warnings.push(ValidationWarning::new(&inst.id, "institution has no programs"));
        }
    }

    for (inst, prog) in catalog.pairs() {
        let subject = format!("{}/{}", inst.id, prog.id);
        if prog.last_year_cutoff <= 0.0 {
            warnings.push(ValidationWarning::new(
                &subject,
                "last_year_cutoff must be positive; program cannot be scored",
            ));
        } else if let Some(scale) = prog.cutoff_scale.filter(|s| !(s.is_finite() && *s > 0.0)) {
            warnings.push(ValidationWarning::new(
                &subject,
                format!("cutoff_scale {scale} is not positive; program cannot be scored"),
            ));
        } else if prog.cutoff_scale.is_none() && prog.last_year_cutoff > 100.0 {
            warnings.push(ValidationWarning::new(
                &subject,
                format!(
                    "cutoff {} has no cutoff_scale; assuming a 200-point scale ({:.2}%)",
                    prog.last_year_cutoff,
                    normalized_cutoff(prog)
                ),
            ));
        }
        if prog.min_marks > 100.0 {
            warnings.push(ValidationWarning::new(
                &subject,
                format!("min_marks {} is above 100%", prog.min_marks),
            ));
        }
    }

    warnings
}

/// Validate a quiz bank for common data issues.
pub fn validate_quiz_bank(bank: &QuizBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::new(
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
        if question.options.is_empty() {
            warnings.push(ValidationWarning::new(&question.id, "question has no options"));
        }
        for (idx, option) in question.options.iter().enumerate() {
            if option.careers.is_empty() {
                warnings.push(ValidationWarning::new(
                    &question.id,
                    format!("option {idx} does not point at any career"),
                ));
            }
            for career in &option.careers {
                if bank.career_profile(career).is_none() {
                    warnings.push(ValidationWarning::new(
                        &question.id,
                        format!("option {idx} references unknown career '{career}'"),
                    ));
                }
            }
        }
    }

    warnings
}

/// Validate an alias table against the catalog it resolves into.
pub fn validate_aliases(table: &AliasTable, catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for entry in &table.entries {
        if catalog.institution(&entry.id).is_none() {
            warnings.push(ValidationWarning::new(
                &entry.id,
                "aliases defined for an institution missing from the catalog",
            ));
        }
        if entry.aliases.iter().any(|a| a.trim().is_empty()) {
            warnings.push(ValidationWarning::new(&entry.id, "blank alias"));
        }
    }

    for (legacy, canonical) in &table.legacy {
        if catalog.institution(canonical).is_none() {
            warnings.push(ValidationWarning::new(
                legacy,
                format!("legacy id maps to unknown institution '{canonical}'"),
            ));
        }
    }

    warnings
}
