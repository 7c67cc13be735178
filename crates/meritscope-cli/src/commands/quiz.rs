//! The `meritscope quiz` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use meritscope_core::config::load_config_from;
use meritscope_core::model::QuizBank;
use meritscope_core::parser::parse_quiz_bank;
use meritscope_core::score_careers;

pub fn execute(
    answers: Option<String>,
    bank_path: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank_path = bank_path.unwrap_or_else(|| config.quiz_bank_path());
    let bank = parse_quiz_bank(&bank_path)?;

    let Some(answers) = answers else {
        print_questions(&bank);
        return Ok(());
    };

    let answers = parse_answers(&answers)?;
    let result = score_careers(&bank, &answers);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!("No career matches. Answer a few questions to get recommendations.");
        return Ok(());
    }

    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Career", "Match", "Entrance exam", "Outlook"]);
    for (rank, m) in result.matches.iter().enumerate() {
        let profile = bank.career_profile(&m.career_id);
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&m.name),
            Cell::new(format!("{}%", m.percentage)),
            Cell::new(profile.map(|p| p.entrance_exam.as_str()).unwrap_or("-")),
            Cell::new(
                profile
                    .map(|p| p.outlook.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    println!("{table}");

    if let Some(profile) = result.top().and_then(|m| bank.career_profile(&m.career_id)) {
        println!("\nTop match: {}", profile.name);
        if !profile.degree.is_empty() {
            println!("  Degree: {} ({})", profile.degree, profile.duration);
        }
        if !profile.salary_range.is_empty() {
            println!("  Salary: {}", profile.salary_range);
        }
        if !profile.institutions.is_empty() {
            println!("  Where to study: {}", profile.institutions.join(", "));
        }
    }

    Ok(())
}

/// Parse `"0:1,1:0,3:2"` into question index → option index.
///
/// A later answer to the same question replaces an earlier one.
pub(crate) fn parse_answers(raw: &str) -> Result<BTreeMap<usize, usize>> {
    let mut answers = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (question, option) = pair
            .split_once(':')
            .with_context(|| format!("answer '{pair}' must look like question:option"))?;
        let question: usize = question
            .trim()
            .parse()
            .with_context(|| format!("invalid question index in '{pair}'"))?;
        let option: usize = option
            .trim()
            .parse()
            .with_context(|| format!("invalid option index in '{pair}'"))?;
        answers.insert(question, option);
    }
    Ok(answers)
}

fn print_questions(bank: &QuizBank) {
    for (qi, question) in bank.questions.iter().enumerate() {
        println!("{qi}. {}", question.text);
        for (oi, option) in question.options.iter().enumerate() {
            println!("   {oi}) {}", option.text);
        }
    }
    println!("\nAnswer with: meritscope quiz --answers \"0:1,1:0,...\"");
}
