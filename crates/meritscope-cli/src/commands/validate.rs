//! The `meritscope validate` command.

use std::path::PathBuf;

use anyhow::Result;

use meritscope_core::config::load_config_from;
use meritscope_core::parser::{
    load_catalog, parse_alias_table, parse_quiz_bank, validate_aliases, validate_catalog,
    validate_quiz_bank, ValidationWarning,
};

pub fn execute(
    catalog_path: Option<PathBuf>,
    bank_path: Option<PathBuf>,
    aliases_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog_path = catalog_path.unwrap_or_else(|| config.catalog_path());
    let bank_path = bank_path.unwrap_or_else(|| config.quiz_bank_path());
    let aliases_path = aliases_path.unwrap_or_else(|| config.aliases_path());

    let mut total_warnings = 0;

    let catalog = load_catalog(&catalog_path)?;
    println!(
        "Catalog: {} ({} institutions, {} programs)",
        catalog_path.display(),
        catalog.institutions.len(),
        catalog.program_count()
    );
    total_warnings += report(&validate_catalog(&catalog));

    if bank_path.exists() {
        let bank = parse_quiz_bank(&bank_path)?;
        println!(
            "Quiz bank: {} ({} questions, {} careers)",
            bank_path.display(),
            bank.questions.len(),
            bank.careers.len()
        );
        total_warnings += report(&validate_quiz_bank(&bank));
    } else {
        println!("Quiz bank: {} not found, skipping.", bank_path.display());
    }

    if aliases_path.exists() {
        let table = parse_alias_table(&aliases_path)?;
        println!(
            "Aliases: {} ({} institutions, {} legacy ids)",
            aliases_path.display(),
            table.entries.len(),
            table.legacy.len()
        );
        total_warnings += report(&validate_aliases(&table, &catalog));
    } else {
        println!("Aliases: {} not found, skipping.", aliases_path.display());
    }

    if total_warnings == 0 {
        println!("All reference data valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn report(warnings: &[ValidationWarning]) -> usize {
    for w in warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    warnings.len()
}
