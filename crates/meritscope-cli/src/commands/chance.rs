//! The `meritscope chance` command.

use std::path::PathBuf;

use anyhow::Result;

use meritscope_core::config::load_config_from;
use meritscope_core::model::{Catalog, ScoringResult, StudentScores};
use meritscope_core::parser::{load_catalog, parse_alias_table};
use meritscope_core::report::ChanceReport;
use meritscope_core::{score_catalog, score_program};

pub struct ChanceArgs {
    pub marks: String,
    pub test_score: String,
    pub test_max: Option<String>,
    pub institution: Option<String>,
    pub program: Option<String>,
    pub catalog: Option<PathBuf>,
    pub aliases: Option<PathBuf>,
    pub details: bool,
    pub format: String,
    pub output: Option<PathBuf>,
    pub save: bool,
    pub config: Option<PathBuf>,
}

pub fn execute(args: ChanceArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let test_max = args
        .test_max
        .unwrap_or_else(|| config.default_test_max.to_string());
    let scores = StudentScores::parse(&args.marks, &args.test_score, &test_max)?;

    let catalog_path = args.catalog.unwrap_or_else(|| config.catalog_path());
    let catalog = load_catalog(&catalog_path)?;
    tracing::info!(
        "loaded {} programs from {}",
        catalog.program_count(),
        catalog_path.display()
    );

    let aliases_path = args.aliases.unwrap_or_else(|| config.aliases_path());
    let institution_ids = match &args.institution {
        Some(list) => resolve_institutions(list, &catalog, &aliases_path)?,
        None => Vec::new(),
    };

    let results = match &args.program {
        Some(program_id) => {
            let [institution_id] = institution_ids.as_slice() else {
                anyhow::bail!("--program needs exactly one institution, got {institution_ids:?}");
            };
            let (institution, program) = catalog.program(institution_id, program_id)?;
            vec![score_program(&scores, institution, program)?]
        }
        None => score_catalog(&scores, &catalog, &institution_ids)?,
    };

    let report = ChanceReport::new(scores, results);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_results(&report, args.details || args.program.is_some()),
    }

    let output = match args.output {
        Some(path) => Some(path),
        None if args.save => Some(config.output_dir.join(format!("{}.json", report.id))),
        None => None,
    };
    if let Some(path) = output {
        report.save_json(&path)?;
        tracing::info!("report saved to {}", path.display());
    }

    Ok(())
}

/// Turn `--institution nust,fast` into catalog ids. Exact catalog ids pass
/// through; anything else goes through the alias table.
fn resolve_institutions(
    list: &str,
    catalog: &Catalog,
    aliases_path: &std::path::Path,
) -> Result<Vec<String>> {
    let table = if aliases_path.exists() {
        Some(parse_alias_table(aliases_path)?)
    } else {
        tracing::debug!("no alias table at {}", aliases_path.display());
        None
    };

    let mut ids: Vec<String> = Vec::new();
    for query in list.split(',').map(str::trim).filter(|q| !q.is_empty()) {
        let resolved = if catalog.institution(query).is_some() {
            vec![query.to_string()]
        } else {
            table
                .as_ref()
                .map(|t| t.find_institutions(query))
                .unwrap_or_default()
        };

        if resolved.is_empty() {
            anyhow::bail!("no institution matches '{query}'");
        }
        for id in resolved {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}

fn print_results(report: &ChanceReport, details: bool) {
    use comfy_table::{Cell, Table};

    let scores = &report.scores;
    println!(
        "Marks {:.1}% | Test {}/{} ({:.1}%)\n",
        scores.marks,
        scores.test_score,
        scores.test_max,
        scores.test_percentage()
    );

    let mut table = Table::new();
    table.set_header(vec!["Institution", "Program", "Aggregate", "Chance", "Status"]);
    for r in &report.results {
        table.add_row(vec![
            Cell::new(&r.institution_name),
            Cell::new(&r.program_name),
            Cell::new(format!("{:.1}%", r.aggregate)),
            Cell::new(format!("{}%", r.percentage)),
            Cell::new(&r.status),
        ]);
    }
    println!("{table}");

    let summary = &report.summary;
    println!(
        "\n{} program(s) scored, {} eligible, average eligible chance {:.1}%",
        summary.total, summary.eligible, summary.avg_eligible_chance
    );

    if details {
        for r in &report.results {
            print_recommendations(r);
        }
    }
}

fn print_recommendations(result: &ScoringResult) {
    println!("\n{} / {}:", result.institution_name, result.program_name);
    for line in &result.recommendations {
        println!("  - {line}");
    }
}
