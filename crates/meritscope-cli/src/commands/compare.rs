//! The `meritscope compare` command.

use std::path::PathBuf;

use anyhow::Result;

use meritscope_core::report::{ChanceChange, ChanceReport};

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: u8,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    let baseline = ChanceReport::load_json(&baseline_path)?;
    let current = ChanceReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!(
                "Comparison: {} improvements, {} declines, {} unchanged",
                report.improvements.len(),
                report.declines.len(),
                report.unchanged
            );
            print_changes("Improvements", &report.improvements);
            print_changes("Declines", &report.declines);

            if report.new_programs > 0 {
                println!("\n{} new program(s)", report.new_programs);
            }
            if report.removed_programs > 0 {
                println!("{} removed program(s)", report.removed_programs);
            }
        }
    }

    if fail_on_decline && report.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_changes(title: &str, changes: &[ChanceChange]) {
    if changes.is_empty() {
        return;
    }
    println!("\n{title}:");
    for c in changes {
        println!(
            "  {}/{} {}% -> {}% ({:+})",
            c.institution_id, c.program_id, c.baseline_percentage, c.current_percentage, c.delta
        );
    }
}
