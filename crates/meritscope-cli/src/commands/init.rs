//! The `meritscope init` command.

use std::path::Path;

use anyhow::Result;

const FILES: &[(&str, &str)] = &[
    ("meritscope.toml", SAMPLE_CONFIG),
    ("data/catalog.toml", include_str!("../../../../data/catalog.toml")),
    ("data/quiz.toml", include_str!("../../../../data/quiz.toml")),
    ("data/aliases.toml", include_str!("../../../../data/aliases.toml")),
];

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("data")?;

    for (path, content) in FILES {
        if Path::new(path).exists() {
            println!("{path} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {path}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Edit data/catalog.toml with this year's cutoffs");
    println!("  2. Run: meritscope validate");
    println!("  3. Run: meritscope chance --marks 85 --test-score 150");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# meritscope configuration

data_dir = "./data"
catalog = "catalog.toml"
quiz_bank = "quiz.toml"
aliases = "aliases.toml"

# Entrance-test maximum used when --test-max is not given
default_test_max = 200

output_dir = "./meritscope-results"
"#;
