//! Command-line entry point for meritscope.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "meritscope",
    version,
    about = "Admission chances and career matching for Pakistani universities"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate admission chances for catalog programs
    Chance {
        /// Academic marks percentage
        #[arg(long)]
        marks: String,

        /// Entrance-test score
        #[arg(long)]
        test_score: String,

        /// Entrance-test maximum (default from config)
        #[arg(long)]
        test_max: Option<String>,

        /// Institutions to score, by id or alias (comma-separated)
        #[arg(long)]
        institution: Option<String>,

        /// Score a single program of the given institution
        #[arg(long, requires = "institution")]
        program: Option<String>,

        /// Catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Alias table used to resolve --institution
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Print recommendations for every program
        #[arg(long)]
        details: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the results as a JSON report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the report into the configured output directory
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },

    /// Take the career quiz or list its questions
    Quiz {
        /// Answers as question:option pairs, zero-based (e.g. "0:1,1:0,3:2")
        #[arg(long)]
        answers: Option<String>,

        /// Quiz bank file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Find institutions by name, abbreviation, or nickname
    Search {
        /// Free-text query
        query: String,

        /// Alias table file
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Catalog used to show institution names
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Validate reference data files
    Validate {
        /// Catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Quiz bank file
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Alias table file
        #[arg(long)]
        aliases: Option<PathBuf>,
    },

    /// Compare two saved chance reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Percentage points a change must exceed to count
        #[arg(long, default_value = "0")]
        threshold: u8,

        /// Exit code 1 if any chance went down
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and reference data
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("meritscope=info".parse().unwrap())
                .add_directive("meritscope_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Chance {
            marks,
            test_score,
            test_max,
            institution,
            program,
            catalog,
            aliases,
            details,
            format,
            output,
            save,
        } => commands::chance::execute(commands::chance::ChanceArgs {
            marks,
            test_score,
            test_max,
            institution,
            program,
            catalog,
            aliases,
            details,
            format,
            output,
            save,
            config,
        }),
        Commands::Quiz {
            answers,
            bank,
            format,
        } => commands::quiz::execute(answers, bank, format, config),
        Commands::Search {
            query,
            aliases,
            catalog,
        } => commands::search::execute(query, aliases, catalog, config),
        Commands::Validate {
            catalog,
            bank,
            aliases,
        } => commands::validate::execute(catalog, bank, aliases, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
