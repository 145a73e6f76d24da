//! CLI command definitions and handlers

mod init;
mod report;

use crate::clumps::Clump;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lhr-report - Classify audit run results into scored, clumped reports
#[derive(Parser, Debug)]
#[command(name = "lhr-report")]
#[command(
    version,
    about = "Score categories and sort audits into passed, failed, warning, manual and not-applicable clumps",
    after_help = "\
Examples:
  lhr-report report run.json                    Terminal summary
  lhr-report report run.json --format json      Classified model for presentation adapters
  lhr-report report run.json -c performance     Only the performance category
  lhr-report report run.json --flat-clump failed  List failed audits without group headings
  lhr-report score run.json                     Per-category scores with explanation
  lhr-report validate run.json                  Check audit and group references
  lhr-report init                               Write a default lhr-report.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Directory to load lhr-report.toml from (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the classified report for a run record
    Report {
        /// Path to the run record JSON
        file: PathBuf,

        /// Output format: text, json (default from config, else text)
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Only report these categories (repeatable)
        #[arg(long = "category", short = 'c')]
        categories: Vec<String>,

        /// Render this clump as one flat list (repeatable, replaces the configured set)
        #[arg(long = "flat-clump", value_name = "CLUMP")]
        flat_clumps: Vec<Clump>,

        /// Exit with code 1 if any category fails to build
        #[arg(long)]
        strict: bool,

        /// Disable colors in text output
        #[arg(long)]
        no_color: bool,
    },

    /// Check that every audit and group reference resolves
    Validate {
        /// Path to the run record JSON
        file: PathBuf,
    },

    /// Print per-category scores with their breakdown
    Score {
        /// Path to the run record JSON
        file: PathBuf,

        /// Only score these categories (repeatable)
        #[arg(long = "category", short = 'c')]
        categories: Vec<String>,
    },

    /// Write a default lhr-report.toml
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            file,
            format,
            output,
            categories,
            flat_clumps,
            strict,
            no_color,
        } => report::run(
            &file,
            &cli.config,
            report::ReportOptions {
                format: format.as_deref(),
                output: output.as_deref(),
                categories,
                flat_clumps,
                strict,
                no_color,
            },
        ),
        Commands::Validate { file } => report::validate(&file),
        Commands::Score { file, categories } => report::score(&file, &categories),
        Commands::Init { dir } => init::run(&dir),
    }
}
