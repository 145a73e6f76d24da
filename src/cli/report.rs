//! Report, validate and score commands

use crate::clumps::Clump;
use crate::config::load_project_config;
use crate::models::Lhr;
use crate::report::{build_report, RenderContext};
use crate::reporters;
use crate::scoring::CategoryScorer;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

fn load(file: &Path) -> Result<Lhr> {
    Lhr::load(file).with_context(|| format!("Failed to load run record {}", file.display()))
}

/// Command-line options of the report command
pub struct ReportOptions<'a> {
    pub format: Option<&'a str>,
    pub output: Option<&'a Path>,
    pub categories: Vec<String>,
    pub flat_clumps: Vec<Clump>,
    pub strict: bool,
    pub no_color: bool,
}

fn check_categories(lhr: &Lhr, categories: &[String]) -> Result<()> {
    for id in categories {
        lhr.category(id)?;
    }
    Ok(())
}

/// Run the report command
pub fn run(file: &Path, config_dir: &Path, options: ReportOptions<'_>) -> Result<()> {
    let ReportOptions {
        format,
        output,
        categories,
        flat_clumps,
        strict,
        no_color,
    } = options;
    let config = load_project_config(config_dir);
    let lhr = load(file)?;
    check_categories(&lhr, &categories)?;

    // Colors never go to files
    let color = !no_color && !config.output.no_color && output.is_none();
    let mut ctx = RenderContext::from_config(&config)
        .with_categories(categories)
        .with_color(color);
    if !flat_clumps.is_empty() {
        ctx = ctx.with_flat_clumps(flat_clumps);
    }

    let model = build_report(&lhr, &ctx);
    let format = format
        .or(config.output.format.as_deref())
        .unwrap_or("text");
    let rendered = reporters::report(&model, &ctx, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} report to {}", format, path.display());
        }
        None => print!("{}", rendered),
    }

    if strict && !model.category_errors.is_empty() {
        anyhow::bail!(
            "{} categories could not be built: {}",
            model.category_errors.len(),
            model
                .category_errors
                .iter()
                .map(|e| e.category.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

/// Run the validate command
pub fn validate(file: &Path) -> Result<()> {
    let lhr = load(file)?;
    lhr.validate()
        .with_context(|| format!("{} has dangling references", file.display()))?;
    println!(
        "OK: {} categories, {} audits, {} groups",
        lhr.categories.len(),
        lhr.audits.len(),
        lhr.category_groups.len()
    );
    Ok(())
}

/// Run the score command
pub fn score(file: &Path, categories: &[String]) -> Result<()> {
    let lhr = load(file)?;
    check_categories(&lhr, categories)?;
    let scorer = CategoryScorer::new(&lhr.audits);

    for category in lhr.categories.values() {
        if !categories.is_empty() && !categories.contains(&category.id) {
            continue;
        }
        let breakdown = scorer
            .calculate(category)
            .with_context(|| format!("Failed to score category {}", category.id))?;
        println!("{}\n", breakdown.explain());
    }
    Ok(())
}
