//! Text (terminal) reporter with colors and formatting

use crate::clumps::Clump;
use crate::report::{AuditEntry, CategoryReport, ClumpSection, RenderContext, ReportModel};
use crate::scoring::ScoreRating;
use anyhow::Result;
use console::{style, StyledObject};

/// Disable styling when the context asks for plain output
fn paint<D>(ctx: &RenderContext, obj: StyledObject<D>) -> StyledObject<D> {
    if ctx.color {
        obj
    } else {
        obj.force_styling(false)
    }
}

fn rating_style<D>(rating: ScoreRating, obj: StyledObject<D>) -> StyledObject<D> {
    match rating {
        ScoreRating::Pass => obj.green(),
        ScoreRating::Average => obj.yellow(),
        ScoreRating::Fail => obj.red(),
        ScoreRating::Unscored => obj.dim(),
    }
}

fn clump_title(clump: Clump) -> &'static str {
    match clump {
        Clump::Failed => "Failed",
        Clump::Warning => "Passed with warnings",
        Clump::Manual => "Additional items to manually check",
        Clump::Passed => "Passed audits",
        Clump::NotApplicable => "Not applicable",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &ReportModel, ctx: &RenderContext) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{}\n", paint(ctx, style("Audit Report").bold())));
    out.push_str(&format!(
        "{}\n",
        paint(ctx, style("──────────────────────────────────────").dim())
    ));
    out.push_str(&format!("URL: {}\n", report.final_url));
    if report.requested_url != report.final_url {
        out.push_str(&format!("Requested: {}\n", report.requested_url));
    }
    out.push_str(&format!(
        "Fetched: {}  Version: {}\n\n",
        report.fetch_time, report.lighthouse_version
    ));

    if let Some(error) = report.runtime_failure() {
        out.push_str(&format!(
            "{} {}: {}\n\n",
            paint(ctx, style("Runtime error").red().bold()),
            error.code,
            error.message
        ));
    }

    if !report.run_warnings.is_empty() {
        out.push_str(&format!("{}\n", paint(ctx, style("RUN WARNINGS").yellow().bold())));
        for warning in &report.run_warnings {
            out.push_str(&format!("  ! {}\n", warning));
        }
        out.push('\n');
    }

    // Category scores (compact)
    out.push_str(&format!("{}\n", paint(ctx, style("SCORES").bold())));
    for category in &report.categories {
        out.push_str(&format!(
            "  {:<30} {}\n",
            category_label(category),
            format_score(ctx, category)
        ));
    }
    out.push('\n');

    for category in &report.categories {
        render_category(&mut out, category, report, ctx);
    }

    if !report.category_errors.is_empty() {
        out.push_str(&format!("{}\n", paint(ctx, style("ERRORS").red().bold())));
        for error in &report.category_errors {
            out.push_str(&format!("  {}: {}\n", error.category, error.message));
        }
        out.push('\n');
    }

    Ok(out)
}

fn category_label(category: &CategoryReport) -> String {
    if category.is_plugin {
        format!("{} [plugin]", category.title)
    } else {
        category.title.clone()
    }
}

fn format_score(ctx: &RenderContext, category: &CategoryReport) -> String {
    let text = match category.display_score {
        Some(score) => format!("{:>3}", score),
        None => "  -".to_string(),
    };
    paint(ctx, rating_style(category.rating, style(text)).bold()).to_string()
}

fn render_category(
    out: &mut String,
    category: &CategoryReport,
    report: &ReportModel,
    ctx: &RenderContext,
) {
    out.push_str(&format!(
        "{} {} ({} audits)\n",
        paint(ctx, style(category.title.to_uppercase()).bold()),
        format_score(ctx, category),
        category.audit_count
    ));

    for section in &category.clumps {
        out.push_str(&format!(
            "  {} ({})\n",
            paint(ctx, style(clump_title(section.clump)).underlined()),
            section.count
        ));

        if section.clump == Clump::Manual {
            if let Some(description) = category.manual_description.get() {
                out.push_str(&format!("    {}\n", paint(ctx, style(description).dim())));
            }
        }

        if section.clump == Clump::Passed && !ctx.show_passed {
            continue;
        }
        render_section(out, section, report, ctx);
    }
    out.push('\n');
}

fn render_section(out: &mut String, section: &ClumpSection, report: &ReportModel, ctx: &RenderContext) {
    for run in &section.runs {
        let indent = match &run.group {
            Some(group) => {
                let title = report
                    .category_groups
                    .get(group)
                    .map_or(group.as_str(), |g| g.title.as_str());
                out.push_str(&format!("    {}\n", paint(ctx, style(title).cyan())));
                "      "
            }
            None => "    ",
        };
        for entry in &run.members {
            render_entry(out, entry, indent, ctx);
        }
    }
}

fn render_entry(out: &mut String, entry: &AuditEntry, indent: &str, ctx: &RenderContext) {
    let result = &entry.result;
    // Truncate title if too long, by chars to stay on UTF-8 boundaries
    let title: String = if result.title.chars().count() > 60 {
        format!("{}...", result.title.chars().take(57).collect::<String>())
    } else {
        result.title.clone()
    };

    match result.display_value.get() {
        Some(value) if !value.is_empty() => out.push_str(&format!(
            "{indent}- {}  {}\n",
            title,
            paint(ctx, style(value).dim())
        )),
        _ => out.push_str(&format!("{indent}- {}\n", title)),
    }

    if let Some(error) = result.error_message.get() {
        out.push_str(&format!(
            "{indent}    {} {}\n",
            paint(ctx, style("error:").red()),
            error
        ));
    }
    for warning in result.warnings() {
        out.push_str(&format!(
            "{indent}    {} {}\n",
            paint(ctx, style("warning:").yellow()),
            warning
        ));
    }
    for warning in &entry.contract_warnings {
        out.push_str(&format!(
            "{indent}    {} {}\n",
            paint(ctx, style("invalid:").magenta()),
            warning
        ));
    }
}
