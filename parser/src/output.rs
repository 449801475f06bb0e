//! Output formatting for summaries and reports.

use health_report_core::{Category, ReportSummary};

use crate::report::ParseReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a summary in the requested output format.
///
/// JSON output is the dashboard contract: camelCase keys, item arrays always
/// present.
pub fn format_summary(summary: &ReportSummary, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(summary).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(summary_to_markdown(summary)),
        OutputFormat::Table => Ok(summary_to_table(summary)),
    }
}

/// Formats a parse report in the requested output format.
pub fn format_report(report: &ParseReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn summary_to_markdown(summary: &ReportSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", summary.cluster_name));
    out.push_str(&format!("**Customer:** {}\n\n", summary.customer_name));
    out.push_str(&format!(
        "**Overall Score:** {:.1}%\n\n",
        summary.overall_score
    ));

    out.push_str("## Categories\n\n");
    out.push_str("| Category | Score | Description |\n");
    out.push_str("|----------|-------|-------------|\n");
    for category in Category::ALL {
        out.push_str(&format!(
            "| {} | {}% | {} |\n",
            category.heading(),
            summary.category_score(category),
            summary.category_description(category)
        ));
    }
    out.push('\n');

    for (title, items) in [
        ("Changes Required", &summary.items_required),
        ("Changes Recommended", &summary.items_recommended),
        ("Advisory", &summary.items_advisory),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("## {title}\n\n"));
        for item in items {
            out.push_str(&format!("- {item}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "**No Change:** {} | **Not Applicable:** {}\n",
        summary.no_change_count, summary.not_applicable_count
    ));

    out
}

fn summary_to_table(summary: &ReportSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("Cluster: {}\n", summary.cluster_name));
    out.push_str(&format!("Customer: {}\n", summary.customer_name));
    out.push_str(&format!("Overall: {:.1}%\n", summary.overall_score));
    out.push('\n');

    out.push_str(&format!("{:<26} {:>5}\n", "CATEGORY", "SCORE"));
    out.push_str(&format!("{}\n", "-".repeat(32)));
    for category in Category::ALL {
        out.push_str(&format!(
            "{:<26} {:>4}%\n",
            category.heading(),
            summary.category_score(category)
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "required={} recommended={} advisory={} no_change={} not_applicable={}\n",
        summary.items_required.len(),
        summary.items_recommended.len(),
        summary.items_advisory.len(),
        summary.no_change_count,
        summary.not_applicable_count
    ));

    out
}

fn report_to_markdown(report: &ParseReport) -> String {
    let mut out = String::new();

    let title = report.source.as_deref().unwrap_or("<stdin>");
    out.push_str(&format!("# Parse Report: {title}\n\n"));
    out.push_str(&format!(
        "- **Success:** {}\n",
        if report.success { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "- **Strategy:** {}\n",
        report.strategy_used.as_deref().unwrap_or("none")
    ));
    out.push_str(&format!(
        "- **Items:** {} ({} before deduplication)\n",
        report.unique_items, report.raw_items
    ));
    out.push_str(&format!("- **Overall Score:** {:.1}\n", report.overall_score));
    if report.degraded {
        out.push_str("- **Degraded:** yes\n");
    }

    if let Some(ref code) = report.failure_code {
        out.push_str(&format!("- **Failure Code:** {code}\n"));
    }
    if let Some(ref detail) = report.failure_detail {
        out.push_str(&format!("- **Failure Detail:** {detail}\n"));
    }

    if !report.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for w in &report.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

fn report_to_table(report: &ParseReport) -> String {
    let mut out = String::new();
    let status = if report.success { "OK" } else { "FAIL" };
    out.push_str(&format!(
        "{:<30} {:<6} {:<8} items={} score={:.1}",
        report.source.as_deref().unwrap_or("<stdin>"),
        status,
        report.strategy_used.as_deref().unwrap_or("none"),
        report.unique_items,
        report.overall_score,
    ));
    if let Some(ref code) = report.failure_code {
        out.push_str(&format!("  [{code}]"));
    }
    out.push('\n');
    out
}
