use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use health_report_config::DashboardConfig;
use health_report_core::{ReportSummary, check_file_size};
use health_report_parser::output::{OutputFormat, format_report, format_summary};
use health_report_parser::report::{FailureCode, ParseReport, ParseReportBundle};
use health_report_parser::{
    ParseError, ParseRun, RawDocument, load_report_file, parse_document_with_diagnostics,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_CONFIG_FILE: &str = "report-summary.yml";
const BATCH_REPORT_FILE: &str = "batch-report.json";

#[derive(Debug, Parser)]
#[command(name = "report-summary")]
#[command(about = "Summarize AsciiDoc cluster health check reports")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize a report file.
    ParseFile(ParseFileArgs),
    /// Summarize report text read from stdin.
    ParseStdin(ParseStdinArgs),
    /// Summarize every report in a directory in parallel.
    Batch(BatchArgs),
    /// Write a default configuration file.
    InitConfig(InitConfigArgs),
    /// Check a configuration file.
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Path to the .adoc / .asciidoc report.
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    options: ParseOptions,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    #[command(flatten)]
    options: ParseOptions,
}

#[derive(Debug, Args)]
struct ParseOptions {
    /// Output both the summary and the parse report.
    #[arg(long)]
    with_report: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fail when no Summary section is found or the summary is invalid.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Directory containing report files.
    #[arg(long)]
    input: PathBuf,
    /// Output directory for summaries and the batch report.
    #[arg(long)]
    output: PathBuf,
    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of parallel jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Exit with an error when any report fails or is degraded.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Where to write the configuration.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    output: PathBuf,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Args)]
struct ValidateConfigArgs {
    /// Configuration file to check.
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::Batch(args) => run_batch(args),
        Command::InitConfig(args) => run_init_config(args),
        Command::ValidateConfig(args) => run_validate_config(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig, String> {
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    let config = DashboardConfig::load(path)
        .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?;
    config
        .validate()
        .map_err(|e| format!("Config '{}': {e}", path.display()))?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let config = load_config(args.options.config.as_deref())?;
    let document = load_report_file(
        &args.input,
        &config.input.extensions(),
        config.input.max_file_size,
    )
    .map_err(|e| e.to_string())?;

    let source = args.input.display().to_string();
    let run = parse_document_with_diagnostics(&document, &config.scoring, Some(source));
    emit_run(&run, &args.options)
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let config = load_config(args.options.config.as_deref())?;
    let limit = config.input.max_file_size;
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    check_file_size(bytes.len() as u64, limit).map_err(|e| e.to_string())?;

    let text = String::from_utf8_lossy(&bytes);
    let run = parse_document_with_diagnostics(&RawDocument::from_text(&text), &config.scoring, None);
    emit_run(&run, &args.options)
}

fn emit_run(run: &ParseRun, options: &ParseOptions) -> Result<(), String> {
    if options.with_report {
        #[derive(serde::Serialize)]
        struct ParseOutput<'a> {
            summary: &'a ReportSummary,
            report: &'a ParseReport,
        }

        let output = ParseOutput {
            summary: &run.summary,
            report: &run.report,
        };

        match options.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&output)
                    .map_err(|e| format!("Failed to serialize output: {e}"))?;
                println!("{json}");
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(&output)
                    .map_err(|e| format!("Failed to serialize output: {e}"))?;
                println!("{yaml}");
            }
            format => {
                print!("{}", format_summary(&run.summary, format)?);
                print!("{}", format_report(&run.report, format)?);
            }
        }
    } else {
        println!("{}", format_summary(&run.summary, options.format)?);
    }

    if options.strict {
        check_strict(&run.report)?;
    }
    Ok(())
}

/// Strict runs reject degraded parses as well as invalid summaries.
fn check_strict(report: &ParseReport) -> Result<(), String> {
    if !report.success {
        return Err(format!(
            "Summary failed validation: {}",
            report.failure_detail.as_deref().unwrap_or("unknown error")
        ));
    }
    if report.degraded {
        return Err("No Summary section found in report".to_string());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// batch command
// ---------------------------------------------------------------------------

fn run_batch(args: BatchArgs) -> Result<(), String> {
    use rayon::prelude::*;

    let config = load_config(args.config.as_deref())?;
    let inputs = collect_report_paths(&args.input, &config)?;
    if inputs.is_empty() {
        return Err(format!(
            "No report files found in '{}' (accepted: {})",
            args.input.display(),
            config.input.extensions().join(", ")
        ));
    }

    fs::create_dir_all(&args.output).map_err(|err| {
        format!(
            "Failed to create output directory '{}': {err}",
            args.output.display()
        )
    })?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .map_err(|e| format!("Failed to create thread pool: {e}"))?;

    let output_names = assign_output_names(&inputs);
    let reports: Vec<ParseReport> = pool.install(|| {
        inputs
            .par_iter()
            .zip(output_names.par_iter())
            .map(|(path, name)| summarize_into(path, &config, &args.output.join(name)))
            .collect::<Result<_, String>>()
    })?;

    let failures: Vec<String> = reports
        .iter()
        .filter(|report| !report.success || (args.strict && report.degraded))
        .filter_map(|report| report.source.clone())
        .collect();
    let written = reports.iter().filter(|report| report.success).count();

    let bundle = ParseReportBundle {
        generated_at: chrono::Utc::now().to_rfc3339(),
        version: PACKAGE_VERSION.to_string(),
        reports,
        failures,
    };
    let report_path = args.output.join(BATCH_REPORT_FILE);
    let raw = serde_json::to_string_pretty(&bundle)
        .map_err(|e| format!("Failed to serialize batch report: {e}"))?;
    fs::write(&report_path, raw)
        .map_err(|err| format!("Failed to write '{}': {err}", report_path.display()))?;

    println!(
        "Summarized {written} of {} report(s) into '{}'.",
        bundle.reports.len(),
        args.output.display()
    );

    if !bundle.failures.is_empty() {
        eprintln!(
            "{} report(s) failed: {}",
            bundle.failures.len(),
            bundle.failures.join(", ")
        );
        if args.strict {
            return Err(format!("{} report(s) failed", bundle.failures.len()));
        }
    }

    Ok(())
}

/// Lists accepted report files in `dir`, sorted by path.
fn collect_report_paths(dir: &Path, config: &DashboardConfig) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to read directory '{}': {err}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("Failed to read directory '{}': {err}", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if config.input.accepts(&name) {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-report file");
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parses one report and writes its summary to `summary_path`. Input
/// problems become failure reports; only output write errors abort the batch.
fn summarize_into(
    path: &Path,
    config: &DashboardConfig,
    summary_path: &Path,
) -> Result<ParseReport, String> {
    let source = path.display().to_string();
    let document = match load_report_file(
        path,
        &config.input.extensions(),
        config.input.max_file_size,
    ) {
        Ok(document) => document,
        Err(err) => {
            warn!(source = %source, error = %err, "report rejected");
            return Ok(ParseReport::failure(
                Some(source),
                failure_code(&err),
                err.to_string(),
            ));
        }
    };

    let run = parse_document_with_diagnostics(&document, &config.scoring, Some(source));
    let json = serde_json::to_string_pretty(&run.summary)
        .map_err(|e| format!("Failed to serialize summary: {e}"))?;
    fs::write(&summary_path, json)
        .map_err(|err| format!("Failed to write '{}': {err}", summary_path.display()))?;
    info!(path = %summary_path.display(), "wrote summary");

    Ok(run.report)
}

fn failure_code(err: &ParseError) -> FailureCode {
    match err {
        ParseError::InputAccess { .. } => FailureCode::InputAccess,
        ParseError::Validation(_) => FailureCode::InputRejected,
    }
}

/// Summary file name for each input, in input order.
///
/// Names keep the report's extension (`east.adoc.summary.json`); inputs that
/// still collide after sanitizing get a numeric suffix.
fn assign_output_names(paths: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            let base = sanitize_filename_segment(&file_name);
            let mut name = format!("{base}.summary.json");
            let mut suffix = 2;
            while !taken.insert(name.clone()) {
                name = format!("{base}-{suffix}.summary.json");
                suffix += 1;
            }
            name
        })
        .collect()
}

fn sanitize_filename_segment(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        "report".to_string()
    } else {
        cleaned.to_string()
    }
}

// ---------------------------------------------------------------------------
// config commands
// ---------------------------------------------------------------------------

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            args.output.display()
        ));
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    DashboardConfig::default()
        .save(&args.output)
        .map_err(|e| format!("Failed to write '{}': {e}", args.output.display()))?;
    println!("Wrote default configuration to '{}'.", args.output.display());
    Ok(())
}

fn run_validate_config(args: ValidateConfigArgs) -> Result<(), String> {
    let config = load_config(Some(&args.config))?;
    println!(
        "Configuration '{}' is valid (version {}).",
        args.config.display(),
        config.version
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_segment_keeps_safe_chars() {
        assert_eq!(sanitize_filename_segment("ocp-prod_01"), "ocp-prod_01");
        assert_eq!(sanitize_filename_segment("Acme Health (Q3)"), "Acme-Health--Q3");
        assert_eq!(sanitize_filename_segment("()"), "report");
    }

    #[test]
    fn test_output_names_keep_extension_and_stay_unique() {
        let paths: Vec<PathBuf> = ["east.adoc", "east.asciidoc", "a b.adoc", "a-b.adoc", "a?b.adoc"]
            .iter()
            .map(|name| PathBuf::from("/reports").join(name))
            .collect();
        assert_eq!(
            assign_output_names(&paths),
            vec![
                "east.adoc.summary.json",
                "east.asciidoc.summary.json",
                "a-b.adoc.summary.json",
                "a-b.adoc-2.summary.json",
                "a-b.adoc-3.summary.json",
            ]
        );
    }

    #[test]
    fn test_failure_code_maps_parse_errors() {
        let rejected = ParseError::Validation(health_report_core::ValidationError::FileTooLarge {
            size: 2,
            limit: 1,
        });
        assert_eq!(failure_code(&rejected), FailureCode::InputRejected);

        let missing = ParseError::InputAccess {
            path: PathBuf::from("gone.adoc"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(failure_code(&missing), FailureCode::InputAccess);
    }

    #[test]
    fn test_check_strict_rejects_degraded() {
        let run = health_report_parser::parse_report_with_diagnostics(
            "no headings here",
            &health_report_core::ScoringPolicy::default(),
        );
        assert!(check_strict(&run.report).is_err());

        let run = health_report_parser::parse_report_with_diagnostics(
            "== Summary\n",
            &health_report_core::ScoringPolicy::default(),
        );
        assert!(check_strict(&run.report).is_ok());
    }
}
