use analyzer::{Analyzer, AnalyzerError, SchemaError};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{AnalysisConfig, ColumnOverrides, ThresholdOverrides};
use std::path::PathBuf;

mod render;

use render::View;

/// The main entry point for the highlow classifier.
fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    // Held until exit so buffered log lines reach the file.
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, config.analysis),
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Classifies 52-week high/low exports into breakout candidates, range-bound
/// stocks, near-low stocks and sector statistics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults to ./highlow.toml when it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the stocks in a CSV or spreadsheet export.
    Analyze(AnalyzeArgs),
    /// Print the effective configuration as JSON.
    ShowConfig,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The export to analyze (.csv, .txt, .xlsx, .xlsm, .xls or .ods).
    #[arg(long, short)]
    file: PathBuf,

    #[command(flatten)]
    columns: ColumnOverrides,

    #[command(flatten)]
    thresholds: ThresholdOverrides,

    /// Which results to print.
    #[arg(long, value_enum, default_value_t = View::Overview)]
    view: View,

    /// Maximum rows per printed table (default 20, or 50 for the volatility view).
    #[arg(long)]
    limit: Option<usize>,

    /// Print terminal tables or the full result bundle as JSON.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// With `--format json`, write the bundle to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Loads the file, runs the classifier and prints the requested view.
fn handle_analyze(args: AnalyzeArgs, mut analysis: AnalysisConfig) -> anyhow::Result<()> {
    analysis.apply_overrides(&args.columns, &args.thresholds);
    analysis.validate()?;

    let loaded = ingest::load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    tracing::info!(
        file = %args.file.display(),
        rows = loaded.report.rows_loaded,
        skipped = loaded.report.skipped_lines.len(),
        "Loaded input"
    );

    let bundle = match Analyzer::new(analysis).run(&loaded.table) {
        Ok(bundle) => bundle,
        Err(AnalyzerError::Schema(err)) => {
            bail!("{}", schema_error_message(&err, loaded.table.columns()))
        }
    };

    match (args.format, &args.output) {
        (OutputFormat::Json, None) => println!("{}", serde_json::to_string_pretty(&bundle)?),
        (OutputFormat::Json, Some(path)) => {
            std::fs::write(path, serde_json::to_string_pretty(&bundle)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote result bundle");
        }
        (OutputFormat::Table, output) => {
            if output.is_some() {
                tracing::warn!("--output only applies with --format json; ignoring it");
            }
            print!("{}", render::render_view(&bundle, args.view, args.limit));
        }
    }

    Ok(())
}

/// Explains a missing-column failure in terms of the columns the file does have.
fn schema_error_message(err: &SchemaError, columns: &[String]) -> String {
    format!(
        "{err}\nThe file has these columns: {}\nMap them with --high-col/--low-col or the [analysis.columns] section of the config file.",
        columns.join(", ")
    )
}
