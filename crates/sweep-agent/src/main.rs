//! CLI entry point for the agent-driven data cleaner.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sweep_agent::ai::ReasoningProvider;
use sweep_agent::{
    AgentConfig, Cleaner, CleaningSummary, MissingValueStrategy, Session, inspect,
    utils::DEFAULT_Z_THRESHOLD,
};
use tracing::{error, info, warn};

#[cfg(feature = "ai")]
use std::env;
#[cfg(feature = "ai")]
use sweep_agent::ai::{AnthropicProvider, MistralProvider, OpenAiProvider};

/// CLI-compatible missing-value strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMissingStrategy {
    /// Fill missing numeric values with the column mean
    FillMean,
    /// Drop rows containing missing values
    Drop,
}

impl From<CliMissingStrategy> for MissingValueStrategy {
    fn from(cli: CliMissingStrategy) -> Self {
        match cli {
            CliMissingStrategy::FillMean => MissingValueStrategy::FillMean,
            CliMissingStrategy::Drop => MissingValueStrategy::Drop,
        }
    }
}

/// Supported reasoning providers
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliProvider {
    /// OpenAI chat completions API
    Openai,
    /// Anthropic Messages API
    Anthropic,
    /// Mistral chat completions API
    Mistral,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Agent-driven data cleaning for tabular datasets",
    long_about = "Lets an LLM agent plan cleaning operations (missing values, outliers, \
                  duplicates) over a dataset, then replays the plan deterministically and \
                  writes the cleaned result plus a report.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  OPENAI_API_KEY       API key for --provider openai\n  \
                  ANTHROPIC_API_KEY    API key for --provider anthropic\n  \
                  MISTRAL_API_KEY      API key for --provider mistral\n\n\
                  EXAMPLES:\n  \
                  # Clean with defaults (OpenAI, fill missing with mean)\n  \
                  sweep-agent -i data.csv\n\n  \
                  # Drop rows with missing values instead\n  \
                  sweep-agent -i data.csv --strategy drop\n\n  \
                  # Inspect without calling any provider\n  \
                  sweep-agent -i data.csv --dry-run"
)]
struct Args {
    /// Path to the CSV or Parquet file to clean
    #[arg(short, long)]
    input: String,

    /// Output directory for the cleaned dataset
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// How to handle missing values
    #[arg(long, value_enum, default_value = "fill-mean")]
    strategy: CliMissingStrategy,

    /// Reasoning provider to plan with
    #[arg(short, long, value_enum, default_value = "openai")]
    provider: CliProvider,

    /// Override the provider's default model
    #[arg(long)]
    model: Option<String>,

    /// Maximum reasoning steps before the planner is cut off
    #[arg(long, default_value = "60")]
    max_steps: usize,

    /// Wall-clock ceiling for planning, in seconds
    #[arg(long, default_value = "60")]
    max_seconds: u64,

    /// Preview dataset issues without calling a reasoning provider
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the run summary as JSON to stdout instead of human-readable text
    ///
    /// Disables all progress logs; only outputs the final JSON.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    info!("Loading dataset from: {}", args.input);
    let mut session = Session::from_path(Path::new(&args.input))?;
    info!(
        "Dataset loaded: {} rows x {} columns",
        session.original().height(),
        session.original().width()
    );

    if args.dry_run {
        return run_dry_run(&args, &session);
    }

    if !Path::new(&args.output).exists() {
        std::fs::create_dir_all(&args.output)?;
        info!("Created output directory: {}", args.output);
    }

    let config = AgentConfig::builder()
        .strategy(args.strategy.into())
        .max_steps(args.max_steps)
        .max_wall_clock_secs(args.max_seconds)
        .build()?;

    let provider = build_provider(&args)?;
    info!(
        "Planning with {} ({})",
        provider.name(),
        provider.model().unwrap_or("default model")
    );

    let mut builder = Cleaner::builder().provider(provider).config(config);

    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    let cleaner = builder.build()?;

    let summary = match session.run(&cleaner) {
        Ok(result) => result.summary.clone(),
        Err(e) => {
            error!("Cleaning failed: {}", e);
            return Err(anyhow!("Cleaning failed: {}", e));
        }
    };

    // Write the cleaned dataset in the source format
    let payload = session.export()?;
    let output_path = PathBuf::from(&args.output).join(&payload.file_name);
    std::fs::write(&output_path, &payload.bytes)?;
    info!("Cleaned dataset written to {}", output_path.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_human_readable_summary(&summary, &args, &output_path);
    Ok(())
}

/// Build the configured reasoning provider from CLI args and env keys.
#[cfg(feature = "ai")]
fn build_provider(args: &Args) -> Result<Arc<dyn ReasoningProvider>> {
    match args.provider {
        CliProvider::Openai => {
            let api_key = require_key("OPENAI_API_KEY")?;
            let provider = match &args.model {
                Some(model) => OpenAiProvider::with_config(
                    api_key,
                    sweep_agent::ai::OpenAiConfig::builder().model(model).build(),
                )?,
                None => OpenAiProvider::new(api_key)?,
            };
            Ok(Arc::new(provider))
        }
        CliProvider::Anthropic => {
            let api_key = require_key("ANTHROPIC_API_KEY")?;
            let provider = match &args.model {
                Some(model) => AnthropicProvider::with_config(
                    api_key,
                    sweep_agent::ai::AnthropicConfig::builder().model(model).build(),
                )?,
                None => AnthropicProvider::new(api_key)?,
            };
            Ok(Arc::new(provider))
        }
        CliProvider::Mistral => {
            let api_key = require_key("MISTRAL_API_KEY")?;
            if args.model.is_some() {
                warn!("--model is ignored for the Mistral provider default config");
            }
            Ok(Arc::new(MistralProvider::new(api_key)?))
        }
    }
}

#[cfg(feature = "ai")]
fn require_key(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        anyhow!(
            "{} is not set. Export it or add it to a .env file, or use --dry-run.",
            name
        )
    })
}

/// Without the "ai" feature no HTTP provider is available.
#[cfg(not(feature = "ai"))]
fn build_provider(_args: &Args) -> Result<Arc<dyn ReasoningProvider>> {
    Err(anyhow!(
        "AI support not compiled in. Rebuild with --features ai, or use --dry-run."
    ))
}

/// Run dry-run mode - preview dataset issues without any provider calls.
///
/// Note: this function uses `println!` intentionally for user-facing CLI
/// output; it should always be visible regardless of log level settings.
fn run_dry_run(args: &Args, session: &Session) -> Result<()> {
    let df = session.original();

    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Dataset inspection (no reasoning provider is called)");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", args.input);
    println!("  Format: {:?}", session.format());
    println!("  Rows: {}", df.height());
    println!("  Columns: {}", df.width());
    println!();

    println!("STRUCTURE");
    println!("{}", "-".repeat(40));
    println!("{}", inspect::frame_info(df));
    println!();

    println!("MISSING VALUES");
    println!("{}", "-".repeat(40));
    println!("{}", inspect::missing_values_report(df));
    println!();

    println!("OUTLIERS (Z-score threshold {})", DEFAULT_Z_THRESHOLD);
    println!("{}", "-".repeat(40));
    match inspect::outlier_report(df, DEFAULT_Z_THRESHOLD) {
        Ok(report) => println!("{}", report),
        Err(e) => println!("  Outlier detection failed: {}", e),
    }
    println!();

    println!("PLANNED POLICY");
    println!("{}", "-".repeat(40));
    println!(
        "  Missing values: {}",
        MissingValueStrategy::from(args.strategy).display_name()
    );
    println!("  Max steps: {}", args.max_steps);
    println!("  Wall clock: {}s", args.max_seconds);
    println!();

    println!("{}", "=".repeat(80));
    println!("To execute cleaning, run without --dry-run");
    println!("{}", "=".repeat(80));

    Ok(())
}

/// Print a human-readable summary of the cleaning results.
fn print_human_readable_summary(summary: &CleaningSummary, args: &Args, output_path: &Path) {
    println!();
    println!("{}", "=".repeat(80));
    if summary.budget_exhausted {
        println!("CLEANING COMPLETE (PARTIAL - planning budget exhausted)");
    } else {
        println!("CLEANING COMPLETE");
    }
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        args.input, summary.rows_before, summary.columns_before
    );
    println!(
        "Output: {} ({} rows x {} columns)",
        output_path.display(),
        summary.rows_after,
        summary.columns_after
    );
    println!();

    println!("Run Summary:");
    println!("  Provider: {} ({})", summary.provider, summary.model.as_deref().unwrap_or("-"));
    println!("  Strategy: {}", summary.strategy.display_name());
    println!("  Steps: {}", summary.steps_used);
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed, {:.1}%)",
        summary.rows_before,
        summary.rows_after,
        summary.rows_removed(),
        summary.rows_removed_percentage()
    );
    println!();

    if !summary.report.is_empty() {
        println!("Cleaning Report:");
        for line in &summary.report {
            println!("  - {}", line);
        }
        println!();
    }

    if let Some(agent_summary) = &summary.agent_summary {
        println!("Agent Summary:");
        println!("{}", agent_summary);
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}
