//! CLI definition, tracing setup, and the import command.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use termsync_core::pipeline::{ImportConfig, run_import};
use termsync_core::{ImportProgress, ReconciliationOutcome};
use termsync_shared::{init_config, load_config, load_config_from, validate_store_token};
use termsync_store::HttpStore;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// termsync — reconcile a glossary batch against the content store.
#[derive(Parser)]
#[command(
    name = "termsync",
    version,
    about = "Import glossary term batches into the content store, idempotently.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to the batch input file (JSON array of term records).
    #[arg(required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Preview mode: resolve and diff, but perform no writes.
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path (defaults to ~/.termsync/termsync.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a default config file and exit.
    #[arg(long)]
    pub init_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "termsync=warn",
        1 => "termsync=info",
        2 => "termsync=debug",
        _ => "termsync=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if cli.init_config {
        let path = init_config()?;
        println!("Config initialized at: {}", path.display());
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| eyre!("missing batch input file argument"))?;

    cmd_import(input, cli.dry_run, cli.config.as_deref()).await
}

async fn cmd_import(input: &Path, dry_run: bool, config_path: Option<&Path>) -> Result<()> {
    // Validate store credentials before any batch work
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    let token = validate_store_token(&config)?;
    let store = HttpStore::new(&config.store, token)?;

    info!(input = %input.display(), dry_run, "starting import");

    let reporter = CliProgress::new();

    let import_config = ImportConfig {
        input: input.to_path_buf(),
        dry_run,
    };

    let summary = run_import(&import_config, &store, &reporter).await?;
    reporter.finish();

    println!();
    println!("{}", summary.render());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
///
/// Per-record outcome lines print through the spinner so they stay on
/// their own lines while the spinner keeps ticking below them.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ImportProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn record_done(&self, outcome: &ReconciliationOutcome, current: usize, total: usize) {
        self.spinner.println(outcome.line());
        self.spinner.set_message(format!("[{current}/{total}]"));
    }
}
