//! WellPulse - community wellness dashboard
//!
//! A CLI tool that renders a community health dashboard (statistics,
//! status distribution, recent activity, member profiles) and requests
//! AI-generated insights from a generative language model.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, unknown member, config, I/O)

mod analysis;
mod app;
mod cli;
mod config;
mod error;
mod insight;
mod models;
mod report;
mod roster;

use anyhow::{Context, Result};
use app::Dashboard;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use insight::{AnalysisSampling, GeminiBackend, InsightRequestor};
use report::DashboardReport;
use roster::{seed_trends, RosterStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so `[general] verbose` can raise the level
    let (config, config_source) = match load_config(&args) {
        Ok((mut config, source)) => {
            config.merge_with_args(&args);
            (config, source)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("WellPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    info!("Configuration: {}", config_source);

    if let Err(e) = run_dashboard(args, config).await {
        error!("Dashboard failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Handle --init-config: generate a default .wellpulse.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the model, sampling, and dashboard layout.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level(config.general.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Build the dashboard, run the requested actions and render the view.
async fn run_dashboard(args: Args, config: Config) -> Result<()> {
    let requestor = if args.offline {
        info!("Offline mode: insight actions disabled");
        None
    } else {
        let backend = GeminiBackend::from_env(&config.model)?;
        Some(Arc::new(InsightRequestor::new(
            Arc::new(backend),
            AnalysisSampling::from(&config.model),
        )))
    };

    let store = RosterStore::seeded();
    if store.is_empty() {
        warn!("Roster is empty; statistics will be zero");
    } else {
        info!("Loaded {} members", store.len());
    }

    let mut dashboard = Dashboard::new(store, seed_trends(), config.dashboard.clone(), requestor);
    dashboard.switch_view(args.view);

    if let Some(ref id) = args.member {
        dashboard
            .select_member(id)
            .with_context(|| format!("Cannot select member '{}'", id))?;
    }

    if args.analyze && !dashboard.start_community_analysis() && !args.quiet {
        eprintln!("ℹ️  Offline: skipping community analysis.");
    }
    if args.tip && !dashboard.start_member_tip()? && !args.quiet {
        eprintln!("ℹ️  Offline: skipping member tip.");
    }

    if dashboard.is_loading() {
        wait_for_insights(&mut dashboard, &config, args.quiet).await;
    }

    let report = DashboardReport::from_dashboard(&dashboard);
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                eprintln!("✅ Report saved to: {}", path.display());
            }
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Show a spinner on stderr while insight requests are in flight.
async fn wait_for_insights(dashboard: &mut Dashboard, config: &Config, quiet: bool) {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    match ProgressStyle::with_template("{spinner:.green} [{elapsed}] {msg}") {
        Ok(style) => spinner.set_style(style),
        Err(e) => warn!("Invalid spinner template: {}", e),
    }
    spinner.set_message(format!(
        "Asking {} for insights (timeout {}s)...",
        config.model.name, config.model.timeout_seconds
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    dashboard.settle().await;

    spinner.finish_and_clear();
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is installed, so it returns a description of where
/// the configuration came from instead of logging it.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, format!("loaded from {}", config_path.display())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, format!("loaded from {}", CONFIG_FILE_NAME))),
        Ok(None) => Ok((Config::default(), "defaults".to_string())),
        Err(e) => {
            eprintln!("⚠️  Failed to load {}: {:#}", CONFIG_FILE_NAME, e);
            Ok((Config::default(), "defaults".to_string()))
        }
    }
}
