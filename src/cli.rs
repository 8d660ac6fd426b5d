//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// WellPulse - community wellness dashboard
///
/// Monitor your community's pulse from the terminal: member statistics,
/// status distribution, recent activity, and AI-generated insights.
///
/// Examples:
///   wellpulse
///   wellpulse --view members --member 2
///   wellpulse --view members --member 2 --tip
///   wellpulse --view insights --analyze --format json
///   wellpulse --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// View to render
    #[arg(long, default_value = "dashboard", value_name = "VIEW")]
    pub view: View,

    /// Select a member by id (shows the detail card in the members view)
    #[arg(short, long, value_name = "ID")]
    pub member: Option<String>,

    /// Generate an AI care tip for the selected member
    #[arg(long, requires = "member")]
    pub tip: bool,

    /// Run the AI community analysis
    #[arg(short, long)]
    pub analyze: bool,

    /// Never call the model; insight actions stay idle
    #[arg(long)]
    pub offline: bool,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the rendered view to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Generative model to use
    ///
    /// Can also be set via WELLPULSE_MODEL env var or .wellpulse.toml config.
    #[arg(long, env = "WELLPULSE_MODEL")]
    pub model: Option<String>,

    /// Generative language API base URL
    #[arg(long, value_name = "URL", env = "WELLPULSE_API_URL")]
    pub api_url: Option<String>,

    /// Temperature for the community analysis (0.0 - 2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .wellpulse.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .wellpulse.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Dashboard view (tab) to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum View {
    /// Statistics, status distribution and recent activity (default)
    #[default]
    Dashboard,
    /// Member list and detail card
    Members,
    /// AI community strategy report
    Insights,
}

/// Output format for the rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref api_url) = self.api_url {
            if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err("Temperature must be between 0.0 and 2.0".to_string());
            }
        }

        if self.tip && self.member.is_none() {
            return Err("--tip requires a member selected with --member".to_string());
        }

        if self.tip && self.view != View::Members {
            return Err("--tip is only available in the members view".to_string());
        }

        if self.analyze && self.view != View::Insights {
            return Err("--analyze is only available in the insights view".to_string());
        }

        if let Some(ref member) = self.member {
            if member.trim().is_empty() {
                return Err("Member id must not be empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `[general] verbose` setting; `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
