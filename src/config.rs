//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.wellpulse.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".wellpulse.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Dashboard settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Write the rendered view to this file instead of stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Generative model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub name: String,

    /// Base URL of the generative language API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Temperature for community analysis.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling for community analysis.
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Thinking token budget (0 disables thinking).
    #[serde(default)]
    pub thinking_budget: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            thinking_budget: 0,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.8
}

fn default_timeout() -> u64 {
    60
}

/// Where the dashboard's engagement score comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum EngagementSource {
    /// A fixed score supplied by configuration.
    Fixed { value: u8 },
    /// The rounded mean of the trend series' engagement figures.
    TrendMean,
}

impl Default for EngagementSource {
    fn default() -> Self {
        EngagementSource::Fixed { value: 84 }
    }
}

/// Dashboard view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows in the recent activity table.
    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,

    /// Label for the "Top Interest" card.
    #[serde(default = "default_top_condition_concern")]
    pub top_condition_concern: String,

    /// Cells in the stress gauge.
    #[serde(default = "default_stress_gauge_segments")]
    pub stress_gauge_segments: usize,

    /// Source of the engagement score.
    #[serde(default)]
    pub engagement: EngagementSource,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_activity_limit: default_recent_activity_limit(),
            top_condition_concern: default_top_condition_concern(),
            stress_gauge_segments: default_stress_gauge_segments(),
            engagement: EngagementSource::default(),
        }
    }
}

fn default_recent_activity_limit() -> usize {
    4
}

fn default_top_condition_concern() -> String {
    "Sleep Hygiene".to_string()
}

fn default_stress_gauge_segments() -> usize {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.wellpulse.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref model) = args.model {
            self.model.name = model.clone();
        }
        if let Some(ref api_url) = args.api_url {
            self.model.api_url = api_url.clone();
        }
        if let Some(temperature) = args.temperature {
            self.model.temperature = temperature;
        }
        if let Some(timeout) = args.timeout {
            self.model.timeout_seconds = timeout;
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.clone());
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.name, "gemini-3-flash-preview");
        assert_eq!(config.model.api_key_env, "API_KEY");
        assert_eq!(config.dashboard.recent_activity_limit, 4);
        assert_eq!(
            config.dashboard.engagement,
            EngagementSource::Fixed { value: 84 }
        );
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "dashboard.md"
verbose = true

[model]
name = "gemini-2.5-flash"
temperature = 0.2

[dashboard]
recent_activity_limit = 3
top_condition_concern = "Stress"
engagement = { source = "trend-mean" }
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, Some(PathBuf::from("dashboard.md")));
        assert!(config.general.verbose);
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert_eq!(config.model.temperature, 0.2);
        assert_eq!(config.model.top_p, 0.8);
        assert_eq!(config.dashboard.recent_activity_limit, 3);
        assert_eq!(config.dashboard.top_condition_concern, "Stress");
        assert_eq!(config.dashboard.engagement, EngagementSource::TrendMean);
    }

    #[test]
    fn test_parse_fixed_engagement() {
        let config: Config = toml::from_str(
            r#"
[dashboard.engagement]
source = "fixed"
value = 70
"#,
        )
        .unwrap();
        assert_eq!(
            config.dashboard.engagement,
            EngagementSource::Fixed { value: 70 }
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[model]"));
        assert!(toml_str.contains("[dashboard]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.model.name, "gemini-3-flash-preview");
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[model]\ntimeout_seconds = 5\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.model.timeout_seconds, 5);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[model\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_config_verbose_raises_log_level() {
        let mut config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        let args = crate::cli::Args {
            view: crate::cli::View::Dashboard,
            member: None,
            tip: false,
            analyze: false,
            offline: false,
            format: crate::cli::OutputFormat::Markdown,
            output: None,
            model: None,
            api_url: None,
            temperature: None,
            timeout: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        };
        config.merge_with_args(&args);

        assert!(config.general.verbose);
        assert_eq!(
            args.log_level(config.general.verbose),
            tracing::Level::DEBUG
        );
    }
}
