//! Configuration types and loading for epicsync.
//!
//! The main entry point is [`SyncConfig`], built once at startup with
//! [`load_config`] and passed by reference to everything that needs it.
//!
//! Precedence, lowest to highest:
//!
//! 1. [`SyncConfig::default`]
//! 2. YAML config file (`--config`, or `epicsync.yaml` in the working directory)
//! 3. Environment: `JIRA_URL`, `JIRA_PAT`, `JIRA_PROJECT_KEY`, `EPICS_DIR`
//! 4. [`ConfigOverrides`] from command-line flags

use figment::Figment;
use figment::providers::{Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Merging or deserializing the configuration layers failed.
    #[error("failed to load configuration: {0}")]
    Extract(#[from] figment::Error),

    /// No access token was configured.
    #[error("JIRA_PAT is not set (export JIRA_PAT or pass --pat)")]
    MissingToken,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "epicsync.yaml";


// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the Jira server.
    #[serde(default = "default_jira_url")]
    pub jira_url: String,

    /// Personal access token sent as a bearer token.
    #[serde(default)]
    pub jira_pat: String,

    /// Key of the project issues are created in.
    #[serde(default = "default_project_key")]
    pub jira_project_key: String,

    /// Root directory holding one subdirectory per epic.
    #[serde(default = "default_epics_dir")]
    pub epics_dir: PathBuf,

    /// File name globs that identify story files inside an epic directory.
    #[serde(default = "default_story_patterns")]
    pub story_patterns: Vec<String>,

    /// Custom field holding the epic name on epic issues.
    #[serde(default = "default_epic_name_field")]
    pub epic_name_field: String,

    /// Custom field linking a story to its epic.
    #[serde(default = "default_epic_link_field")]
    pub epic_link_field: String,

    /// Where the creation report is written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            jira_url: default_jira_url(),
            jira_pat: String::new(),
            jira_project_key: default_project_key(),
            epics_dir: default_epics_dir(),
            story_patterns: default_story_patterns(),
            epic_name_field: default_epic_name_field(),
            epic_link_field: default_epic_link_field(),
            report_path: None,
        }
    }
}

fn default_jira_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_project_key() -> String {
    "MEET1".to_string()
}

fn default_epics_dir() -> PathBuf {
    PathBuf::from("./epics")
}

fn default_story_patterns() -> Vec<String> {
    vec!["MEET1-*.md".to_string(), "US-*.md".to_string()]
}

fn default_epic_name_field() -> String {
    "customfield_10103".to_string()
}

fn default_epic_link_field() -> String {
    "customfield_10101".to_string()
}

impl SyncConfig {
    /// Checks values that would otherwise fail deep inside a run.
    pub fn validate(&self) -> Result<()> {
        let url = self.jira_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid("jira_url", "must start with http:// or https://"));
        }
        if self.jira_project_key.trim().is_empty() {
            return Err(invalid("jira_project_key", "must not be empty"));
        }
        if self.story_patterns.is_empty() {
            return Err(invalid("story_patterns", "at least one pattern is required"));
        }
        for pattern in &self.story_patterns {
            if let Err(e) = globset::Glob::new(pattern) {
                return Err(invalid("story_patterns", &format!("'{pattern}': {e}")));
            }
        }
        Ok(())
    }

    /// Fails with [`ConfigError::MissingToken`] when no token is configured.
    pub fn require_token(&self) -> Result<()> {
        if self.jira_pat.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }

    /// The token as shown in console output.
    pub fn masked_token(&self) -> &'static str {
        if self.jira_pat.is_empty() {
            "NOT SET (required)"
        } else {
            "***"
        }
    }

    /// Configured report path, or `jira_creation_report_<PROJECT>.json`.
    pub fn report_path(&self) -> PathBuf {
        self.report_path.clone().unwrap_or_else(|| {
            PathBuf::from(format!("jira_creation_report_{}.json", self.jira_project_key))
        })
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Command-line overrides
// ---------------------------------------------------------------------------

/// Values given on the command line. `None` leaves the lower layers intact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_pat: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_project_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub epics_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Reads `JIRA_URL`, `JIRA_PAT`, `JIRA_PROJECT_KEY` and `EPICS_DIR`.
    ///
    /// Values are kept as raw strings, so `EPICS_DIR=2024` is a directory
    /// name and not a number. Unset or empty variables are skipped.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            jira_url: var("JIRA_URL"),
            jira_pat: var("JIRA_PAT"),
            jira_project_key: var("JIRA_PROJECT_KEY"),
            epics_dir: var("EPICS_DIR").map(PathBuf::from),
            report_path: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Picks the config file: the explicit path, else `epicsync.yaml` in `cwd`
/// when it exists.
pub fn resolve_config_file(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Builds the layered figment without extracting it.
pub fn figment(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(SyncConfig::default()));
    if let Some(path) = config_file {
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(Serialized::defaults(ConfigOverrides::from_env()))
        .merge(Serialized::defaults(overrides))
}

/// Loads and validates the configuration.
///
/// # Errors
///
/// Returns [`ConfigError::FileNotFound`] if `config_file` is given but
/// missing, [`ConfigError::Extract`] if a layer cannot be deserialized, and
/// [`ConfigError::InvalidValue`] if validation fails.
pub fn load_config(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<SyncConfig> {
    if let Some(path) = config_file {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
    }
    let config: SyncConfig = figment(config_file, overrides).extract()?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
