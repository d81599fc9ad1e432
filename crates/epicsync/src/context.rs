//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs before it
//! touches the network: global flags and the inputs to configuration loading.
//! The configuration itself is resolved lazily so `completion` and help never
//! fail on a bad environment.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use epicsync_config::config::{ConfigOverrides, SyncConfig, load_config, resolve_config_file};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Config file to layer over the defaults, if any.
    pub config_file: Option<PathBuf>,

    /// Values given on the command line.
    pub overrides: ConfigOverrides,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_cwd(global, &cwd)
    }

    fn with_cwd(global: &GlobalArgs, cwd: &Path) -> Self {
        let overrides = ConfigOverrides {
            jira_url: global.url.clone(),
            jira_pat: global.pat.clone(),
            jira_project_key: global.project.clone(),
            epics_dir: global.epics_dir.clone(),
            report_path: None,
        };

        Self {
            config_file: resolve_config_file(global.config.as_deref(), cwd),
            overrides,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Loads the configuration, optionally overriding the report path.
    pub fn load_config(&self, report: Option<&Path>) -> Result<SyncConfig> {
        let mut overrides = self.overrides.clone();
        if let Some(path) = report {
            overrides.report_path = Some(path.to_path_buf());
        }
        load_config(self.config_file.as_deref(), &overrides).context("loading configuration")
    }

    /// Whether human-readable progress should be printed.
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
