//! Clap CLI definitions for the `epicsync` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// epicsync -- replay markdown epics and user stories into Jira.
///
/// Reads one directory per epic (an `epic.md` plus story files) and creates
/// the matching Epic and Story issues, linking each story to its epic.
#[derive(Parser, Debug)]
#[command(
    name = "epicsync",
    about = "Replay markdown epics and user stories into Jira",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// YAML config file (default: ./epicsync.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Jira base URL (overrides $JIRA_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Personal access token (overrides $JIRA_PAT).
    #[arg(long, global = true, value_name = "TOKEN")]
    pub pat: Option<String>,

    /// Project key issues are created in (overrides $JIRA_PROJECT_KEY).
    #[arg(long, global = true, value_name = "KEY")]
    pub project: Option<String>,

    /// Directory holding one subdirectory per epic (overrides $EPICS_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub epics_dir: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create every epic and story in Jira and write the report.
    Sync(SyncArgs),

    /// Verify the Jira connection and credentials.
    Check,

    /// Show what would be created without contacting Jira.
    Plan,

    /// Generate shell completions.
    Completion(CompletionArgs),
}

/// Arguments for `epicsync sync`.
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Where to write the creation report
    /// (default: jira_creation_report_<PROJECT>.json).
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Arguments for `epicsync completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
