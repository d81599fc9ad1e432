//! Command handlers, one module per subcommand.

pub mod check;
pub mod completion;
pub mod plan;
pub mod sync;

use anyhow::{Context, Result, bail};
use epicsync_config::config::SyncConfig;
use epicsync_core::loader::load_epics;
use epicsync_core::model::Epic;
use epicsync_jira::client::JiraClient;

/// Loads the configured epics tree, failing when nothing loadable is found.
pub(crate) fn load_configured_epics(config: &SyncConfig) -> Result<Vec<Epic>> {
    let epics = load_epics(&config.epics_dir, &config.story_patterns)
        .with_context(|| format!("loading epics from {}", config.epics_dir.display()))?;
    if epics.is_empty() {
        bail!(
            "no epics found in {}\nHint: each epic needs its own directory with an epic.md",
            config.epics_dir.display()
        );
    }
    Ok(epics)
}

/// Runs the connection gate and returns the user's display name.
pub(crate) fn connect_or_bail(client: &mut JiraClient) -> Result<String> {
    if !client.connect() {
        match client.connect_error() {
            Some(e) => bail!("failed to connect to Jira at {}: {}", client.base_url(), e),
            None => bail!("failed to connect to Jira at {}", client.base_url()),
        }
    }
    Ok(client
        .identity()
        .and_then(|i| i.display_name.clone())
        .unwrap_or_else(|| "Unknown".to_string()))
}
