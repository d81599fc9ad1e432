//! `epicsync check` -- verify the Jira connection and credentials.

use anyhow::Result;
use epicsync_jira::client::JiraClient;

use super::connect_or_bail;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `epicsync check` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let config = ctx.load_config(None)?;
    config.require_token()?;

    let mut client = JiraClient::from_config(&config);
    let display_name = connect_or_bail(&mut client)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "url": client.base_url(),
            "display_name": display_name,
            "name": client.identity().and_then(|i| i.name.as_deref()),
        }));
    } else if !ctx.quiet {
        println!("Connected to Jira as: {}", display_name);
    }

    Ok(())
}
