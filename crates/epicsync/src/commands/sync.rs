//! `epicsync sync` -- create every epic and story in Jira.
//!
//! The run is: connection gate, load, create (epic first, then its stories),
//! summary, report. Only the gate and loading can abort it; individual
//! creation failures are printed and skipped.

use anyhow::{Context, Result};
use epicsync_jira::client::JiraClient;
use epicsync_jira::report::write_report;
use epicsync_jira::sync::{NoopObserver, SyncObserver, sync_epics};
use tracing::info;

use super::{connect_or_bail, load_configured_epics};
use crate::cli::SyncArgs;
use crate::context::RuntimeContext;
use crate::output::{
    ConsoleObserver, output_json, print_banner, print_config, print_loaded, print_report_saved,
    print_summary,
};

/// Execute the `epicsync sync` command.
pub fn run(ctx: &RuntimeContext, args: &SyncArgs) -> Result<()> {
    let config = ctx.load_config(args.report.as_deref())?;
    let progress = ctx.show_progress();

    if progress {
        print_banner(&format!("Jira import for project {}", config.jira_project_key));
        print_config(&config);
    }

    config.require_token()?;

    let mut client = JiraClient::from_config(&config);
    let display_name = connect_or_bail(&mut client)?;
    if progress {
        println!("Connected to Jira as: {}", display_name);
        println!();
    }

    let mut epics = load_configured_epics(&config)?;
    if progress {
        print_loaded(&epics);
    }

    let mut console = ConsoleObserver;
    let mut silent = NoopObserver;
    let observer: &mut dyn SyncObserver = if progress { &mut console } else { &mut silent };
    let summary = sync_epics(&mut client, &mut epics, observer);
    info!(
        epics = summary.epics_created,
        stories = summary.stories_created,
        "sync finished"
    );

    let report_path = config.report_path();
    write_report(&report_path, client.log().entries())
        .with_context(|| format!("writing report to {}", report_path.display()))?;

    if ctx.json {
        output_json(&client.log().entries());
    } else {
        print_summary(client.log(), &summary);
        print_report_saved(&report_path);
    }

    Ok(())
}
