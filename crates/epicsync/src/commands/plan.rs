//! `epicsync plan` -- show what `sync` would create, without contacting Jira.

use anyhow::Result;
use epicsync_jira::payload::priority_name;
use serde::Serialize;

use super::load_configured_epics;
use crate::context::RuntimeContext;
use crate::output::{output_json, print_banner, print_plan};

#[derive(Serialize)]
struct PlannedStory<'a> {
    id: &'a str,
    title: &'a str,
    priority: &'static str,
    story_points: u32,
}

#[derive(Serialize)]
struct PlannedEpic<'a> {
    id: &'a str,
    title: &'a str,
    priority: &'static str,
    stories: Vec<PlannedStory<'a>>,
}

/// Execute the `epicsync plan` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let config = ctx.load_config(None)?;
    let epics = load_configured_epics(&config)?;

    if ctx.json {
        let planned: Vec<PlannedEpic<'_>> = epics
            .iter()
            .map(|epic| PlannedEpic {
                id: &epic.id,
                title: &epic.title,
                priority: priority_name(&epic.priority),
                stories: epic
                    .user_stories
                    .iter()
                    .map(|story| PlannedStory {
                        id: &story.id,
                        title: &story.title,
                        priority: priority_name(&story.priority),
                        story_points: story.story_points,
                    })
                    .collect(),
            })
            .collect();
        output_json(&planned);
        return Ok(());
    }

    if !ctx.quiet {
        print_banner(&format!("Plan for project {}", config.jira_project_key));
    }
    print_plan(&epics);
    Ok(())
}
