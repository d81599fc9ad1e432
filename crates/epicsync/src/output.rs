//! Output formatting helpers for the `epicsync` CLI.
//!
//! Provides JSON output, the configuration banner, progress lines for loaded
//! and created issues, and the end-of-run summary.

use std::io::{self, Write};
use std::path::Path;

use epicsync_config::config::SyncConfig;
use epicsync_core::enums::Priority;
use epicsync_core::model::{Epic, UserStory};
use epicsync_jira::error::JiraError;
use epicsync_jira::payload::priority_name;
use epicsync_jira::report::{CreatedIssue, IssueLog};
use epicsync_jira::sync::{SyncObserver, SyncSummary};
use epicsync_ui::styles::{
    SEPARATOR_HEAVY, SEPARATOR_LIGHT, render_accent, render_bold, render_category, render_fail,
    render_fail_icon, render_muted, render_pass_icon, render_priority, render_skip_icon,
    render_warn_icon,
};
use serde::Serialize;

/// Print a value as pretty JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Title banner shown at the start of `sync` and `plan`.
pub fn print_banner(title: &str) {
    println!("{}", SEPARATOR_HEAVY);
    println!("{}", render_bold(title));
    println!("{}", SEPARATOR_HEAVY);
}

/// Configuration block. The token is never printed.
pub fn print_config(config: &SyncConfig) {
    println!();
    println!("{}", render_category("Configuration"));
    println!("  Jira URL:    {}", config.jira_url);
    println!("  Project:     {}", config.jira_project_key);
    println!("  Epics dir:   {}", config.epics_dir.display());
    println!("  Jira PAT:    {}", config.masked_token());
    println!();
}

/// Progress lines for everything the loader found.
pub fn print_loaded(epics: &[Epic]) {
    for epic in epics {
        println!("Loaded Epic: {} - {}", epic.id, epic.title);
        for story in &epic.user_stories {
            println!("  - Loaded Story: {} - {}", story.id, story.title);
        }
    }
    let stories: usize = epics.iter().map(|e| e.user_stories.len()).sum();
    println!(
        "{}",
        render_muted(&format!("Loaded {} epics with {} stories", epics.len(), stories))
    );
}

/// `[P0 -> Highest]`, flagged when the local value is not a known level.
fn priority_label(priority: &Priority) -> String {
    let label = format!(
        "[{} -> {}]",
        render_priority(priority),
        priority_name(priority)
    );
    if priority.is_builtin() {
        label
    } else {
        format!("{label} {} unknown priority", render_warn_icon())
    }
}

/// Dry-run listing: what `sync` would send, with mapped priorities.
pub fn print_plan(epics: &[Epic]) {
    for epic in epics {
        println!();
        println!(
            "{} {} - {}  {}",
            render_accent("Epic"),
            epic.id,
            epic.title,
            priority_label(&epic.priority),
        );
        if !epic.business_goal.is_empty() {
            println!("  {}", render_muted(&format!("Goal: {}", epic.business_goal)));
        }
        for story in &epic.user_stories {
            println!(
                "  - {} - {} ({} points)  {}",
                story.id,
                story.title,
                story.story_points,
                priority_label(&story.priority),
            );
        }
    }
    let points: u32 = epics.iter().map(Epic::total_story_points).sum();
    println!();
    println!("{}", SEPARATOR_LIGHT);
    println!("Total story points: {}", points);
}

fn failure_detail(error: &JiraError) -> String {
    match error {
        JiraError::Status { status, body } => format!("Status: {status}, Response: {body}"),
        other => other.to_string(),
    }
}

/// Prints one line per creation outcome.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl SyncObserver for ConsoleObserver {
    fn epic_started(&mut self, epic: &Epic) {
        println!();
        println!("Creating epic: {} - {}", epic.id, epic.title);
    }

    fn epic_created(&mut self, epic: &Epic, key: &str) {
        println!("{} Created Epic: {} - {}", render_pass_icon(), key, epic.title);
    }

    fn epic_failed(&mut self, epic: &Epic, error: &JiraError) {
        println!(
            "{} Failed to create epic {}: {}",
            render_fail_icon(),
            epic.id,
            render_fail(&failure_detail(error))
        );
        if !epic.user_stories.is_empty() {
            println!(
                "  {} Skipping {} stories",
                render_skip_icon(),
                epic.user_stories.len()
            );
        }
    }

    fn story_created(&mut self, story: &UserStory, key: &str) {
        println!("  {} Created Story: {} - {}", render_pass_icon(), key, story.title);
    }

    fn story_failed(&mut self, story: &UserStory, error: &JiraError) {
        println!(
            "  {} Failed to create story {}: {}",
            render_fail_icon(),
            story.id,
            render_fail(&failure_detail(error))
        );
    }
}

/// End-of-run summary listing every created issue.
pub fn print_summary(log: &IssueLog, summary: &SyncSummary) {
    println!();
    println!("{}", SEPARATOR_HEAVY);
    println!("{}", render_category("Summary"));
    println!("{}", SEPARATOR_HEAVY);
    println!("Total issues created: {}", log.len());

    println!();
    println!("Epics created: {}", summary.epics_created);
    for entry in log.epics() {
        println!("  - {}: {}", entry.jira_key(), entry.title());
    }

    println!();
    println!("User Stories created: {}", summary.stories_created);
    for entry in log.stories() {
        if let CreatedIssue::Story {
            jira_key,
            title,
            epic,
            story_points,
            ..
        } = entry
        {
            println!("  - {jira_key}: {title} ({story_points} points) -> {epic}");
        }
    }

    if summary.has_failures() || summary.stories_skipped > 0 {
        println!();
        println!(
            "{} {} epics failed, {} stories failed, {} stories skipped",
            render_warn_icon(),
            summary.epics_failed,
            summary.stories_failed,
            summary.stories_skipped
        );
    }
}

pub fn print_report_saved(path: &Path) {
    println!();
    println!("Report saved to: {}", path.display());
}
