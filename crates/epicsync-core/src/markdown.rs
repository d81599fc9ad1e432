//! Field and checklist extraction for epic and story markdown.
//!
//! The input is an informal, line-oriented micro-format:
//!
//! ```text
//! # Epic: Login
//!
//! **Epic ID:** E1
//! **Priority:** P0
//! **Business Goal:** Let users sign in.
//!
//! ---
//!
//! ## Success Criteria
//!
//! - [ ] Users can sign in
//! - [x] Sessions expire
//! ```
//!
//! Labeled fields run until the next labeled field, a horizontal rule, or the
//! end of the text. Checklist sections are the `- [ ]` / `- [x]` lines
//! directly under a `## <header>` heading.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::enums::Priority;
use crate::model::{DEFAULT_STORY_POINTS, Epic, UNKNOWN_TITLE, UserStory};

static EPIC_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# Epic: (.+)$").expect("valid regex"));

static STORY_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# User Story: (.+)$").expect("valid regex"));

static CHECKLIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[[ x]\]\s*(.+)$").expect("valid regex"));

static STORY_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)## User Story\r?\n\r?\n(.+?)\r?\n---").expect("valid regex"));

/// Field terminators: the next labeled field or a horizontal rule.
const FIELD_TERMINATORS: [&str; 2] = ["\n**", "\n---"];

/// Extracts the value of a `**<field_name>:** <value>` field.
///
/// `field_name` is matched literally and case-sensitively. Returns `None`
/// when the field is missing or its value is blank.
pub fn extract_field(text: &str, field_name: &str) -> Option<String> {
    let label = format!("**{field_name}:**");
    let start = text.find(&label)? + label.len();
    let rest = &text[start..];

    let end = FIELD_TERMINATORS
        .iter()
        .filter_map(|t| rest.find(t))
        .min()
        .unwrap_or(rest.len());

    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extracts the checklist items under a `## <section_header>` heading.
///
/// Blank lines between the heading and the list are skipped. Collection
/// stops at the first line that is not a checklist item. A missing heading
/// or a heading without items yields an empty vector.
pub fn extract_list_items(text: &str, section_header: &str) -> Vec<String> {
    let heading = format!("## {section_header}");
    let mut lines = text.lines().skip_while(|line| !line.starts_with(&heading));
    if lines.next().is_none() {
        return Vec::new();
    }

    lines
        .skip_while(|line| line.trim().is_empty())
        .map_while(|line| {
            CHECKLIST_ITEM
                .captures(line.trim_end())
                .map(|caps| caps[1].trim().to_string())
        })
        .collect()
}

/// Parses story points, falling back to [`DEFAULT_STORY_POINTS`].
///
/// Only a plain run of ASCII digits counts as an estimate.
pub fn parse_story_points(value: Option<&str>) -> u32 {
    match value {
        Some(v) if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) => {
            v.parse().unwrap_or(DEFAULT_STORY_POINTS)
        }
        _ => DEFAULT_STORY_POINTS,
    }
}

fn heading_title(re: &Regex, text: &str) -> String {
    re.captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn priority_field(text: &str) -> Priority {
    extract_field(text, "Priority")
        .map(Priority::from)
        .unwrap_or_default()
}

/// Builds an [`Epic`] from markdown text.
///
/// Returns `None` when the `Epic ID` field is missing.
pub fn parse_epic_str(text: &str) -> Option<Epic> {
    let id = extract_field(text, "Epic ID")?;
    let business_goal = extract_field(text, "Business Goal").unwrap_or_default();

    Some(Epic {
        id,
        title: heading_title(&EPIC_TITLE, text),
        priority: priority_field(text),
        description: business_goal.clone(),
        business_goal,
        success_criteria: extract_list_items(text, "Success Criteria"),
        user_stories: Vec::new(),
        jira_key: None,
    })
}

/// Builds a [`UserStory`] owned by `epic_id` from markdown text.
///
/// Returns `None` when the `Story ID` field is missing.
pub fn parse_story_str(text: &str, epic_id: &str) -> Option<UserStory> {
    let id = extract_field(text, "Story ID")?;
    let title = heading_title(&STORY_TITLE, text);

    let points = extract_field(text, "Story Points");
    let story_points = parse_story_points(points.as_deref());

    let description = STORY_SECTION
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| title.clone());

    Some(UserStory {
        id,
        priority: priority_field(text),
        story_points,
        description,
        acceptance_criteria: extract_list_items(text, "Acceptance Criteria"),
        epic_id: epic_id.to_string(),
        title,
        jira_key: None,
    })
}

/// Reads and parses an epic file. Unreadable or incomplete files yield `None`.
pub fn parse_epic(path: &Path) -> Option<Epic> {
    let text = read_markdown(path)?;
    let epic = parse_epic_str(&text);
    if epic.is_none() {
        debug!(path = %path.display(), "no Epic ID field, skipping");
    }
    epic
}

/// Reads and parses a story file. Unreadable or incomplete files yield `None`.
pub fn parse_story(path: &Path, epic_id: &str) -> Option<UserStory> {
    let text = read_markdown(path)?;
    let story = parse_story_str(&text, epic_id);
    if story.is_none() {
        debug!(path = %path.display(), "no Story ID field, skipping");
    }
    story
}

fn read_markdown(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read markdown file");
            None
        }
    }
}
