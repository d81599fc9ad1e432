//! Request bodies for `POST /rest/api/2/issue`.

use epicsync_core::enums::Priority;
use epicsync_core::model::{Epic, UserStory};
use serde_json::{Value, json};

/// Jira issue type for epics.
pub const EPIC_ISSUE_TYPE: &str = "Epic";
/// Jira issue type for user stories.
pub const STORY_ISSUE_TYPE: &str = "Story";

/// Maps a planning priority onto a Jira priority name.
///
/// Anything outside `P0`..`P3` lands on "Medium".
pub fn priority_name(priority: &Priority) -> &'static str {
    match priority {
        Priority::P0 => "Highest",
        Priority::P1 => "High",
        Priority::P2 => "Medium",
        Priority::P3 => "Low",
        Priority::Custom(_) => "Medium",
    }
}

/// Description sent for an epic: its description followed by the business goal.
pub fn epic_description(epic: &Epic) -> String {
    format!(
        "{}\n\nBusiness Goal: {}",
        epic.description, epic.business_goal
    )
}

/// Builds the create payload for an epic.
///
/// `epic_name_field` is the custom field Jira requires for the epic name.
pub fn epic_payload(epic: &Epic, project_key: &str, epic_name_field: &str) -> Value {
    let mut fields = json!({
        "project": { "key": project_key },
        "issuetype": { "name": EPIC_ISSUE_TYPE },
        "summary": epic.title,
        "description": epic_description(epic),
        "priority": { "name": priority_name(&epic.priority) },
        "labels": ["epic", epic.id],
    });
    fields[epic_name_field] = Value::String(epic.title.clone());
    json!({ "fields": fields })
}

/// Builds the create payload for a story linked to `epic_key`.
pub fn story_payload(
    story: &UserStory,
    epic_key: &str,
    project_key: &str,
    epic_link_field: &str,
) -> Value {
    let mut fields = json!({
        "project": { "key": project_key },
        "issuetype": { "name": STORY_ISSUE_TYPE },
        "summary": story.title,
        "description": story.description,
        "priority": { "name": priority_name(&story.priority) },
        "labels": ["user-story", story.id],
    });
    fields[epic_link_field] = Value::String(epic_key.to_string());
    json!({ "fields": fields })
}
