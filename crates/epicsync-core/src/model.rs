//! Epic and user story records built from markdown.

use serde::Serialize;

use crate::enums::Priority;

/// Title used when a file has no recognizable title heading.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Story point estimate used when the field is missing or not an integer.
pub const DEFAULT_STORY_POINTS: u32 = 5;

/// A planning epic read from an `epic.md` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Epic {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub description: String,
    pub business_goal: String,
    pub success_criteria: Vec<String>,
    pub user_stories: Vec<UserStory>,

    /// Tracker key, set once the epic has been created remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_key: Option<String>,
}

impl Epic {
    /// Returns `true` if a story with this id is already attached.
    pub fn has_story(&self, story_id: &str) -> bool {
        self.user_stories.iter().any(|s| s.id == story_id)
    }

    /// Attaches a story unless one with the same id is already present.
    ///
    /// Returns `false` when the story was dropped as a duplicate.
    pub fn add_story(&mut self, story: UserStory) -> bool {
        if self.has_story(&story.id) {
            return false;
        }
        self.user_stories.push(story);
        true
    }

    /// Sum of the story point estimates of all attached stories.
    pub fn total_story_points(&self) -> u32 {
        self.user_stories.iter().map(|s| s.story_points).sum()
    }
}

/// A user story read from a story file next to its epic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStory {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub story_points: u32,
    pub description: String,
    pub acceptance_criteria: Vec<String>,

    /// Id of the owning epic (lookup only).
    pub epic_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_key: Option<String>,
}
