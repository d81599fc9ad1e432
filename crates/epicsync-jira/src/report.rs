//! The log of created issues and the JSON report written from it.
//!
//! The report is a JSON array with one object per successful creation:
//!
//! ```json
//! [
//!   { "type": "Epic", "id": "E1", "title": "Login", "jira_key": "PROJ-1" },
//!   { "type": "User Story", "id": "S1", "title": "Sign in", "jira_key": "PROJ-2",
//!     "epic": "PROJ-1", "story_points": 3 }
//! ]
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One successfully created issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CreatedIssue {
    #[serde(rename = "Epic")]
    Epic {
        id: String,
        title: String,
        jira_key: String,
    },

    #[serde(rename = "User Story")]
    Story {
        id: String,
        title: String,
        jira_key: String,
        /// Key of the parent epic.
        epic: String,
        story_points: u32,
    },
}

impl CreatedIssue {
    pub fn jira_key(&self) -> &str {
        match self {
            Self::Epic { jira_key, .. } | Self::Story { jira_key, .. } => jira_key,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Epic { title, .. } | Self::Story { title, .. } => title,
        }
    }

    pub fn is_epic(&self) -> bool {
        matches!(self, Self::Epic { .. })
    }
}

/// Append-only record of the issues created during a run.
#[derive(Debug, Default, Clone)]
pub struct IssueLog {
    entries: Vec<CreatedIssue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: CreatedIssue) {
        self.entries.push(issue);
    }

    pub fn entries(&self) -> &[CreatedIssue] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Created epics, in creation order.
    pub fn epics(&self) -> impl Iterator<Item = &CreatedIssue> {
        self.entries.iter().filter(|e| e.is_epic())
    }

    /// Created stories, in creation order.
    pub fn stories(&self) -> impl Iterator<Item = &CreatedIssue> {
        self.entries.iter().filter(|e| !e.is_epic())
    }
}

/// Writes the entries as a pretty-printed JSON array.
pub fn write_report(path: &Path, entries: &[CreatedIssue]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
