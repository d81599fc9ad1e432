//! Jira REST v2 client for epic and story creation.
//!
//! Every call is a single blocking request; there are no retries. A failed
//! creation leaves the record without a key and adds nothing to the log.

use std::collections::HashMap;

use epicsync_config::config::SyncConfig;
use epicsync_core::model::{Epic, UserStory};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{JiraError, Result};
use crate::payload::{epic_payload, story_payload};
use crate::report::{CreatedIssue, IssueLog};
use crate::transport::{HttpReply, Transport, UreqTransport};

/// Path of the identity-check endpoint.
pub const MYSELF_PATH: &str = "/rest/api/2/myself";
/// Path of the issue-creation endpoint.
pub const ISSUE_PATH: &str = "/rest/api/2/issue";

/// The authenticated Jira user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    #[serde(default)]
    key: Option<String>,
}

/// Creates issues in one Jira project and remembers what it created.
pub struct JiraClient<T = UreqTransport> {
    base_url: String,
    token: String,
    project_key: String,
    epic_name_field: String,
    epic_link_field: String,
    transport: T,
    epic_keys: HashMap<String, String>,
    log: IssueLog,
    identity: Option<Identity>,
    connect_error: Option<JiraError>,
}

impl JiraClient<UreqTransport> {
    /// Builds a client that talks HTTP through `ureq`.
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> JiraClient<T> {
    /// Builds a client over an arbitrary transport.
    pub fn with_transport(config: &SyncConfig, transport: T) -> Self {
        Self {
            base_url: config.jira_url.trim().trim_end_matches('/').to_string(),
            token: config.jira_pat.clone(),
            project_key: config.jira_project_key.clone(),
            epic_name_field: config.epic_name_field.clone(),
            epic_link_field: config.epic_link_field.clone(),
            transport,
            epic_keys: HashMap::new(),
            log: IssueLog::new(),
            identity: None,
            connect_error: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issues created so far.
    pub fn log(&self) -> &IssueLog {
        &self.log
    }

    /// Tracker key assigned to a local epic id, if it was created.
    pub fn epic_key(&self, epic_id: &str) -> Option<&str> {
        self.epic_keys.get(epic_id).map(String::as_str)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches the authenticated user. Anything but HTTP 200 is an error.
    pub fn myself(&self) -> Result<Identity> {
        let reply = self.transport.get(&self.url(MYSELF_PATH), &self.token)?;
        if reply.status != 200 {
            return Err(JiraError::Status {
                status: reply.status,
                body: reply.body,
            });
        }
        // The body is informational; an unparseable one yields an empty identity.
        Ok(serde_json::from_str(&reply.body).unwrap_or_default())
    }

    /// Runs the identity check and returns `true` only on HTTP 200.
    ///
    /// The outcome is kept: [`identity`](Self::identity) on success,
    /// [`connect_error`](Self::connect_error) on failure.
    pub fn connect(&mut self) -> bool {
        match self.myself() {
            Ok(identity) => {
                info!(user = ?identity.display_name, "connected to Jira");
                self.identity = Some(identity);
                self.connect_error = None;
                true
            }
            Err(e) => {
                warn!(error = %e, "Jira connection check failed");
                self.identity = None;
                self.connect_error = Some(e);
                false
            }
        }
    }

    /// The user found by the last successful [`connect`](Self::connect).
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Why the last [`connect`](Self::connect) failed.
    pub fn connect_error(&self) -> Option<&JiraError> {
        self.connect_error.as_ref()
    }

    /// Creates `epic` and stores the assigned key on it.
    pub fn create_epic(&mut self, epic: &mut Epic) -> Result<String> {
        let payload = epic_payload(epic, &self.project_key, &self.epic_name_field);
        debug!(epic = %epic.id, "creating epic");

        let key = match self.post_issue(&payload) {
            Ok(key) => key,
            Err(e) => {
                warn!(epic = %epic.id, error = %e, "failed to create epic");
                return Err(e);
            }
        };

        epic.jira_key = Some(key.clone());
        self.epic_keys.insert(epic.id.clone(), key.clone());
        self.log.push(CreatedIssue::Epic {
            id: epic.id.clone(),
            title: epic.title.clone(),
            jira_key: key.clone(),
        });
        info!(epic = %epic.id, key = %key, "created epic");
        Ok(key)
    }

    /// Creates `story` under the epic with key `epic_key`.
    pub fn create_story(&mut self, story: &mut UserStory, epic_key: &str) -> Result<String> {
        let payload = story_payload(story, epic_key, &self.project_key, &self.epic_link_field);
        debug!(story = %story.id, epic_key, "creating story");

        let key = match self.post_issue(&payload) {
            Ok(key) => key,
            Err(e) => {
                warn!(story = %story.id, error = %e, "failed to create story");
                return Err(e);
            }
        };

        story.jira_key = Some(key.clone());
        self.log.push(CreatedIssue::Story {
            id: story.id.clone(),
            title: story.title.clone(),
            jira_key: key.clone(),
            epic: epic_key.to_string(),
            story_points: story.story_points,
        });
        info!(story = %story.id, key = %key, "created story");
        Ok(key)
    }

    fn post_issue(&self, payload: &serde_json::Value) -> Result<String> {
        let reply = self
            .transport
            .post_json(&self.url(ISSUE_PATH), &self.token, payload)?;
        issue_key(reply)
    }
}

/// Extracts the issue key from a create response.
fn issue_key(reply: HttpReply) -> Result<String> {
    if !matches!(reply.status, 200 | 201) {
        return Err(JiraError::Status {
            status: reply.status,
            body: reply.body,
        });
    }
    let created: CreatedResponse = serde_json::from_str(&reply.body)?;
    match created.key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(JiraError::MissingKey { body: reply.body }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use epicsync_core::enums::Priority;
    use pretty_assertions::assert_eq;

    fn config() -> SyncConfig {
        SyncConfig {
            jira_url: "https://jira.example.com/".into(),
            jira_pat: "token".into(),
            jira_project_key: "PROJ".into(),
            ..Default::default()
        }
    }

    fn epic() -> Epic {
        Epic {
            id: "E1".into(),
            title: "Login".into(),
            priority: Priority::P0,
            description: "Goal".into(),
            business_goal: "Goal".into(),
            success_criteria: Vec::new(),
            user_stories: Vec::new(),
            jira_key: None,
        }
    }

    fn story() -> UserStory {
        UserStory {
            id: "S1".into(),
            title: "Sign in".into(),
            priority: Priority::P1,
            story_points: 3,
            description: "As a user".into(),
            acceptance_criteria: Vec::new(),
            epic_id: "E1".into(),
            jira_key: None,
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = JiraClient::with_transport(&config(), StubTransport::new());
        assert_eq!(client.base_url(), "https://jira.example.com");
    }

    #[test]
    fn connect_requires_200() {
        let stub = StubTransport::new().reply(200, r#"{"displayName":"Ada Lovelace","name":"ada"}"#);
        let client = JiraClient::with_transport(&config(), stub);
        let identity = client.myself().unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("Ada Lovelace"));

        let calls = client.transport().calls();
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].url, "https://jira.example.com/rest/api/2/myself");
        assert_eq!(calls[0].token, "token");

        let stub = StubTransport::new().reply(401, "Unauthorized");
        let mut client = JiraClient::with_transport(&config(), stub);
        assert!(!client.connect());
        assert!(client.identity().is_none());
        assert_eq!(client.connect_error().and_then(JiraError::status), Some(401));

        let stub = StubTransport::new().fail("connection refused");
        let mut client = JiraClient::with_transport(&config(), stub);
        assert!(!client.connect());
        assert!(matches!(client.connect_error(), Some(JiraError::Transport(_))));
    }

    #[test]
    fn connect_keeps_identity() {
        let stub = StubTransport::new().reply(200, r#"{"displayName":"Grace Hopper"}"#);
        let mut client = JiraClient::with_transport(&config(), stub);
        assert!(client.connect());
        assert!(client.connect_error().is_none());
        assert_eq!(
            client.identity().and_then(|i| i.display_name.as_deref()),
            Some("Grace Hopper")
        );
    }

    #[test]
    fn create_epic_records_key() {
        let stub = StubTransport::new().reply(201, r#"{"id":"10000","key":"PROJ-1"}"#);
        let mut client = JiraClient::with_transport(&config(), stub);
        let mut e = epic();

        let key = client.create_epic(&mut e).unwrap();
        assert_eq!(key, "PROJ-1");
        assert_eq!(e.jira_key.as_deref(), Some("PROJ-1"));
        assert_eq!(client.epic_key("E1"), Some("PROJ-1"));
        assert_eq!(client.log().len(), 1);

        let calls = client.transport().calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].url, "https://jira.example.com/rest/api/2/issue");
        let body = calls[0].body.as_ref().unwrap();
        assert_eq!(body["fields"]["issuetype"]["name"], "Epic");
        assert_eq!(body["fields"]["project"]["key"], "PROJ");
    }

    #[test]
    fn create_epic_accepts_200() {
        let stub = StubTransport::new().reply(200, r#"{"key":"PROJ-9"}"#);
        let mut client = JiraClient::with_transport(&config(), stub);
        assert_eq!(client.create_epic(&mut epic()).unwrap(), "PROJ-9");
    }

    #[test]
    fn create_epic_failure_leaves_no_trace() {
        let stub = StubTransport::new().reply(500, "boom");
        let mut client = JiraClient::with_transport(&config(), stub);
        let mut e = epic();

        let err = client.create_epic(&mut e).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("boom"));
        assert!(e.jira_key.is_none());
        assert!(client.epic_key("E1").is_none());
        assert!(client.log().is_empty());
    }

    #[test]
    fn create_requires_key_in_body() {
        let stub = StubTransport::new().reply(201, r#"{"id":"10000"}"#);
        let mut client = JiraClient::with_transport(&config(), stub);
        let err = client.create_epic(&mut epic()).unwrap_err();
        assert!(matches!(err, JiraError::MissingKey { .. }));

        let stub = StubTransport::new().reply(201, "not json");
        let mut client = JiraClient::with_transport(&config(), stub);
        let err = client.create_epic(&mut epic()).unwrap_err();
        assert!(matches!(err, JiraError::Json(_)));
    }

    #[test]
    fn create_story_links_epic() {
        let stub = StubTransport::new().reply(201, r#"{"key":"PROJ-2"}"#);
        let mut client = JiraClient::with_transport(&config(), stub);
        let mut s = story();

        let key = client.create_story(&mut s, "PROJ-1").unwrap();
        assert_eq!(key, "PROJ-2");
        assert_eq!(s.jira_key.as_deref(), Some("PROJ-2"));

        let body = client.transport().posts().remove(0);
        assert_eq!(body["fields"]["customfield_10101"], "PROJ-1");
        assert_eq!(body["fields"]["issuetype"]["name"], "Story");

        assert_eq!(
            client.log().entries(),
            &[CreatedIssue::Story {
                id: "S1".into(),
                title: "Sign in".into(),
                jira_key: "PROJ-2".into(),
                epic: "PROJ-1".into(),
                story_points: 3,
            }]
        );
    }

    #[test]
    fn transport_error_is_reported() {
        let stub = StubTransport::new().fail("timed out");
        let mut client = JiraClient::with_transport(&config(), stub);
        let err = client.create_story(&mut story(), "PROJ-1").unwrap_err();
        assert!(matches!(err, JiraError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
