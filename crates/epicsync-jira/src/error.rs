//! Jira client error types.

/// Errors that can occur while talking to Jira or writing the report.
#[derive(Debug, thiserror::Error)]
pub enum JiraError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Jira answered with a status other than the expected success codes.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A create call succeeded but the body carried no issue key.
    #[error("response has no issue key: {body}")]
    MissingKey {
        /// Raw response body.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the Jira crate.
pub type Result<T> = std::result::Result<T, JiraError>;

impl From<ureq::Error> for JiraError {
    fn from(e: ureq::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl JiraError {
    /// Returns the HTTP status if Jira responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
