//! HTTP transport used by the Jira client.
//!
//! The client depends on the [`Transport`] trait rather than on `ureq`
//! directly so tests can substitute a scripted stub.

use serde_json::Value;
use ureq::Agent;
use ureq::http::Response;

use crate::error::Result;

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking HTTP operations with bearer authentication.
///
/// Non-2xx statuses are returned as replies, not errors; only failures to
/// obtain a response at all are `Err`.
pub trait Transport {
    /// Sends `GET url`.
    fn get(&self, url: &str, token: &str) -> Result<HttpReply>;

    /// Sends `POST url` with a JSON body.
    fn post_json(&self, url: &str, token: &str, body: &Value) -> Result<HttpReply>;
}

/// [`Transport`] backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn into_reply(mut response: Response<ureq::Body>) -> Result<HttpReply> {
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;
    Ok(HttpReply { status, body })
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, token: &str) -> Result<HttpReply> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", bearer(token))
            .header("Content-Type", "application/json")
            .call()?;
        into_reply(response)
    }

    fn post_json(&self, url: &str, token: &str, body: &Value) -> Result<HttpReply> {
        let response = self
            .agent
            .post(url)
            .header("Authorization", bearer(token))
            .send_json(body)?;
        into_reply(response)
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! Scripted transport for unit tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::error::JiraError;

    /// One recorded request.
    #[derive(Debug, Clone)]
    pub struct Call {
        pub method: &'static str,
        pub url: String,
        pub token: String,
        pub body: Option<Value>,
    }

    /// Pops a scripted reply per request; answers 500 once the script runs out.
    #[derive(Debug, Default)]
    pub struct StubTransport {
        replies: RefCell<VecDeque<Result<HttpReply>>>,
        calls: RefCell<Vec<Call>>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Ok(HttpReply::new(status, body)));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(JiraError::Transport(message.to_string())));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn posts(&self) -> Vec<Value> {
            self.calls
                .borrow()
                .iter()
                .filter_map(|c| c.body.clone())
                .collect()
        }

        fn next(&self, call: Call) -> Result<HttpReply> {
            self.calls.borrow_mut().push(call);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpReply::new(500, "no scripted reply")))
        }
    }

    impl Transport for StubTransport {
        fn get(&self, url: &str, token: &str) -> Result<HttpReply> {
            self.next(Call {
                method: "GET",
                url: url.to_string(),
                token: token.to_string(),
                body: None,
            })
        }

        fn post_json(&self, url: &str, token: &str, body: &Value) -> Result<HttpReply> {
            self.next(Call {
                method: "POST",
                url: url.to_string(),
                token: token.to_string(),
                body: Some(body.clone()),
            })
        }
    }
}
