//! Shared fixtures: a scripted Jira stand-in and epics trees on disk.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Script {
    myself: Option<(u16, String)>,
    issues: VecDeque<(u16, String)>,
    requests: Vec<Recorded>,
}

/// Minimal HTTP/1.1 server answering `/rest/api/2/myself` and
/// `/rest/api/2/issue` from a script. Runs until the test process exits.
pub struct StubJira {
    url: String,
    script: Arc<Mutex<Script>>,
}

impl StubJira {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let script = Arc::new(Mutex::new(Script {
            myself: Some((200, r#"{"displayName":"Test User","name":"test"}"#.into())),
            ..Default::default()
        }));

        let shared = Arc::clone(&script);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &shared);
            }
        });

        Self { url, script }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn myself(self, status: u16, body: &str) -> Self {
        self.script.lock().unwrap().myself = Some((status, body.to_string()));
        self
    }

    pub fn issue(self, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .issues
            .push_back((status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn issue_posts(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST" && r.path == "/rest/api/2/issue")
            .collect()
    }
}

fn handle(stream: TcpStream, script: &Mutex<Script>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut chunked = false;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("transfer-encoding") {
                chunked = value.eq_ignore_ascii_case("chunked");
            } else if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.to_string());
            }
        }
    }

    let body = if chunked {
        read_chunked(&mut reader)
    } else {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).ok();
        body
    };
    let body = String::from_utf8_lossy(&body).into_owned();

    let (status, reply) = {
        let mut script = script.lock().unwrap();
        let reply = match (method.as_str(), path.as_str()) {
            ("GET", "/rest/api/2/myself") => script
                .myself
                .clone()
                .unwrap_or((404, "not found".to_string())),
            ("POST", "/rest/api/2/issue") => script
                .issues
                .pop_front()
                .unwrap_or((500, r#"{"errorMessages":["unscripted"]}"#.to_string())),
            _ => (404, "not found".to_string()),
        };
        script.requests.push(Recorded {
            method,
            path,
            authorization,
            body,
        });
        reply
    };

    let mut stream = stream;
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
        reason(status),
        reply.len()
    );
    stream.write_all(response.as_bytes()).ok();
    stream.flush().ok();
}

fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        if reader.read_line(&mut size_line).unwrap_or(0) == 0 {
            break;
        }
        let size = usize::from_str_radix(size_line.trim(), 16).unwrap_or(0);
        let mut chunk = vec![0u8; size + 2];
        if reader.read_exact(&mut chunk).is_err() {
            break;
        }
        if size == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..size]);
    }
    body
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

// ---------------------------------------------------------------------------
// Epics trees
// ---------------------------------------------------------------------------

pub const LOGIN_EPIC: &str = "\
# Epic: Login

**Epic ID:** E1
**Priority:** P0
**Business Goal:** Secure access

---

## Success Criteria

- [ ] Users can sign in
";

pub const SSO_STORY: &str = "\
# User Story: SSO

**Story ID:** US-1
**Priority:** P1
**Story Points:** 3

---

## User Story

As a user, I want single sign-on.

---

## Acceptance Criteria

- [ ] Redirects to the identity provider
";

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// `epics/E1/epic.md` plus `epics/E1/US-1.md`.
pub fn login_tree(root: &Path) {
    write_file(&root.join("epics/E1/epic.md"), LOGIN_EPIC);
    write_file(&root.join("epics/E1/US-1.md"), SSO_STORY);
}
