// file: src/client/mock.rs
// description: scripted transport and recording sleeper for tests
// reference: in-memory test doubles for the http and clock seams

use crate::client::pacer::Sleeper;
use crate::client::transport::{HttpResponse, HttpTransport};
use crate::error::Result;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

/// Replays queued responses per URL and records every request. An
/// unscripted URL answers 500.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<HttpResponse>>>,
    requests: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: &str, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, token)| token.clone())
            .collect()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str, token: Option<&str>) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), token.map(str::to_string)));

        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front);

        Ok(next.unwrap_or_else(|| HttpResponse::new(500, format!("no scripted response for {url}"))))
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Records each sleep, signals that it began, and never wakes up.
#[derive(Default)]
pub struct StallingSleeper {
    sleeps: Mutex<Vec<Duration>>,
    started: Notify,
}

impl StallingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    /// Resolves once some caller is parked inside `sleep`.
    pub async fn stalled(&self) {
        self.started.notified().await;
    }
}

impl Sleeper for StallingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.started.notify_one();
        std::future::pending::<()>().await;
    }
}

pub fn commit_json(sha: &str, author: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "author": { "name": author, "email": "dev@example.com", "date": date },
            "message": "change"
        }
    })
}

/// A listing page of `count` commits with shas `c{start}`, `c{start + 1}`, ...
pub fn commit_page(start: usize, count: usize) -> String {
    let commits: Vec<Value> = (start..start + count)
        .map(|n| commit_json(&format!("c{n}"), "dev", "2024-03-01T10:00:00Z"))
        .collect();
    Value::Array(commits).to_string()
}

/// A detail payload; each tuple is `(filename, additions, deletions, status)`.
pub fn commit_detail(files: &[(&str, u64, u64, &str)]) -> String {
    let files: Vec<Value> = files
        .iter()
        .map(|(filename, additions, deletions, status)| {
            json!({
                "filename": filename,
                "additions": additions,
                "deletions": deletions,
                "changes": additions + deletions,
                "status": status
            })
        })
        .collect();
    json!({ "sha": "ignored", "files": files }).to_string()
}
