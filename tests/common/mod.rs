//! Stub collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use parking_lot::Mutex;
use tower::ServiceExt;

use code_scout::config::Config;
use code_scout::github::client::{ContentEntry, HitOwner, HitRepository};
use code_scout::github::{CodeHost, ContentPayload, ContentRef, HostError, SearchHit};
use code_scout::history::{HistoryError, SearchStore};
use code_scout::llm::{GenerateError, GenerationParams, TextGenerator};
use code_scout::models::SearchRecord;
use code_scout::state::AppState;

pub fn hit(owner: &str, repo: &str, path: &str) -> SearchHit {
    SearchHit {
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path: path.to_string(),
        html_url: format!("https://github.com/{owner}/{repo}/blob/main/{path}"),
        repository: HitRepository {
            name: repo.to_string(),
            full_name: format!("{owner}/{repo}"),
            html_url: format!("https://github.com/{owner}/{repo}"),
            owner: HitOwner {
                login: owner.to_string(),
            },
        },
    }
}

enum Stored {
    Text(String),
    Missing,
    RateLimited,
    Directory,
}

/// In-memory code host. Paths without registered content answer 404.
#[derive(Default)]
pub struct StubHost {
    hits: Vec<SearchHit>,
    files: HashMap<String, Stored>,
    delays: HashMap<String, Duration>,
    search_error: Option<u16>,
    pub queries: Mutex<Vec<String>>,
    pub content_calls: Mutex<Vec<ContentRef>>,
}

impl StubHost {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), Stored::Text(content.to_string()));
        self
    }

    pub fn missing(mut self, path: &str) -> Self {
        self.files.insert(path.to_string(), Stored::Missing);
        self
    }

    /// Contents call for `path` answers 403.
    pub fn rate_limited(mut self, path: &str) -> Self {
        self.files.insert(path.to_string(), Stored::RateLimited);
        self
    }

    /// Contents call for `path` answers with a directory listing.
    pub fn directory(mut self, path: &str) -> Self {
        self.files.insert(path.to_string(), Stored::Directory);
        self
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn failing_search(mut self, status: u16) -> Self {
        self.search_error = Some(status);
        self
    }
}

#[async_trait]
impl CodeHost for StubHost {
    async fn search_code(&self, query: &str, per_page: u32) -> Result<Vec<SearchHit>, HostError> {
        self.queries.lock().push(query.to_string());
        match self.search_error {
            Some(403) => Err(HostError::RateLimited("API rate limit exceeded".to_string())),
            Some(status) => Err(HostError::Status {
                status,
                message: "Validation Failed".to_string(),
            }),
            None => Ok(self.hits.iter().take(per_page as usize).cloned().collect()),
        }
    }

    async fn get_content(&self, content_ref: &ContentRef) -> Result<ContentPayload, HostError> {
        self.content_calls.lock().push(content_ref.clone());
        if let Some(delay) = self.delays.get(&content_ref.path) {
            tokio::time::sleep(*delay).await;
        }
        match self.files.get(&content_ref.path) {
            Some(Stored::Text(text)) => Ok(ContentPayload::Entry(ContentEntry {
                kind: "file".to_string(),
                encoding: Some("base64".to_string()),
                content: Some(STANDARD.encode(text)),
            })),
            Some(Stored::RateLimited) => {
                Err(HostError::RateLimited("API rate limit exceeded".to_string()))
            }
            Some(Stored::Directory) => Ok(ContentPayload::Listing(vec![serde_json::json!({
                "type": "file",
                "name": "README.md",
            })])),
            Some(Stored::Missing) | None => Err(HostError::Status {
                status: 404,
                message: "Not Found".to_string(),
            }),
        }
    }
}

/// Generator returning a fixed completion, or failing every call.
pub struct StubGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _params: GenerationParams,
    ) -> Result<String, GenerateError> {
        self.prompts.lock().push(prompt.to_string());
        self.reply.clone().ok_or(GenerateError::Status {
            status: 504,
            body: "gateway timeout".to_string(),
        })
    }
}

/// Store whose every call fails, as a broken disk would.
pub struct BrokenStore;

#[async_trait]
impl SearchStore for BrokenStore {
    async fn save(&self, _query: &str, _results: &str) -> Result<SearchRecord, HistoryError> {
        Err(HistoryError::Io(std::io::Error::other("disk full")))
    }

    async fn list_recent(&self, _limit: usize) -> Result<Vec<SearchRecord>, HistoryError> {
        Err(HistoryError::Io(std::io::Error::other("disk unreadable")))
    }
}

pub fn app_state(
    github: Arc<StubHost>,
    generator: StubGenerator,
    store: Arc<dyn SearchStore>,
) -> AppState {
    AppState::with_components(Config::default(), github, Arc::new(generator), store)
}

pub fn app(github: Arc<StubHost>, generator: StubGenerator, store: Arc<dyn SearchStore>) -> Router {
    code_scout::api::router(app_state(github, generator, store))
}

/// Send one request and return status plus parsed JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
