//! Minimal GitHub REST client: code search and repository contents.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::config::GitHubConfig;

/// Repository block embedded in each code search item
#[derive(Debug, Clone, Deserialize)]
pub struct HitRepository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub owner: HitOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitOwner {
    pub login: String,
}

/// One item of a code search response, before its content is fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub path: String,
    pub html_url: String,
    pub repository: HitRepository,
}

impl SearchHit {
    pub fn content_ref(&self) -> ContentRef {
        ContentRef {
            owner: self.repository.owner.login.clone(),
            repo: self.repository.name.clone(),
            path: self.path.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CodeSearchResponse {
    #[serde(default)]
    total_count: u64,
    items: Vec<SearchHit>,
}

/// Identifies one file in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    pub owner: String,
    pub repo: String,
    pub path: String,
}

/// Body of a contents call: a single entry for files, symlinks and
/// submodules, an array for directories.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentPayload {
    Entry(ContentEntry),
    Listing(Vec<serde_json::Value>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GitHub API rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("GitHub API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed GitHub response: {0}")]
    Malformed(String),
}

impl HostError {
    /// Status reported by GitHub, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            HostError::RateLimited(_) => Some(StatusCode::FORBIDDEN.as_u16()),
            HostError::Status { status, .. } => Some(*status),
            HostError::Request(e) => e.status().map(|s| s.as_u16()),
            HostError::Malformed(_) => None,
        }
    }
}

/// The code hosting provider as seen by the search pipeline.
#[async_trait]
pub trait CodeHost: Send + Sync {
    async fn search_code(&self, query: &str, per_page: u32) -> Result<Vec<SearchHit>, HostError>;

    async fn get_content(&self, content_ref: &ContentRef) -> Result<ContentPayload, HostError>;
}

pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    headers: HeaderMap,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client, config: &GitHubConfig) -> Result<Self, HostError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("code-scout"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = config.token.as_deref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| HostError::Malformed("token is not a valid header value".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, HostError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| HostError::Malformed(format!("invalid API URL {}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|_| HostError::Malformed(format!("API URL cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn contents_url(&self, content_ref: &ContentRef) -> Result<Url, HostError> {
        let head = [
            "repos",
            content_ref.owner.as_str(),
            content_ref.repo.as_str(),
            "contents",
        ];
        self.endpoint(head.into_iter().chain(content_ref.path.split('/')))
    }
}

#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, HostError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GitHubErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);

    if status == StatusCode::FORBIDDEN {
        Err(HostError::RateLimited(message))
    } else {
        Err(HostError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CodeHost for GitHubClient {
    async fn search_code(&self, query: &str, per_page: u32) -> Result<Vec<SearchHit>, HostError> {
        let url = self.endpoint(["search", "code"])?;
        let per_page = per_page.to_string();

        let resp = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .query(&[("q", query), ("per_page", per_page.as_str())])
            .send()
            .await?;

        let body: CodeSearchResponse = check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| HostError::Malformed(e.to_string()))?;

        tracing::info!(
            "Found {} results ({} total matches)",
            body.items.len(),
            body.total_count
        );
        Ok(body.items)
    }

    async fn get_content(&self, content_ref: &ContentRef) -> Result<ContentPayload, HostError> {
        let url = self.contents_url(content_ref)?;

        let resp = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| HostError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        let config = GitHubConfig {
            api_url: "https://api.github.com/".to_string(),
            token: Some("ghp_test".to_string()),
            per_page: 10,
        };
        GitHubClient::new(reqwest::Client::new(), &config).unwrap()
    }

    #[test]
    fn test_contents_url_encodes_path_segments() {
        let url = client()
            .contents_url(&ContentRef {
                owner: "octo".to_string(),
                repo: "algos".to_string(),
                path: "src/sort utils/merge#1.py".to_string(),
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo/algos/contents/src/sort%20utils/merge%231.py"
        );
    }

    #[test]
    fn test_endpoint_keeps_api_prefix() {
        let config = GitHubConfig {
            api_url: "https://ghe.example.com/api/v3".to_string(),
            token: None,
            per_page: 10,
        };
        let client = GitHubClient::new(reqwest::Client::new(), &config).unwrap();
        let url = client.endpoint(["search", "code"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/search/code");
    }

    #[test]
    fn test_search_hit_content_ref() {
        let hit: SearchHit = serde_json::from_value(serde_json::json!({
            "name": "sort.py",
            "path": "algos/sort.py",
            "sha": "abc",
            "html_url": "https://github.com/octo/algos/blob/main/algos/sort.py",
            "repository": {
                "name": "algos",
                "full_name": "octo/algos",
                "html_url": "https://github.com/octo/algos",
                "owner": { "login": "octo" }
            }
        }))
        .unwrap();
        assert_eq!(
            hit.content_ref(),
            ContentRef {
                owner: "octo".to_string(),
                repo: "algos".to_string(),
                path: "algos/sort.py".to_string(),
            }
        );
    }

    #[test]
    fn test_content_payload_distinguishes_directories() {
        let file: ContentPayload = serde_json::from_str(
            r#"{"type": "file", "encoding": "base64", "content": "aGk=\n"}"#,
        )
        .unwrap();
        assert!(matches!(file, ContentPayload::Entry(ref e) if e.kind == "file"));

        let dir: ContentPayload =
            serde_json::from_str(r#"[{"type": "file", "name": "a.py"}]"#).unwrap();
        assert!(matches!(dir, ContentPayload::Listing(_)));
    }

    #[test]
    fn test_rate_limit_reports_forbidden() {
        let err = HostError::RateLimited("API rate limit exceeded".to_string());
        assert_eq!(err.status(), Some(403));
        let err = HostError::Status {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(err.status(), Some(422));
    }
}
