use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository identity carried on every result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub full_name: String,
    pub html_url: String,
}

/// A search hit enriched with the full decoded file content.
///
/// Field names follow the GitHub API so the JSON handed to clients and
/// stored in history keeps the shape they already know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub path: String,
    pub repository: RepositoryInfo,
    pub html_url: String,
    pub content: String,
}

impl SearchResult {
    /// Shape check applied before a result leaves the aggregator.
    /// Empty content is accepted: the file may legitimately be empty.
    pub fn is_well_formed(&self) -> bool {
        !self.name.is_empty()
            && !self.path.is_empty()
            && !self.repository.full_name.is_empty()
            && !self.repository.html_url.is_empty()
    }
}

/// One persisted search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: u64,
    pub query: String,
    /// JSON-encoded `Vec<SearchResult>`
    pub results: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Query string of `GET /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}
