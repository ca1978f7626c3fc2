pub mod client;
pub mod content;

pub use client::{CodeHost, ContentPayload, ContentRef, GitHubClient, HostError, SearchHit};
pub use content::{fetch_content, FetchError};
