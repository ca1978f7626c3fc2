use std::sync::Arc;

use crate::github::client::{CodeHost, SearchHit};
use crate::github::content::{fetch_content, FetchError};
use crate::models::{RepositoryInfo, SearchResult};

/// Fetch content for every hit concurrently and keep the ones that worked.
///
/// Each fetch runs as its own task and reports back with its input index;
/// the output is assembled from an index-addressed slot array so completion
/// order never leaks into result order. Failed or malformed items are
/// dropped. Tasks are detached rather than aborted if this future is dropped.
pub async fn aggregate(host: Arc<dyn CodeHost>, hits: Vec<SearchHit>) -> Vec<SearchResult> {
    let mut slots: Vec<Option<SearchResult>> = vec![None; hits.len()];

    let handles: Vec<_> = hits
        .into_iter()
        .enumerate()
        .map(|(index, hit)| {
            let host = Arc::clone(&host);
            tokio::spawn(async move {
                let outcome = fetch_content(host.as_ref(), &hit.content_ref()).await;
                (index, hit, outcome)
            })
        })
        .collect();

    for handle in handles {
        match handle.await {
            Ok((index, hit, outcome)) => slots[index] = assemble(hit, outcome),
            Err(e) => tracing::warn!("Content fetch task did not complete: {e}"),
        }
    }

    slots.into_iter().flatten().collect()
}

fn assemble(hit: SearchHit, outcome: Result<String, FetchError>) -> Option<SearchResult> {
    let content = match outcome {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch content for {}/{}: {e}",
                hit.repository.full_name,
                hit.path
            );
            return None;
        }
    };

    let result = SearchResult {
        name: hit.name,
        path: hit.path,
        repository: RepositoryInfo {
            full_name: hit.repository.full_name,
            html_url: hit.repository.html_url,
        },
        html_url: hit.html_url,
        content,
    };

    if result.is_well_formed() {
        Some(result)
    } else {
        tracing::warn!("Dropping malformed search result for path {:?}", result.path);
        None
    }
}

