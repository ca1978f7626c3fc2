use std::sync::Arc;

use crate::config::Config;
use crate::github::{CodeHost, GitHubClient};
use crate::history::{JsonLinesStore, SearchStore};
use crate::llm::{HttpGenerator, TextGenerator};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub github: Arc<dyn CodeHost>,
    pub generator: Arc<dyn TextGenerator>,
    pub history: Arc<dyn SearchStore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // One client for every outbound call; its timeouts bound each request
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        let github = GitHubClient::new(http_client.clone(), &config.github)?;
        let generator = HttpGenerator::new(http_client, config.llm.clone());
        let history = JsonLinesStore::open_or_create(&config.history_path())?;

        Ok(Self::with_components(
            config,
            Arc::new(github),
            Arc::new(generator),
            Arc::new(history),
        ))
    }

    /// Assemble state from explicit collaborators.
    pub fn with_components(
        config: Config,
        github: Arc<dyn CodeHost>,
        generator: Arc<dyn TextGenerator>,
        history: Arc<dyn SearchStore>,
    ) -> Self {
        Self {
            config,
            github,
            generator,
            history,
        }
    }
}
