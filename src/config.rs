use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the search history file is stored
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// GitHub API settings
    pub github: GitHubConfig,
    /// Text generation provider settings
    pub llm: LlmConfig,
    /// Connect timeout applied to every outbound call
    pub connect_timeout_secs: u64,
    /// Total request timeout applied to every outbound call
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API root, overridable for GitHub Enterprise
    pub api_url: String,
    /// Personal access token used for search and contents calls
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Results requested per search call
    pub per_page: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: None,
            per_page: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "huggingface", "ollama" or "openai"
    pub provider: String,
    /// Base URL for the provider API
    pub base_url: String,
    /// Model used for query enhancement and code analysis
    pub model: String,
    /// API key (not needed for a local Ollama)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "huggingface".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: "codellama/CodeLlama-34b-Instruct-hf".to_string(),
            api_key: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:5000".to_string(),
            github: GitHubConfig::default(),
            llm: LlmConfig::default(),
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),
    #[error("unknown LLM provider: {0}")]
    UnknownProvider(String),
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("CODE_SCOUT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("CODE_SCOUT_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                config.github.token = Some(token);
            }
        }
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            config.github.api_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider.to_lowercase();
            // Local providers get their own default endpoint
            match config.llm.provider.as_str() {
                "ollama" => config.llm.base_url = "http://localhost:11434".to_string(),
                "openai" => config.llm.base_url = "https://api.openai.com".to_string(),
                _ => {}
            }
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.llm.model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY").or_else(|_| std::env::var("HUGGINGFACE_API_KEY")) {
            config.llm.api_key = Some(key);
        }

        if let Ok(val) = std::env::var("HTTP_CONNECT_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.connect_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("HTTP_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.request_timeout_secs = v;
            }
        }

        config
    }

    /// Startup checks. Search cannot work without a GitHub token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.github.token.is_none() {
            return Err(ConfigError::MissingEnv("GITHUB_TOKEN"));
        }
        match self.llm.provider.as_str() {
            "huggingface" | "ollama" | "openai" => Ok(()),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("searches.jsonl")
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
