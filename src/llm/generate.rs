//! Text generation backends.
//!
//! [`TextGenerator`] is the single seam both the query enhancer and the code
//! analyzer depend on. [`HttpGenerator`] talks to a hosted model over HTTP;
//! tests substitute a deterministic stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// Sampling knobs sent with every generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed generation response: {0}")]
    Malformed(String),
    #[error("unknown LLM provider: {0}")]
    UnknownProvider(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: GenerationParams)
        -> Result<String, GenerateError>;
}

/// Generator backed by the provider named in [`LlmConfig`].
pub struct HttpGenerator {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpGenerator {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerateError> {
        match self.config.provider.as_str() {
            "huggingface" => call_huggingface(&self.client, &self.config, prompt, params).await,
            "ollama" => call_ollama(&self.client, &self.config, prompt, params).await,
            "openai" => call_openai(&self.client, &self.config, prompt, params).await,
            other => Err(GenerateError::UnknownProvider(other.to_string())),
        }
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, GenerateError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(GenerateError::Status { status, body })
}

// ─── Hugging Face text-generation ────────────────────────

#[derive(Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
}

#[derive(Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct HfGeneration {
    generated_text: String,
}

async fn call_huggingface(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
    params: GenerationParams,
) -> Result<String, GenerateError> {
    let url = format!("{}/models/{}", config.base_url, config.model);

    let req = HfRequest {
        inputs: prompt,
        parameters: HfParameters {
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            return_full_text: false,
        },
    };

    let mut builder = client.post(&url).json(&req);
    if let Some(key) = config.api_key.as_deref() {
        builder = builder.bearer_auth(key);
    }
    let resp = check_status(builder.send().await?).await?;

    let body: Vec<HfGeneration> = resp
        .json()
        .await
        .map_err(|e| GenerateError::Malformed(e.to_string()))?;
    body.into_iter()
        .next()
        .map(|g| g.generated_text)
        .ok_or_else(|| GenerateError::Malformed("empty generation list".to_string()))
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

async fn call_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
    params: GenerationParams,
) -> Result<String, GenerateError> {
    let url = format!("{}/api/generate", config.base_url);

    let req = OllamaGenerateRequest {
        model: &config.model,
        prompt,
        stream: false,
        options: OllamaOptions {
            num_predict: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        },
    };

    let resp = check_status(client.post(&url).json(&req).send().await?).await?;
    let body: OllamaGenerateResponse = resp
        .json()
        .await
        .map_err(|e| GenerateError::Malformed(e.to_string()))?;
    Ok(body.response)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

async fn call_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
    params: GenerationParams,
) -> Result<String, GenerateError> {
    let url = format!("{}/v1/chat/completions", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = OpenAiChatRequest {
        model: &config.model,
        messages: vec![OpenAiMessage {
            role: "user",
            content: prompt,
        }],
        max_tokens: params.max_new_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
    };

    let resp = check_status(
        client
            .post(&url)
            .bearer_auth(api_key)
            .json(&req)
            .send()
            .await?,
    )
    .await?;

    let body: OpenAiChatResponse = resp
        .json()
        .await
        .map_err(|e| GenerateError::Malformed(e.to_string()))?;
    body.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| GenerateError::Malformed("no choices in response".to_string()))
}
