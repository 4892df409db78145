// src/services/watsonx.rs
//
// IBM watsonx text-generation client: credential resolution, IAM token
// exchange, and the single generation call every feature goes through.
// Failures of any kind collapse into `GenerationResult::Unavailable`; the
// generators respond by switching to their deterministic templates.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const DEFAULT_BASE_URL: &str = "https://us-south.ml.cloud.ibm.com";
const DEFAULT_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";
const DEFAULT_MODEL_ID: &str = "ibm/granite-3-8b-instruct";
const API_VERSION: &str = "2023-05-29";
const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);
const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum WatsonxError {
    #[error("credentials not configured")]
    NotConfigured,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("generation request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("empty generated text")]
    EmptyResult,
}

/// Outcome of one generation call. `Unavailable` covers missing credentials,
/// transport failure, non-success status, and empty generated text alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Text(String),
    Unavailable,
}

/// Provider configuration, resolved once and held immutable for the lifetime
/// of the service. The primary key (`WATSONX_API_KEY`) takes precedence over
/// the account-level IAM key; the provider is only usable when the primary
/// key and the project id are both present.
#[derive(Debug, Clone)]
pub struct WatsonxConfig {
    pub api_key: Option<String>,
    pub iam_api_key: Option<String>,
    pub project_id: Option<String>,
    pub base_url: String,
    pub token_url: String,
    pub model_id: String,
}

impl Default for WatsonxConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            iam_api_key: None,
            project_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

impl WatsonxConfig {
    /// Read configuration from the environment. Loading a `.env` file is the
    /// embedding binary's job; this only inspects process variables.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_env("WATSONX_API_KEY"),
            iam_api_key: non_empty_env("IBM_IAM_API_KEY"),
            project_id: non_empty_env("WATSONX_PROJECT_ID"),
            base_url: non_empty_env("WATSONX_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ..Self::default()
        }
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some() && self.project_id.is_some()
    }

    /// Primary key if set, else the IAM key, else nothing.
    fn resolve_credential(&self) -> Option<&str> {
        self.api_key.as_deref().or(self.iam_api_key.as_deref())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    decoding_method: &'static str,
    max_new_tokens: u32,
    temperature: f32,
    repetition_penalty: f32,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model_id: &'a str,
    input: &'a str,
    parameters: GenerationParameters,
    project_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationChunk>,
}

#[derive(Debug, Deserialize)]
struct GenerationChunk {
    #[serde(default)]
    generated_text: String,
}

/// Text-generation capability the content generators consume. The seam lets
/// tests drive the generators without a network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> GenerationResult;
}

#[derive(Debug)]
pub struct WatsonxService {
    config: WatsonxConfig,
    client: Client,
    available: bool,
}

impl WatsonxService {
    /// Availability is decided here, once; a service built without usable
    /// credentials never attempts a network call.
    pub fn new(config: WatsonxConfig) -> Self {
        let available = config.is_available();
        if !available {
            warn!("Watson credentials not configured. AI features will use fallback templates.");
        }
        let client = Client::builder()
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            config,
            client,
            available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Exchange the configured credential for a short-lived IAM bearer token.
    /// No caching: every generation call performs a fresh exchange.
    async fn get_access_token(&self) -> Result<String, WatsonxError> {
        let api_key = self
            .config
            .resolve_credential()
            .ok_or(WatsonxError::NotConfigured)?;

        let response = self
            .client
            .post(&self.config.token_url)
            .timeout(TOKEN_TIMEOUT)
            .form(&[("grant_type", GRANT_TYPE), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| WatsonxError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Failed to get IAM token");
            return Err(WatsonxError::TokenExchange(format!("HTTP {}", status)));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WatsonxError::InvalidResponse(e.to_string()))?;

        let token = body
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                WatsonxError::InvalidResponse("no access_token in token response".to_string())
            })?;

        info!("Obtained IAM access token");
        Ok(token.to_string())
    }

    async fn try_generate(&self, prompt: &str, max_tokens: u32) -> Result<String, WatsonxError> {
        let project_id = self
            .config
            .project_id
            .as_deref()
            .ok_or(WatsonxError::NotConfigured)?;

        let token = self.get_access_token().await?;

        let url = format!(
            "{}/ml/v1/text/generation?version={}",
            self.config.base_url.trim_end_matches('/'),
            API_VERSION
        );

        let request = GenerationRequest {
            model_id: &self.config.model_id,
            input: prompt,
            parameters: GenerationParameters {
                decoding_method: "greedy",
                max_new_tokens: max_tokens,
                temperature: 0.7,
                repetition_penalty: 1.1,
            },
            project_id,
        };

        debug!(
            model_id = %self.config.model_id,
            max_new_tokens = max_tokens,
            prompt_len = prompt.len(),
            "Sending watsonx generation request"
        );

        let response = self
            .client
            .post(&url)
            .timeout(GENERATION_TIMEOUT)
            .bearer_auth(&token)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| WatsonxError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Watson API error");
            return Err(WatsonxError::RequestFailed(format!("HTTP {}", status)));
        }

        let parsed: GenerationResponse = response
            .json()
            .await
            .map_err(|e| WatsonxError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .results
            .first()
            .map(|r| r.generated_text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(WatsonxError::EmptyResult);
        }

        info!(status = %status, generated_len = text.len(), "Watson generation completed");
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for WatsonxService {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> GenerationResult {
        if !self.available {
            return GenerationResult::Unavailable;
        }

        match self.try_generate(prompt, max_tokens).await {
            Ok(text) => GenerationResult::Text(text),
            Err(e) => {
                warn!(error = %e, "Generation unavailable, callers will use fallback templates");
                GenerationResult::Unavailable
            }
        }
    }
}
