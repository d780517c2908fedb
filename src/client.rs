use http::header;
use tracing::{debug, warn};

use crate::error::{ClydeError, API_KEY_ENV};
use crate::models::chat::{ChatCompletionParams, ClydeResponse};

/// Public Clyde AI endpoint, including the API version segment.
pub const DEFAULT_BASE_URL: &str = "https://clydeai.org/v1";

/// Credentials plus the endpoint they are used against.
///
/// Immutable after construction; clone it (or share it behind an `Arc`) to
/// issue requests from several tasks.
#[derive(Debug, Clone)]
pub struct ClydeClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl ClydeClient {
    /// Build a client from an explicit key, falling back to `CLYDE_API_KEY`.
    ///
    /// Blank values count as missing. Performs no I/O.
    pub fn new(api_key: Option<String>) -> Result<Self, ClydeError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(API_KEY_ENV)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
            .ok_or_else(ClydeError::missing_api_key)?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Build a client from `CLYDE_API_KEY` only.
    pub fn from_env() -> Result<Self, ClydeError> {
        Self::new(None)
    }

    /// Point the client at another endpoint (trailing `/` is dropped).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured transport (proxies, timeouts, user agent).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request builder for `/chat/completions` bound to this client.
    pub fn chat_completion(&self) -> ChatCompletion<'_> {
        ChatCompletion { client: self }
    }
}

/// Performs one chat-completion round trip for its client.
#[derive(Debug, Clone, Copy)]
pub struct ChatCompletion<'a> {
    client: &'a ClydeClient,
}

impl ChatCompletion<'_> {
    /// POST `params` to `{base_url}/chat/completions` and decode the reply.
    ///
    /// One network call per invocation: no retry, and no timeout beyond what
    /// the client's transport carries. `messages` is not checked for
    /// emptiness; that is left to the caller.
    pub async fn create(&self, params: &ChatCompletionParams) -> Result<ClydeResponse, ClydeError> {
        let url = format!("{}/chat/completions", self.client.base_url);
        debug!(
            model = %params.model,
            messages = params.messages.len(),
            "Sending chat completion to {}",
            url
        );

        let resp = self
            .client
            .http
            .post(&url)
            .header(header::AUTHORIZATION, self.client.api_key.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .json(params)
            .send()
            .await
            .map_err(|e| {
                warn!("Chat completion request failed before a response: {}", e);
                ClydeError::from(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = ClydeError::from_status(status, &body);
            warn!(status = status.as_u16(), "Chat completion rejected: {}", err);
            return Err(err);
        }

        let body: serde_json::Value = resp.json().await?;
        let out = ClydeResponse::from_value(body);
        debug!(
            id = out.id.as_deref().unwrap_or(""),
            choices = out.choices.len(),
            total_tokens = out.total_tokens().unwrap_or(0),
            "Chat completion succeeded"
        );
        Ok(out)
    }
}
