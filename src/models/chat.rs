use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use std::collections::HashMap;

/// Model used by the relay when none is configured.
pub const DEFAULT_MODEL: &str = "clyde-1.1-mini";

/// One role/content pair of a conversation.
///
/// Roles are kept as plain strings ("system" | "user" | "assistant" | ...) and
/// forwarded verbatim; the API is the authority on which roles it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Stop sequence(s): the API accepts a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stop {
    Single(String),
    Multiple(Vec<String>),
}

impl From<&str> for Stop {
    fn from(s: &str) -> Self {
        Stop::Single(s.to_string())
    }
}

impl From<String> for Stop {
    fn from(s: String) -> Self {
        Stop::Single(s)
    }
}

impl From<Vec<String>> for Stop {
    fn from(v: Vec<String>) -> Self {
        Stop::Multiple(v)
    }
}

/// Chat Completions request parameters.
///
/// Serialized as the request body. Every field is always written, including
/// optional ones left unset (they go out as JSON `null`), so no
/// `skip_serializing_if` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionParams {
    pub model: String,
    pub messages: Vec<ChatMessage>,

    // Sampling / decoding
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub n: u32,
    pub stream: bool,
    pub stop: Option<Stop>,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub logit_bias: Option<HashMap<String, f64>>,
    pub user: Option<String>,
}

impl ChatCompletionParams {
    /// Parameters for `model` and `messages` with the documented defaults:
    /// max_tokens=4096, temperature=1.0, top_p=1.0, n=1, stream=false,
    /// penalties 0 and no stop/logit_bias/user.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: 4096,
            temperature: 1.0,
            top_p: 1.0,
            n: 1,
            stream: false,
            stop: None,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            logit_bias: None,
            user: None,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    /// Sets the wire flag only; streamed replies are not decoded.
    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn stop(mut self, stop: impl Into<Stop>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    pub fn presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = penalty;
        self
    }

    pub fn frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = penalty;
        self
    }

    pub fn logit_bias(mut self, bias: HashMap<String, f64>) -> Self {
        self.logit_bias = Some(bias);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

// ============================================================================
// Chat Completions Response Models
// ============================================================================

/// Message in a Chat Completions choice
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Choice in a Chat Completions response
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub message: ChatResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>, // "stop", "length", "content_filter"
}

/// Token accounting returned alongside a completion
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

/// Chat Completions reply.
///
/// Built from the reply JSON with [`ClydeResponse::from_value`], which never
/// fails: missing or mistyped fields decode as `None`, and a missing, `null`
/// or non-array `choices` becomes an empty list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClydeResponse {
    pub id: Option<String>,
    pub object: Option<String>, // "chat.completion"
    pub created: Option<u64>,
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: ChatUsage,
    #[serde(skip)]
    raw: Value,
}

impl ClydeResponse {
    pub fn from_value(v: Value) -> Self {
        let choices = v
            .get("choices")
            .and_then(|c| c.as_array())
            .map(|arr| arr.iter().map(choice_from_value).collect())
            .unwrap_or_default();

        let usage = v
            .get("usage")
            .map(|u| ChatUsage {
                prompt_tokens: u.get("prompt_tokens").and_then(Value::as_u64),
                completion_tokens: u.get("completion_tokens").and_then(Value::as_u64),
                total_tokens: u.get("total_tokens").and_then(Value::as_u64),
            })
            .unwrap_or_default();

        Self {
            id: str_field(&v, "id"),
            object: str_field(&v, "object"),
            created: v.get("created").and_then(Value::as_u64),
            model: str_field(&v, "model"),
            choices,
            usage,
            raw: v,
        }
    }

    /// The reply body exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn first_choice(&self) -> Option<&ChatChoice> {
        self.choices.first()
    }

    /// Message of the first choice, if any.
    pub fn message(&self) -> Option<&ChatResponseMessage> {
        self.first_choice().map(|c| &c.message)
    }

    pub fn content(&self) -> Option<&str> {
        self.message().and_then(|m| m.content.as_deref())
    }

    pub fn role(&self) -> Option<&str> {
        self.message().and_then(|m| m.role.as_deref())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.first_choice().and_then(|c| c.finish_reason.as_deref())
    }

    pub fn prompt_tokens(&self) -> Option<u64> {
        self.usage.prompt_tokens
    }

    pub fn completion_tokens(&self) -> Option<u64> {
        self.usage.completion_tokens
    }

    pub fn total_tokens(&self) -> Option<u64> {
        self.usage.total_tokens
    }
}

fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(|s| s.as_str()).map(str::to_string)
}

fn choice_from_value(c: &Value) -> ChatChoice {
    let message = c
        .get("message")
        .map(|m| ChatResponseMessage {
            role: str_field(m, "role"),
            content: str_field(m, "content"),
        })
        .unwrap_or_default();

    ChatChoice {
        index: c
            .get("index")
            .and_then(Value::as_u64)
            .and_then(|i| u32::try_from(i).ok()),
        message,
        finish_reason: str_field(c, "finish_reason"),
    }
}
