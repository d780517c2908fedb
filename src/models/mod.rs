//! Data models for the Clyde AI Chat Completions API.
//!
//! - `chat`: request parameters (always serialized in full) and the lenient
//!   reply model with first-choice convenience accessors.

pub mod chat;

pub use chat::{
    ChatChoice, ChatCompletionParams, ChatMessage, ChatResponseMessage, ChatUsage, ClydeResponse,
    Stop, DEFAULT_MODEL,
};
