#![forbid(unsafe_code)]
#![doc = r#"
ClydeAI

Typed async client for the Clyde AI Chat Completions API, plus a small web relay.

Crate highlights
- Library: `ClydeClient::new(key)?.chat_completion().create(&params).await?`.
- Every request parameter is sent on the wire, unset ones as `null`.
- Replies decode leniently; first-choice content/role/finish_reason are exposed directly.
- HTTP relay (in `server`): `GET /`, `POST /chat`, `GET /status`.

Modules
- `client`: credentials and the chat-completion request builder.
- `models`: request parameters and reply types.
- `error`: status-code based error classification.
- `config`: relay settings from the environment.
- `server`: Axum router/handlers (the binary uses this).
- `util`: Shared helpers (tracing, env, HTTP transport).
"#]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod util;

pub use crate::client::{ChatCompletion, ClydeClient, DEFAULT_BASE_URL};
pub use crate::error::ClydeError;

// Re-export the chat model namespace for convenience (`use clydeai::chat`).
pub use crate::models::chat;
pub use crate::models::{ChatCompletionParams, ChatMessage, ClydeResponse, Stop};
