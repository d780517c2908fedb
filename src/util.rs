use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing_subscriber::{fmt, EnvFilter};

/// Load the environment file and initialize structured tracing based on RUST_LOG.
///
/// - An explicit env file path may be given via ENV_FILE or DOTENV_PATH
/// - Otherwise the conventional `.env` discovery is used
/// - Existing process variables are never overwritten
pub fn init_tracing() {
    let mut env_source: String = "none".into();
    for key in ["ENV_FILE", "DOTENV_PATH"] {
        if let Ok(p) = std::env::var(key) {
            let p = p.trim();
            if !p.is_empty()
                && std::path::Path::new(p).is_file()
                && dotenvy::from_filename(p).is_ok()
            {
                env_source = format!("{p} ({key})");
                break;
            }
        }
    }

    if env_source == "none" {
        if let Ok(path) = dotenvy::dotenv() {
            env_source = path.display().to_string();
        }
    }

    // RUST_LOG may come from the env file loaded above
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".into());
    let subscriber = fmt().with_env_filter(EnvFilter::new(filter)).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Environment loaded from: {}", env_source);
}

/// Interpret common truthy spellings: 1, true, yes, on.
pub fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            v == "1" || v == "true" || v == "yes" || v == "on"
        })
        .unwrap_or(false)
}

/// Read a variable, treating blank values as unset.
pub fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build the HTTP transport used for upstream calls.
///
/// Environment:
/// - CLYDE_HTTP_TIMEOUT_SECONDS -> overall request timeout (u64); unset means no timeout
/// - CLYDE_NO_PROXY = 1|true|yes|on -> ignore HTTP(S)_PROXY settings
pub fn build_http_client_from_env() -> reqwest::Client {
    let mut builder = reqwest::Client::builder();

    if let Some(secs) = env_non_empty("CLYDE_HTTP_TIMEOUT_SECONDS") {
        match secs.parse::<u64>() {
            Ok(n) => builder = builder.timeout(std::time::Duration::from_secs(n)),
            Err(_) => tracing::warn!("Ignoring invalid CLYDE_HTTP_TIMEOUT_SECONDS: {}", secs),
        }
    }

    if env_flag("CLYDE_NO_PROXY") {
        builder = builder.no_proxy();
    }

    builder = builder.user_agent(format!("clydeai/{}", env!("CARGO_PKG_VERSION")));

    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

/// Build a JSON error response with the given HTTP status and message.
pub fn error_response(status: StatusCode, msg: &str) -> Response {
    let body = serde_json::json!({ "error": { "message": msg } });
    (status, axum::Json(body)).into_response()
}
