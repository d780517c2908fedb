use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::client::ClydeClient;
use crate::models::chat::DEFAULT_MODEL;
use crate::util::{build_http_client_from_env, env_non_empty};

/// Default listen address of the relay.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Relay settings resolved from the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
    /// Model every relayed chat is sent with
    pub model: String,
    /// Upstream override; `None` keeps the public endpoint
    pub base_url: Option<String>,
}

impl RelayConfig {
    /// Read BIND_ADDR, CLYDE_MODEL and CLYDE_BASE_URL.
    pub fn from_env() -> Result<Self> {
        let bind = env_non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid BIND_ADDR: {bind}"))?;

        Ok(Self {
            bind_addr,
            model: env_non_empty("CLYDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env_non_empty("CLYDE_BASE_URL"),
        })
    }

    /// Build the upstream client: key from CLYDE_API_KEY, transport from env.
    pub fn build_client(&self) -> Result<ClydeClient> {
        let mut client = ClydeClient::from_env()
            .context("Failed to configure Clyde AI client")?
            .with_http_client(build_http_client_from_env());
        if let Some(base) = &self.base_url {
            client = client.with_base_url(base.clone());
        }
        Ok(client)
    }
}
