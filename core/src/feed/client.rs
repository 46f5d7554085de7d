//! HTTP client for the local live match feed
//!
//! The feed is served over TLS with a self-signed certificate on loopback,
//! so certificate validation is disabled. Every request carries a short
//! timeout so a hung feed never stalls the poll loop for long.

use std::future::Future;
use std::time::Duration;

use rift_echo_types::FeedSettings;
use serde_json::Value;

use super::error::FeedError;

/// Read-only endpoints consumed from the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ActivePlayer,
    PlayerList,
    AllGameData,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ActivePlayer => "activeplayer",
            Endpoint::PlayerList => "playerlist",
            Endpoint::AllGameData => "allgamedata",
        }
    }
}

/// Anything that can answer feed requests.
///
/// Implemented by [`FeedClient`] for the real feed; tests substitute
/// scripted sources.
pub trait FeedSource: Send + Sync {
    fn fetch(&self, endpoint: Endpoint) -> impl Future<Output = Result<Value, FeedError>> + Send;
}

pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(settings: &FeedSettings) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(FeedError::Client)?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

impl FeedSource for FeedClient {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FeedError> {
        let name = endpoint.path();
        let response = self
            .http
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|source| FeedError::Transport {
                endpoint: name,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                endpoint: name,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FeedError::Decode {
                endpoint: name,
                source,
            })
    }
}
