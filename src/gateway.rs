use async_trait::async_trait;
use std::time::Duration;

use crate::config::ValidatorConfig;
use crate::error::{Result, UdsPlusError};

/// Raw outcome of fetching one URL.
///
/// Carries transport-level success only; callers decide what to make of the
/// status code (the pipeline treats anything but 200 as a failed fetch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Transport seam for everything the pipeline retrieves: the manifest
/// itself and each entry's content body.
///
/// One attempt per call, no retries; timeouts belong to the implementation.
#[async_trait]
pub trait FetchGateway: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// reqwest-backed gateway used by production deployments.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|error| UdsPlusError::Transport {
                message: format!("failed to build http client: {error}"),
            })?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        Self::new(config.request_timeout, &config.user_agent)
    }
}

#[async_trait]
impl FetchGateway for HttpGateway {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|error| UdsPlusError::Transport {
                    message: format!("GET {url} failed: {error}"),
                })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| UdsPlusError::Transport {
                message: format!("reading body of {url} failed: {error}"),
            })?;

        Ok(FetchResponse { status, body })
    }
}
