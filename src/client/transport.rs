// file: src/client/transport.rs
// description: minimal http transport seam with a reqwest implementation
// reference: https://docs.rs/reqwest

use crate::error::{PipelineError, Result};
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::future::Future;
use std::time::Duration;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub rate_limit_remaining: Option<u32>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            rate_limit_remaining: None,
        }
    }
}

/// Issues a single GET. Status codes are returned, never turned into errors;
/// only failures to complete the exchange are.
pub trait HttpTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> impl Future<Output = Result<HttpResponse>> + Send;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, token: Option<&str>) -> Result<HttpResponse> {
        let mut request = self.client.get(url).header(ACCEPT, GITHUB_MEDIA_TYPE);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| PipelineError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let rate_limit_remaining = response
            .headers()
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response.text().await.map_err(|e| PipelineError::Transport {
            url: url.to_string(),
            message: format!("Failed to read response body: {}", e),
        })?;

        Ok(HttpResponse {
            status,
            body,
            rate_limit_remaining,
        })
    }
}
