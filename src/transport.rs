//! HTTP transport seam
//!
//! [`Transport`] is the only place network I/O happens. [`HttpTransport`] is
//! the production implementation on top of a pooled `reqwest::Client`; tests
//! substitute scripted or mocked transports.

use crate::{ClientConfig, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Issue a GET for `url` and append the whole response body to `body`.
    ///
    /// Returns the HTTP status code. Non-2xx responses are not errors; only
    /// failures to connect or to read the body are.
    async fn get(&self, url: &str, body: &mut Vec<u8>) -> Result<u16, FetchError>;
}

/// Pooled `reqwest` transport
///
/// Cloning is cheap and clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let http = builder
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, body: &mut Vec<u8>) -> Result<u16, FetchError> {
        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status().as_u16();

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::read(url, e))?
        {
            body.extend_from_slice(&chunk);
        }

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(status)
    }
}
