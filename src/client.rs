//! Single-URL fetch and extract
//!
//! [`FetchClient`] is built once and shared: clones are cheap handles onto the
//! same transport (and its connection pool), buffer pool and metrics.

use crate::{
    validate_url, BufferPool, ClientConfig, FetchContext, FetchError, Fields, HttpTransport,
    Link, Metrics, Transport, format_bytes,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Concurrent-safe fetch client
///
/// # Examples
///
/// ```rust,no_run
/// use metagrab::{ClientConfig, FetchClient, FetchContext, Fields};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FetchClient::new(ClientConfig::default())?;
///     let ctx = FetchContext::with_timeout(Duration::from_secs(10));
///
///     let link = client.fetch(&ctx, "https://example.com", Fields::TITLE | Fields::META).await?;
///     println!("{} -> {}", link.url, link.title);
///     Ok(())
/// }
/// ```
pub struct FetchClient<T = HttpTransport> {
    transport: Arc<T>,
    buffers: Arc<BufferPool>,
    metrics: Arc<Metrics>,
    config: ClientConfig,
}

impl FetchClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::from_parts(config, transport))
    }
}

impl<T: Transport> FetchClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, FetchError> {
        config.validate()?;
        Ok(Self::from_parts(config, transport))
    }

    fn from_parts(config: ClientConfig, transport: T) -> Self {
        let buffers = BufferPool::new(
            config.buffer_capacity,
            config.max_pooled_buffers,
            config.max_pooled_buffer_bytes,
        );

        Self {
            transport: Arc::new(transport),
            buffers: Arc::new(buffers),
            metrics: Arc::new(Metrics::new()),
            config,
        }
    }

    /// Fetch one URL and populate the fields selected by `mask`.
    ///
    /// Any response the transport delivers counts as success, whatever its
    /// status code: a 404 page is still extracted.
    pub async fn fetch(
        &self,
        ctx: &FetchContext,
        url: &str,
        mask: Fields,
    ) -> Result<Link, FetchError> {
        self.fetch_with_status(ctx, url, mask)
            .await
            .map(|(link, _status)| link)
    }

    /// Like [`FetchClient::fetch`] but also returns the HTTP status code.
    ///
    /// Intended for diagnostics; the status never turns into an error.
    pub async fn fetch_with_status(
        &self,
        ctx: &FetchContext,
        url: &str,
        mask: Fields,
    ) -> Result<(Link, u16), FetchError> {
        let result = self.fetch_inner(ctx, url, mask).await;
        if let Err(e) = &result {
            self.metrics.record_error(e.kind());
        }
        result
    }

    async fn fetch_inner(
        &self,
        ctx: &FetchContext,
        url: &str,
        mask: Fields,
    ) -> Result<(Link, u16), FetchError> {
        validate_url(url)?;

        let start_time = Instant::now();
        self.metrics.record_start();

        let mut body = self.buffers.checkout();
        let status = ctx
            .run(url, self.transport.get(url, &mut body))
            .await
            .map_err(|e| {
                warn!("Fetch of {} failed: {}", url, e);
                e
            })?;

        let html = String::from_utf8_lossy(&body);
        let link = Link::from_html(url, &html, mask);

        let duration = start_time.elapsed();
        self.metrics.record_fetch(duration, body.len());
        debug!(
            "Fetched {} (status {}, {}, fields {}) in {:?}",
            url,
            status,
            format_bytes(body.len()),
            mask,
            duration
        );

        Ok((link, status))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn buffer_pool(&self) -> &BufferPool {
        &self.buffers
    }

    pub(crate) fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

impl<T> Clone for FetchClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            buffers: self.buffers.clone(),
            metrics: self.metrics.clone(),
            config: self.config.clone(),
        }
    }
}
