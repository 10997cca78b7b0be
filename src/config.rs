//! Client configuration with serde serialization/deserialization
//!
//! Tunables for the HTTP transport and the body buffer pool. The defaults
//! favour connection reuse across many concurrent fetches to the same hosts.

use crate::FetchError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`crate::FetchClient`]
///
/// # Examples
///
/// ```rust
/// use metagrab::ClientConfig;
/// use std::time::Duration;
///
/// // Use default configuration
/// let config = ClientConfig::default();
///
/// // Shorter timeout, fewer cached buffers
/// let config = ClientConfig {
///     request_timeout: Duration::from_secs(3),
///     max_pooled_buffers: 16,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Timeout applied to every request, connect through body (default: 10 seconds)
    ///
    /// Independent of any deadline carried by the caller's context; whichever
    /// expires first ends the fetch.
    pub request_timeout: Duration,

    /// Idle keep-alive connections kept per host (default: 64)
    pub max_idle_per_host: usize,

    /// How long an idle pooled connection is kept open (default: 90 seconds)
    pub idle_timeout: Duration,

    /// Custom User-Agent header (default: none, reqwest sends no User-Agent)
    pub user_agent: Option<String>,

    /// Initial capacity of freshly allocated body buffers (default: 4 KiB)
    pub buffer_capacity: usize,

    /// Upper bound on buffers retained by the pool (default: 256)
    pub max_pooled_buffers: usize,

    /// Buffers that grew beyond this many bytes are freed rather than pooled (default: 4 MiB)
    ///
    /// Keeps one unusually large page from pinning its allocation for the
    /// life of the process.
    pub max_pooled_buffer_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_idle_per_host: 64,
            idle_timeout: Duration::from_secs(90),
            user_agent: None,
            buffer_capacity: 4 * 1024,
            max_pooled_buffers: 256,
            max_pooled_buffer_bytes: 4 * 1024 * 1024,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.request_timeout.is_zero() {
            return Err(FetchError::Configuration(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        if self.buffer_capacity == 0 {
            return Err(FetchError::Configuration(
                "buffer capacity must be greater than 0".to_string(),
            ));
        }

        if self.max_pooled_buffer_bytes < self.buffer_capacity {
            return Err(FetchError::Configuration(format!(
                "max pooled buffer bytes ({}) must be at least the buffer capacity ({})",
                self.max_pooled_buffer_bytes, self.buffer_capacity
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_idle_per_host, 64);
        assert_eq!(config.idle_timeout, Duration::from_secs(90));
        assert_eq!(config.buffer_capacity, 4096);
        assert_eq!(config.max_pooled_buffers, 256);
        assert!(config.user_agent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FetchError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_undersized_pool_limit() {
        let config = ClientConfig {
            buffer_capacity: 8192,
            max_pooled_buffer_bytes: 1024,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            buffer_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = ClientConfig {
            user_agent: Some("metagrab-test".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.user_agent.as_deref(), Some("metagrab-test"));
        assert_eq!(parsed.request_timeout, config.request_timeout);
    }
}
