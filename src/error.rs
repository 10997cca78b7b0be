use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("empty URL")]
    EmptyUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Timed out fetching {url}")]
    Timeout { url: String },

    #[error("Fetch of {url} cancelled")]
    Cancelled { url: String },

    #[error("Failed reading body of {url}: {message}")]
    Read { url: String, message: String },

    #[error("Bulk fetch failed at #{index} ({url}): {source}")]
    Bulk {
        index: usize,
        url: String,
        #[source]
        source: Box<FetchError>,
    },

    #[error("Fetch task failed: {0}")]
    TaskFailed(String),

    #[error("HTTP client construction failed: {0}")]
    ClientBuild(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network I/O.
    Input,
    /// DNS, connect, TLS, timeout or cancellation.
    Transport,
    /// Connection succeeded but draining the body failed.
    Read,
    /// Surfaced by the bulk coordinator.
    Aggregation,
    Configuration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Input => "input",
            ErrorKind::Transport => "transport",
            ErrorKind::Read => "read",
            ErrorKind::Aggregation => "aggregation",
            ErrorKind::Configuration => "configuration",
        }
    }
}

impl FetchError {
    pub(crate) fn transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    pub(crate) fn read(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Read {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::EmptyUrl | FetchError::InvalidUrl(_) => ErrorKind::Input,
            FetchError::Transport { .. }
            | FetchError::Timeout { .. }
            | FetchError::Cancelled { .. } => ErrorKind::Transport,
            FetchError::Read { .. } => ErrorKind::Read,
            FetchError::Bulk { .. } | FetchError::TaskFailed(_) => ErrorKind::Aggregation,
            FetchError::ClientBuild(_) | FetchError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// The underlying error with any bulk attribution stripped.
    pub fn root(&self) -> &FetchError {
        match self {
            FetchError::Bulk { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), FetchError::Cancelled { .. })
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(FetchError::EmptyUrl.kind(), ErrorKind::Input);
        assert_eq!(FetchError::InvalidUrl("x".into()).kind(), ErrorKind::Input);
        assert_eq!(
            FetchError::Timeout { url: "u".into() }.kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            FetchError::Read {
                url: "u".into(),
                message: "reset".into()
            }
            .kind(),
            ErrorKind::Read
        );
        assert_eq!(
            FetchError::TaskFailed("panic".into()).kind(),
            ErrorKind::Aggregation
        );
    }

    #[test]
    fn test_bulk_root_unwraps_attribution() {
        let err = FetchError::Bulk {
            index: 3,
            url: "https://example.com".into(),
            source: Box::new(FetchError::Cancelled {
                url: "https://example.com".into(),
            }),
        };

        assert_eq!(err.kind(), ErrorKind::Aggregation);
        assert!(err.is_cancelled());
        assert!(matches!(err.root(), FetchError::Cancelled { .. }));
        assert!(err.to_string().contains("#3"));
    }

    #[test]
    fn test_empty_url_message() {
        assert_eq!(FetchError::EmptyUrl.to_string(), "empty URL");
    }
}
