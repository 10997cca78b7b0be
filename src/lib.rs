//! # metagrab
//!
//! Fetch web pages concurrently and pull out a handful of metadata fields:
//! title, description, Open Graph / Twitter meta tags and the raw body.
//!
//! Extraction is deliberately regex-only. There is no HTML parser, so the
//! patterns are fast but order-sensitive: `<meta name="x" content="y">` is
//! matched, `<meta content="y" name="x">` is not.
//!
//! ## Features
//!
//! - **Field masks**: choose which fields to populate with a one-byte [`Fields`] bitmask
//! - **Shared client**: one [`FetchClient`] per process, pooled keep-alive connections
//! - **Buffer reuse**: response bodies are read into pooled buffers
//! - **Bulk fetch**: unbounded fan-out, results in input order, first failure cancels the rest
//! - **Cancellation and deadlines**: every fetch runs inside a [`FetchContext`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use metagrab::{ClientConfig, FetchClient, FetchContext, Fields};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FetchClient::new(ClientConfig::default())?;
//!     let ctx = FetchContext::with_timeout(Duration::from_secs(10));
//!
//!     let urls = vec![
//!         "https://example.com".to_string(),
//!         "https://www.rust-lang.org".to_string(),
//!     ];
//!     for link in client.fetch_bulk(&ctx, &urls, Fields::TITLE | Fields::META).await? {
//!         println!("{}: {}", link.url, link.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! metagrab https://example.com > link.json
//! metagrab --fields title,meta --timeout 5 https://example.com
//! ```

/// Client configuration and defaults
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// Field selection bitmask
pub mod fields;

/// Regex extraction of title, description and meta tags
pub mod extract;

/// Per-URL result record
pub mod link;

/// Pooled body buffers
pub mod buffer_pool;

/// Cancellation and deadline scope
pub mod context;

/// HTTP transport abstraction
pub mod transport;

/// Single fetch pipeline
pub mod client;

/// Concurrent bulk fetching
pub mod bulk;

/// Command-line interface implementation
pub mod cli;

/// Fetch metrics
pub mod metrics;

/// Utility functions and helpers
pub mod utils;


pub use self::buffer_pool::*;
pub use self::cli::*;
pub use self::client::*;
pub use self::config::*;
pub use self::context::*;
pub use self::error::*;
pub use self::fields::*;
pub use self::link::*;
pub use self::metrics::*;
pub use self::transport::*;
pub use self::utils::*;
