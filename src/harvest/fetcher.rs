//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made while harvesting:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for index, archive and detail pages
//! - Error classification into HTTP and network failures
//!
//! Requests are never retried; a failed fetch is reported to the caller,
//! which decides whether it aborts a journal or only empties a field.

use crate::config::UserAgentConfig;
use crate::HarvestError;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, broken body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the page body is available
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Extracts the page body, turning failures into a `HarvestError`
    ///
    /// # Arguments
    ///
    /// * `url` - The requested URL, used in the error message
    pub fn into_body(self, url: &str) -> Result<String, HarvestError> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::HttpError { status_code } => Err(HarvestError::Fetch {
                url: url.to_string(),
                status_code,
            }),
            Self::NetworkError { error } => Err(HarvestError::Network {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Source of raw page markup
///
/// The harvester only ever asks for whole pages by URL. Implementations
/// report failures through `FetchResult` rather than panicking.
pub trait Fetcher {
    /// Fetches a page by absolute URL
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// `Fetcher` backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a client configured by `build_http_client`
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use journal_harvest::config::UserAgentConfig;
/// use journal_harvest::harvest::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Success |
/// | Other HTTP status | HttpError |
/// | Timeout | NetworkError |
/// | Connection refused | NetworkError |
/// | Body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_into_body_success() {
        let result = FetchResult::Success {
            final_url: "https://example.com/".to_string(),
            status_code: 200,
            body: "<html></html>".to_string(),
        };
        assert!(result.is_success());
        assert_eq!(result.into_body("https://example.com/").unwrap(), "<html></html>");
    }

    #[test]
    fn test_into_body_http_error() {
        let result = FetchResult::HttpError { status_code: 404 };
        assert!(!result.is_success());
        match result.into_body("https://example.com/missing") {
            Err(HarvestError::Fetch { url, status_code }) => {
                assert_eq!(url, "https://example.com/missing");
                assert_eq!(status_code, 404);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_into_body_network_error() {
        let result = FetchResult::NetworkError {
            error: "Connection refused".to_string(),
        };
        assert!(matches!(
            result.into_body("https://example.com/"),
            Err(HarvestError::Network { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let fetcher = HttpFetcher::new(&UserAgentConfig::default(), Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections
        let result = fetcher.fetch("http://127.0.0.1:9/").await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
