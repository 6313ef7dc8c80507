//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests to the router, including:
//! - Building the HTTP client with a bounded timeout
//! - Attaching the static credential cookie and the referer header
//! - Folding timeouts, connection failures and error statuses into one
//!   transport error

use crate::{RouterError, RouterResult};
use reqwest::header::{COOKIE, REFERER};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client for talking to the router
///
/// The timeout bounds every request end to end. Idle connections are not
/// pooled, so each fetch is a fresh round trip.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use tplink_exporter::router::build_http_client;
///
/// let client = build_http_client(Duration::from_secs(2)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let user_agent = format!("tplink-exporter/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .pool_max_idle_per_host(0)
        .build()
}

/// Performs authenticated GET requests against the router
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    cookie: String,
}

impl PageFetcher {
    /// Creates a fetcher that sends `cookie` verbatim as the `Cookie` header
    pub fn new(client: Client, cookie: String) -> Self {
        Self { client, cookie }
    }

    /// Fetches a page body
    ///
    /// The referer is set to the page itself; the firmware rejects requests
    /// whose referer does not point at the router.
    ///
    /// # Errors
    ///
    /// * `RouterError::Transport` - connection failure, timeout or non-2xx
    ///   status
    pub async fn fetch(&self, url: &Url) -> RouterResult<String> {
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(COOKIE, &self.cookie)
            .header(REFERER, url.as_str())
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouterError::Transport {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| transport_error(url, &e))
    }
}

fn transport_error(url: &Url, error: &reqwest::Error) -> RouterError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    RouterError::Transport {
        url: url.to_string(),
        message,
    }
}
