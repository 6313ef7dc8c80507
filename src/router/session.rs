//! Router session management
//!
//! The firmware authenticates every request with a static cookie derived from
//! the username and the MD5 of the password. Logging in additionally yields a
//! 16-character token that prefixes the path of every other page.

use crate::config::RouterConfig;
use crate::router::{base_url, build_http_client, Page, PageFetcher};
use crate::{RouterError, RouterResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::{Digest, Md5};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[0-9A-Za-z.]+/([A-Z0-9]{16})/userRpm/Index\.htm")
            .expect("session token regex should compile")
    })
}

/// Builds the `Cookie` header value for the given identity
///
/// The value is `Authorization=` followed by
/// `base64(username + ":" + hex(md5(password)))`.
pub fn auth_cookie(username: &str, password: &str) -> String {
    let hashed = hex::encode(Md5::digest(password.as_bytes()));
    let credential = STANDARD.encode(format!("{}:{}", username, hashed));
    format!("Authorization={}", credential)
}

/// Extracts the session token from a login response body
///
/// # Errors
///
/// * `RouterError::Auth` - the token pattern occurs zero or several times;
///   the body is kept for diagnosis
pub fn extract_token(body: &str) -> RouterResult<String> {
    let tokens: Vec<&str> = token_pattern()
        .captures_iter(body)
        .filter_map(|captures| captures.get(1))
        .map(|token| token.as_str())
        .collect();

    match tokens.as_slice() {
        [token] => Ok(token.to_string()),
        _ => Err(RouterError::Auth {
            body: body.to_string(),
        }),
    }
}

/// Authentication state for one router
///
/// Holds the static credential and the token of the current login. The
/// token is cleared on logout, reboot and failed login.
#[derive(Debug)]
pub struct RouterSession {
    base: Url,
    fetcher: PageFetcher,
    token: Option<String>,
}

impl RouterSession {
    /// Creates a session for the configured router without logging in
    pub fn new(config: &RouterConfig) -> RouterResult<Self> {
        let base = base_url(&config.address)?;
        let client = build_http_client(config.timeout())?;
        let fetcher = PageFetcher::new(client, auth_cookie(&config.username, &config.password));

        Ok(Self {
            base,
            fetcher,
            token: None,
        })
    }

    /// Root URL of the router's web interface
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Token of the current login, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Logs in and stores the new session token
    ///
    /// Any previous token is discarded first, so a failed login never leaves
    /// a stale token behind.
    pub async fn login(&mut self) -> RouterResult<&str> {
        self.token = None;

        let url = Page::Login.url(&self.base, None)?;
        let body = self.fetcher.fetch(&url).await?;
        let token = extract_token(&body)?;

        tracing::debug!("Logged in to {}", self.base);
        Ok(self.token.insert(token).as_str())
    }

    /// Fetches an authenticated page with the current token
    pub async fn fetch_page(&self, page: Page) -> RouterResult<String> {
        let url = page.url(&self.base, self.token())?;
        self.fetcher.fetch(&url).await
    }

    /// Ends the session on the router
    ///
    /// Best effort: failures are logged and the local token is cleared either
    /// way.
    pub async fn logout(&mut self) {
        self.fire_and_clear(Page::Logout).await;
    }

    /// Asks the router to reboot, which also ends the session
    ///
    /// Best effort, like [`RouterSession::logout`].
    pub async fn reboot(&mut self) {
        self.fire_and_clear(Page::Reboot).await;
    }

    async fn fire_and_clear(&mut self, page: Page) {
        match self.fetch_page(page).await {
            Ok(_) => tracing::debug!("{:?} request sent to {}", page, self.base),
            Err(e) => tracing::warn!("{:?} request to {} failed: {}", page, self.base, e),
        }
        self.token = None;
    }
}
