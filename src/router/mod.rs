//! Router transport and session handling
//!
//! This module contains everything that talks to the router's embedded web
//! server:
//! - Building the HTTP client with the per-request timeout
//! - Authenticated page fetches (cookie + referer)
//! - Login, logout and reboot with session token tracking

mod endpoints;
mod fetcher;
mod session;

pub use endpoints::{base_url, Page};
pub use fetcher::{build_http_client, PageFetcher};
pub use session::{auth_cookie, extract_token, RouterSession};
