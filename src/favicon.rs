//! Favicon downloads.
//!
//! Candidates are tried in a fixed order: the site's own `/favicon.ico`, then
//! each configured favicon service. The first successful download wins and is
//! stored as `<favicon_dir>/<host>.png`.

use crate::config::FaviconConfig;
use crate::error::ApiError;
use reqwest::{redirect, Client, StatusCode, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of favicon files for new bookmarks.
pub trait FaviconSource {
    /// Local path of a favicon for `page_url`, or None if none could be fetched.
    fn fetch_favicon(&self, page_url: &str) -> Option<PathBuf>;
}

/// Outcome of a single candidate download
#[derive(Debug)]
enum Attempt {
    Saved,
    Unavailable(String),
}

/// HTTP favicon fetcher with a fixed fallback chain.
pub struct FaviconFetcher {
    client: Client,
    favicon_dir: PathBuf,
    services: Vec<String>,
}

impl FaviconFetcher {
    pub fn new(config: &FaviconConfig, favicon_dir: PathBuf) -> Result<Self, ApiError> {
        // Redirects are followed by hand so each attempt gets at most one.
        let client = Client::builder()
            .no_proxy()
            .redirect(redirect::Policy::none())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            favicon_dir,
            services: config.services.clone(),
        })
    }

    /// Candidate favicon URLs for a page, in the order they are tried.
    pub fn candidate_urls(&self, page: &Url) -> Vec<String> {
        let Some(host) = page.host_str() else {
            return Vec::new();
        };
        let mut candidates = Vec::with_capacity(self.services.len() + 1);
        if let Ok(own) = page.join("/favicon.ico") {
            candidates.push(own.to_string());
        }
        candidates.extend(
            self.services
                .iter()
                .map(|template| template.replace("{domain}", host)),
        );
        candidates
    }

    /// Download a favicon for `page_url`. Never fails; None means every candidate failed.
    pub async fn fetch(&self, page_url: &str) -> Option<PathBuf> {
        let page = match Url::parse(page_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(url = page_url, error = %e, "Cannot fetch favicon for invalid URL");
                return None;
            }
        };
        let host = page.host_str()?.to_string();

        if let Err(e) = std::fs::create_dir_all(&self.favicon_dir) {
            warn!(dir = %self.favicon_dir.display(), error = %e, "Cannot create favicon directory");
            return None;
        }
        let dest = self.favicon_dir.join(format!("{}.png", host));

        for candidate in self.candidate_urls(&page) {
            match self.download(&candidate, &dest).await {
                Attempt::Saved => {
                    debug!(source = %candidate, path = %dest.display(), "Favicon saved");
                    return Some(dest);
                }
                Attempt::Unavailable(reason) => {
                    debug!(source = %candidate, reason = %reason, "Favicon candidate failed");
                }
            }
        }
        None
    }

    async fn download(&self, url: &str, dest: &Path) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => return Attempt::Unavailable(e.to_string()),
        };

        let response = match response.status() {
            StatusCode::OK => response,
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => {
                let Some(target) = redirect_target(response.url(), response.headers()) else {
                    return Attempt::Unavailable("redirect without location".to_string());
                };
                match self.client.get(target).send().await {
                    Ok(r) if r.status() == StatusCode::OK => r,
                    Ok(r) => return Attempt::Unavailable(format!("status {} after redirect", r.status())),
                    Err(e) => return Attempt::Unavailable(e.to_string()),
                }
            }
            status => return Attempt::Unavailable(format!("status {}", status)),
        };

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return Attempt::Unavailable(e.to_string()),
        };
        match std::fs::write(dest, &body) {
            Ok(()) => Attempt::Saved,
            Err(e) => Attempt::Unavailable(format!("write failed: {}", e)),
        }
    }
}

fn redirect_target(base: &Url, headers: &reqwest::header::HeaderMap) -> Option<Url> {
    let location = headers.get(reqwest::header::LOCATION)?.to_str().ok()?;
    base.join(location).ok()
}

impl FaviconSource for FaviconFetcher {
    /// Runs the async fetch on a short-lived runtime.
    fn fetch_favicon(&self, page_url: &str) -> Option<PathBuf> {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                warn!(error = %e, "Failed to create runtime for favicon download");
                return None;
            }
        };
        rt.block_on(self.fetch(page_url))
    }
}
