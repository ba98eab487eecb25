// ABOUTME: Product page acquisition: reqwest fetcher with rotating browser headers.
// ABOUTME: Detects CAPTCHA interstitials and maps transport failures to categorized ScrapeErrors.

//! Page acquisition.
//!
//! The extraction engine consumes an already-fetched document; this module
//! is the collaborator that supplies it. Every request carries a browser
//! identity rotated round-robin from a fixed pool, plus the Accept-Language
//! and Referer headers the storefront expects. A 200 response whose body is
//! a CAPTCHA interstitial is an error, not a document.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use url::Url;

use crate::error::ScrapeError;

/// Marker phrases identifying a CAPTCHA interstitial page.
const CAPTCHA_MARKERS: &[&str] = &[
    "Enter the characters you see below",
    "api-services-support@amazon.com",
    "/errors/validateCaptcha",
];

/// Default browser identity pool, rotated per request.
const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// Options for the product page fetcher.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agents: Vec<String>,
    pub accept_language: String,
    pub referer: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: "https://www.amazon.in".to_string(),
            timeout: Duration::from_secs(10),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            accept_language: "en-IN,en;q=0.9".to_string(),
            referer: "https://www.google.com/".to_string(),
        }
    }
}

/// Fetches product pages with rotating request identities.
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    opts: FetchOptions,
    cursor: AtomicUsize,
}

impl Fetcher {
    /// Builds a fetcher, validating the base URL up front.
    pub fn new(opts: FetchOptions) -> Result<Self, ScrapeError> {
        Url::parse(&opts.base_url).map_err(|e| {
            ScrapeError::invalid_url("", "NewFetcher", Some(anyhow::anyhow!("base URL: {}", e)))
        })?;

        let client = reqwest::Client::builder()
            .timeout(opts.timeout)
            .gzip(true)
            .build()
            .map_err(|e| {
                ScrapeError::fetch("", "NewFetcher", Some(anyhow::anyhow!("client: {}", e)))
            })?;

        Ok(Self {
            client,
            opts,
            cursor: AtomicUsize::new(0),
        })
    }

    /// The product page URL for one identifier.
    pub fn product_url(&self, asin: &str) -> String {
        format!("{}/dp/{}", self.opts.base_url.trim_end_matches('/'), asin)
    }

    fn next_user_agent(&self) -> &str {
        if self.opts.user_agents.is_empty() {
            return DEFAULT_USER_AGENTS[0];
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.opts.user_agents.len();
        &self.opts.user_agents[idx]
    }

    /// Fetches one product page as decoded HTML.
    ///
    /// Non-200 statuses map to `Fetch`, transport timeouts to `Timeout`,
    /// and CAPTCHA interstitials to `Captcha`.
    pub async fn get_product_page(&self, asin: &str) -> Result<String, ScrapeError> {
        let url = self.product_url(asin);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, self.next_user_agent())
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.opts.accept_language)
            .header(reqwest::header::REFERER, &self.opts.referer)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScrapeError::timeout(asin, "GetPage", Some(e.into()))
                } else {
                    ScrapeError::fetch(asin, "GetPage", Some(e.into()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::fetch(
                asin,
                "GetPage",
                Some(anyhow::anyhow!("status {}", status.as_u16())),
            ));
        }

        let body = response.text().await.map_err(|e| {
            ScrapeError::fetch(asin, "GetPage", Some(anyhow::anyhow!("read body: {}", e)))
        })?;

        if looks_like_captcha(&body) {
            return Err(ScrapeError::captcha(asin, "GetPage"));
        }

        Ok(body)
    }
}

/// Returns true when a response body is a CAPTCHA interstitial rather
/// than a product page.
pub fn looks_like_captcha(body: &str) -> bool {
    CAPTCHA_MARKERS.iter().any(|marker| body.contains(marker))
}
