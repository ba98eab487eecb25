// ABOUTME: Error types for page acquisition, with categorized ErrorCode and convenience helpers.
// ABOUTME: Field-level extraction degradation never reaches this type; it exists for fetch failures only.

use std::fmt;

/// Error codes for the categories of acquisition failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Captcha,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Captcha => "CAPTCHA interstitial",
        };
        write!(f, "{}", s)
    }
}

/// An acquisition failure for one product identifier.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub asin: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prodex: {} {}: {}", self.op, self.asin, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ScrapeError {
    pub fn invalid_url(
        asin: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidUrl,
            asin: asin.into(),
            op: op.into(),
            source,
        }
    }

    pub fn fetch(
        asin: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Fetch,
            asin: asin.into(),
            op: op.into(),
            source,
        }
    }

    pub fn timeout(
        asin: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Timeout,
            asin: asin.into(),
            op: op.into(),
            source,
        }
    }

    pub fn captcha(asin: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Captcha,
            asin: asin.into(),
            op: op.into(),
            source: None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    pub fn is_captcha(&self) -> bool {
        self.code == ErrorCode::Captcha
    }

    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }
}
