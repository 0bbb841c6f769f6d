//! URL shortening service client
//!
//! This module provides the trait seam for the external link-shortening
//! service and its HTTP implementation. Shortening is best-effort; callers
//! are expected to fall back to the unshortened URL on any error here.

use serde_json::Value;
use thiserror::Error;

/// Response field names under which services report the shortened URL,
/// checked in order. An empty string counts as absent.
const SHORT_URL_FIELDS: [&str; 3] = ["shortenedUrl", "short", "url"];

/// Errors that can occur while shortening a URL
#[derive(Debug, Error)]
pub enum ShortenerError {
    /// The HTTP request to the shortening service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status code
    #[error("Service returned HTTP {0}")]
    BadStatus(u16),

    /// The service response was not valid JSON
    #[error("Failed to parse service response: {0}")]
    ParseFailed(String),

    /// The response carried none of the known shortened-URL fields
    #[error("Service response carried no shortened URL")]
    UnrecognizedPayload,
}

/// Trait for services that can shorten a URL
///
/// Implementors perform a single shortening attempt; retry and fallback
/// policy live with the caller.
pub trait UrlShortener {
    /// Attempts to shorten the given URL
    ///
    /// # Arguments
    ///
    /// * `url` - The raw URL to shorten
    ///
    /// # Returns
    ///
    /// The shortened URL, or a ShortenerError describing why the attempt
    /// failed.
    fn shorten(&self, url: &str) -> Result<String, ShortenerError>;
}

/// Shortener backed by an HTTP GET API
///
/// Calls `{api_url}?api={key}&url={raw}&format=json` and accepts the first
/// known field of the JSON response as the shortened URL.
pub struct HttpShortener {
    client: reqwest::blocking::Client,
    api_url: String,
    api_key: String,
}

impl HttpShortener {
    /// Creates a new shortener for the given endpoint and credential
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl UrlShortener for HttpShortener {
    fn shorten(&self, url: &str) -> Result<String, ShortenerError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("api", self.api_key.as_str()),
                ("url", url),
                ("format", "json"),
            ])
            .send()
            .map_err(|e| ShortenerError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ShortenerError::BadStatus(response.status().as_u16()));
        }

        let payload: Value = response
            .json()
            .map_err(|e| ShortenerError::ParseFailed(e.to_string()))?;

        extract_short_url(&payload).ok_or(ShortenerError::UnrecognizedPayload)
    }
}

/// Picks the shortened URL out of a service response payload
///
/// Services report the result under different field names; the first known
/// field holding a non-empty string wins.
fn extract_short_url(payload: &Value) -> Option<String> {
    SHORT_URL_FIELDS
        .iter()
        .find_map(|field| {
            payload
                .get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
}
