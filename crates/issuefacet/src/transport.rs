//! HTTP access to the GitHub search endpoint
//!
//! The session only sees the [`Transport`] trait, so tests can swap in fakes.
//! [`FetchError`] keeps the cause of a failure for logging; the view collapses
//! every variant into the same rate-limited state.

use crate::config::GithubConfig;
use crate::prelude::*;
use futures::future::BoxFuture;
use futures::FutureExt;
use issuefacet_core::github::{parse_search_response, transform_search_response, SearchResponse};

/// Why a search request failed
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited ({status}){}", format_reset(.reset))]
    RateLimited { status: u16, reset: Option<u64> },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse search response: {0}")]
    Decode(String),
}

fn format_reset(reset: &Option<u64>) -> String {
    reset.map(|r| format!(", resets at {r}")).unwrap_or_default()
}

/// Something that can execute one search request
pub trait Transport: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<SearchResponse, FetchError>>;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct GithubTransport {
    client: reqwest::Client,
}

impl GithubTransport {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| eyre!("Invalid user agent: {}", e))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client })
    }
}

impl Transport for GithubTransport {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<SearchResponse, FetchError>> {
        let client = self.client.clone();
        let url = url.to_string();

        async move {
            let response = client.get(&url).send().await?;
            let response = check_response(response).await?;
            let body = response.text().await?;

            let search_response =
                parse_search_response(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

            Ok(transform_search_response(search_response))
        }
        .boxed()
    }
}

/// Check an HTTP response for error statuses.
///
/// - **403 / 429** → [`FetchError::RateLimited`], with the
///   `X-RateLimit-Reset` epoch seconds when GitHub sent them.
/// - **Other non-success** → [`FetchError::Api`] with the response body.
pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = response.status();

    if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS
    {
        return Err(FetchError::RateLimited {
            status: status.as_u16(),
            reset: parse_rate_limit_reset(&response),
        });
    }

    if !status.is_success() {
        return Err(FetchError::Api {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        });
    }

    Ok(response)
}

fn parse_rate_limit_reset(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
