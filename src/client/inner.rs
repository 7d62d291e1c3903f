//! Internal client implementation.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::auth::TokenManager;
use crate::config::RetryConfig;
use crate::error::{Error, ErrorKind};

/// Headers that may carry the server's request correlation ID.
const REQUEST_ID_HEADERS: [&str; 2] = ["x-auth0-requestid", "x-request-id"];

pub(crate) struct ClientInner {
    /// The tenant URL, always ending in `/`.
    pub url: Url,

    /// `{url}api/v2/`.
    pub api_url: Url,

    /// Retry configuration.
    pub retry_config: RetryConfig,

    /// Request timeout.
    pub timeout: Duration,

    /// Shared HTTP client.
    pub http_client: reqwest::Client,

    /// Bearer token source.
    pub tokens: TokenManager,
}

impl ClientInner {
    /// Builds a Management API URL from individually percent-encoded path
    /// segments.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::invalid_argument(format!(
                "invalid path segment {:?}",
                segment
            )));
        }

        let path = segments
            .iter()
            .map(|s| urlencoding::encode(s))
            .collect::<Vec<_>>()
            .join("/");

        self.api_url.join(&path).map_err(Error::from)
    }

    /// Makes a GET request.
    pub(crate) async fn get<R>(&self, segments: &[&str]) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(Method::GET, url, None).await
    }

    /// Makes a GET request with query parameters.
    pub(crate) async fn get_with_query<R>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        self.execute(Method::GET, url, None).await
    }

    /// Makes a POST request.
    pub(crate) async fn post<T, R>(&self, segments: &[&str], body: &T) -> Result<R, Error>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(Method::POST, url, Some(serde_json::to_vec(body)?))
            .await
    }

    /// Makes a PUT request.
    pub(crate) async fn put<T, R>(&self, segments: &[&str], body: &T) -> Result<R, Error>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(Method::PUT, url, Some(serde_json::to_vec(body)?))
            .await
    }

    /// Makes a PATCH request.
    pub(crate) async fn patch<T, R>(&self, segments: &[&str], body: &T) -> Result<R, Error>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(Method::PATCH, url, Some(serde_json::to_vec(body)?))
            .await
    }

    /// Makes a DELETE request.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), Error> {
        let url = self.endpoint(segments)?;
        self.execute::<serde_json::Value>(Method::DELETE, url, None)
            .await
            .map(drop)
    }

    /// Makes a DELETE request carrying a JSON body.
    pub(crate) async fn delete_with_body<T>(&self, segments: &[&str], body: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        self.execute::<serde_json::Value>(Method::DELETE, url, Some(serde_json::to_vec(body)?))
            .await
            .map(drop)
    }

    /// Sends a request, retrying per the retry configuration, and decodes
    /// the JSON response. An empty body decodes as `null`.
    async fn execute<R>(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let mut attempt: u32 = 0;
        let mut reauthenticated = false;

        loop {
            let outcome = self.send_once(&method, &url, body.as_deref()).await;

            let err = match outcome {
                Ok(bytes) => return decode(&bytes),
                Err(err) => err,
            };

            if err.kind() == ErrorKind::Unauthorized && !reauthenticated && self.tokens.invalidate()
            {
                reauthenticated = true;
                #[cfg(feature = "tracing")]
                tracing::debug!(%method, path = url.path(), "token rejected, reauthenticating");
                continue;
            }

            if !self.retry_config.should_retry(err.kind(), attempt) {
                return Err(err);
            }

            attempt += 1;
            let delay = self.retry_config.delay_with_hint(attempt, err.retry_after());

            #[cfg(feature = "tracing")]
            tracing::warn!(
                %method,
                path = url.path(),
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "retrying management request"
            );

            tokio::time::sleep(delay).await;
        }
    }

    /// Performs a single HTTP exchange and returns the raw success body.
    async fn send_once(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, Error> {
        let token = self.tokens.token(&self.http_client).await?;

        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .headers(default_headers())
            .bearer_auth(token)
            .timeout(self.timeout);
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;
        let status = response.status();

        #[cfg(feature = "tracing")]
        tracing::debug!(%method, path = url.path(), status = status.as_u16(), "management request");

        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        let retry_after = retry_hint(response.headers());
        let request_id = request_id(response.headers());
        let text = response.text().await.unwrap_or_default();

        let mut err = Error::from_response(status.as_u16(), &text);
        if let Some(delay) = retry_after {
            err = err.with_retry_after(delay);
        }
        if let Some(id) = request_id {
            err = err.with_request_id(id);
        }
        Err(err)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn decode<R>(bytes: &[u8]) -> Result<R, Error>
where
    R: DeserializeOwned,
{
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(bytes).map_err(|e| {
        Error::new(
            ErrorKind::Protocol,
            format!("failed to parse response: {}", e),
        )
        .with_source(e)
    })
}

/// Reads the server's backoff hint from `Retry-After` (seconds) or
/// `X-RateLimit-Reset` (unix timestamp).
fn retry_hint(headers: &HeaderMap) -> Option<Duration> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    if let Some(seconds) = header("retry-after") {
        return u64::try_from(seconds).ok().map(Duration::from_secs);
    }

    header("x-ratelimit-reset").map(|reset| {
        let remaining = reset - chrono::Utc::now().timestamp();
        Duration::from_secs(u64::try_from(remaining).unwrap_or(0))
    })
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    REQUEST_ID_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
