//! Management token acquisition and caching.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use url::Url;

use super::Credentials;
use crate::Error;

/// Tokens are refreshed once they have less than this much validity left.
const REFRESH_LEEWAY_SECS: i64 = 60;

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - ChronoDuration::seconds(REFRESH_LEEWAY_SECS) > now
    }
}

/// Resolves the bearer token attached to each management request.
pub(crate) struct TokenManager {
    credentials: Credentials,
    token_url: Url,
    audience: String,
    cached: RwLock<Option<CachedToken>>,
    refresh: tokio::sync::Mutex<()>,
}

impl TokenManager {
    pub(crate) fn new(credentials: Credentials, tenant_url: &Url) -> Result<Self, Error> {
        let token_url = tenant_url.join("oauth/token")?;
        let default_audience = tenant_url.join("api/v2/")?.to_string();
        let audience = credentials
            .as_client_credentials()
            .and_then(|c| c.audience.clone())
            .unwrap_or(default_audience);

        Ok(Self {
            credentials,
            token_url,
            audience,
            cached: RwLock::new(None),
            refresh: tokio::sync::Mutex::new(()),
        })
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns a token usable right now, exchanging credentials if needed.
    pub(crate) async fn token(&self, http: &reqwest::Client) -> Result<String, Error> {
        let config = match &self.credentials {
            Credentials::Bearer(bearer) => return Ok(bearer.token().to_string()),
            Credentials::Provider(provider) => return provider.get_token().await,
            Credentials::ClientCredentials(config) => config,
        };

        if let Some(token) = self.fresh_token() {
            return Ok(token);
        }

        let _guard = self.refresh.lock().await;
        // Another task may have refreshed while we waited.
        if let Some(token) = self.fresh_token() {
            return Ok(token);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            client_id = %config.client_id,
            "exchanging client credentials for a management token"
        );

        let body = TokenRequest {
            grant_type: "client_credentials",
            client_id: &config.client_id,
            client_secret: config.client_secret(),
            audience: &self.audience,
        };
        let response = http
            .post(self.token_url.clone())
            .header(reqwest::header::USER_AGENT, crate::user_agent::user_agent())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::from_response(status.as_u16(), &text));
        }

        let parsed: TokenResponse = serde_json::from_str(&text)?;
        let lifetime = parsed.expires_in.unwrap_or(86_400);
        let cached = CachedToken {
            access_token: parsed.access_token,
            expires_at: Utc::now() + ChronoDuration::seconds(lifetime),
        };
        let token = cached.access_token.clone();
        *self.cached.write() = Some(cached);
        Ok(token)
    }

    /// Drops the cached token so the next request exchanges again.
    ///
    /// Returns `false` for credentials that cannot be refreshed.
    pub(crate) fn invalidate(&self) -> bool {
        match self.credentials {
            Credentials::Bearer(_) => false,
            Credentials::Provider(_) => true,
            Credentials::ClientCredentials(_) => {
                *self.cached.write() = None;
                true
            }
        }
    }

    fn fresh_token(&self) -> Option<String> {
        self.cached
            .read()
            .as_ref()
            .filter(|t| t.is_fresh(Utc::now()))
            .map(|t| t.access_token.clone())
    }
}
