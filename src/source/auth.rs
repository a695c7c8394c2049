//! Request authentication, including service account tokens.
//!
//! A service account signs a short-lived JWT with its private key and trades
//! it at `token_uri` for an access token. Tokens are cached until shortly
//! before they expire, and dropped early when the API rejects one.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::config::{Credential, SecureString};

use super::error::StoreError;

/// Read/write access to spreadsheets.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

/// The fields of a Google service account key file this client needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidKey(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        serde_json::from_str(text).map_err(|e| StoreError::InvalidKey(e.to_string()))
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

#[derive(Deserialize)]
struct TokenErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

struct AccessToken {
    value: SecureString,
    refresh_at: Instant,
}

/// Mints and caches access tokens for one service account.
pub struct ServiceAccountTokens {
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    cached: Mutex<Option<AccessToken>>,
}

impl ServiceAccountTokens {
    pub fn new(key: ServiceAccountKey) -> Result<Self, StoreError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::InvalidKey(format!("private_key: {e}")))?;
        Ok(Self {
            key,
            signing_key,
            cached: Mutex::new(None),
        })
    }

    /// A valid access token, exchanging a new assertion when the cached one
    /// is missing or about to expire.
    pub fn token(&self, client: &Client) -> Result<SecureString, StoreError> {
        let mut cached = self.cached.lock();
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.exchange(client)?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    /// Forget the cached token; the next call mints a new one.
    pub fn invalidate(&self) {
        self.cached.lock().take();
    }

    fn claims(&self, now: u64) -> Claims<'_> {
        Claims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }

    fn assertion(&self) -> Result<String, StoreError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        encode(&header, &self.claims(now), &self.signing_key)
            .map_err(|e| StoreError::InvalidKey(format!("signing failed: {e}")))
    }

    fn exchange(&self, client: &Client) -> Result<AccessToken, StoreError> {
        let assertion = self.assertion()?;
        let requested_at = Instant::now();
        let response = client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorBody>(&body) {
                Ok(err) if !err.error_description.is_empty() => err.error_description,
                Ok(err) if !err.error.is_empty() => err.error,
                _ => body.chars().take(200).collect(),
            };
            return Err(StoreError::Token {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response.json()?;
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(EXPIRY_MARGIN);
        tracing::info!(
            account = %self.key.client_email,
            expires_in = body.expires_in,
            "Access token issued"
        );
        Ok(AccessToken {
            value: SecureString::new(body.access_token),
            refresh_at: requested_at + lifetime,
        })
    }
}

/// How each request of a session is authenticated.
pub(super) enum RequestAuth {
    Bearer(SecureString),
    ApiKey(SecureString),
    ServiceAccount(ServiceAccountTokens),
}

impl RequestAuth {
    pub(super) fn from_credential(credential: Credential) -> Result<Self, StoreError> {
        Ok(match credential {
            Credential::Bearer(token) => RequestAuth::Bearer(token),
            Credential::ApiKey(key) => RequestAuth::ApiKey(key),
            Credential::ServiceAccount { key_file } => {
                let key = ServiceAccountKey::from_file(&key_file)?;
                tracing::debug!(account = %key.client_email, "Using service account");
                RequestAuth::ServiceAccount(ServiceAccountTokens::new(key)?)
            }
        })
    }

    /// The key to append as `?key=`, for API-key auth.
    pub(super) fn api_key(&self) -> Option<&SecureString> {
        match self {
            RequestAuth::ApiKey(key) => Some(key),
            _ => None,
        }
    }

    pub(super) fn apply(
        &self,
        builder: RequestBuilder,
        client: &Client,
    ) -> Result<RequestBuilder, StoreError> {
        Ok(match self {
            RequestAuth::Bearer(token) => builder.bearer_auth(token.expose()),
            RequestAuth::ApiKey(_) => builder,
            RequestAuth::ServiceAccount(tokens) => {
                builder.bearer_auth(tokens.token(client)?.expose())
            }
        })
    }

    /// Drop a rejected token. Returns whether a retry can use a different one.
    pub(super) fn refresh(&self) -> bool {
        match self {
            RequestAuth::ServiceAccount(tokens) => {
                tokens.invalidate();
                true
            }
            _ => false,
        }
    }
}
