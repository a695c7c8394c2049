//! Credential resolution from configuration.
//!
//! Google accepts an OAuth access token in the `Authorization` header or an
//! API key in the `key` query parameter. A fixed token expires after about an
//! hour; a service account key lets the client mint fresh ones. API keys only
//! grant read access, so writing the learned flag needs a token.

use std::path::PathBuf;

use super::types::SheetConfig;

/// Authentication type for Sheets API requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// `Authorization: Bearer <token>`.
    Bearer,
    /// `?key=<api key>`.
    ApiKey,
    /// Bearer tokens minted from a service account key file.
    ServiceAccount,
}

impl AuthType {
    /// Parse auth type from string.
    /// Defaults to `Bearer` for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "api_key" | "apikey" | "key" => AuthType::ApiKey,
            "service_account" => AuthType::ServiceAccount,
            _ => AuthType::Bearer,
        }
    }
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Use only when building the outgoing request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// How a request has to be authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Bearer(SecureString),
    ApiKey(SecureString),
    ServiceAccount { key_file: PathBuf },
}

impl SheetConfig {
    pub fn auth_type(&self) -> AuthType {
        AuthType::from_str(&self.auth_type_str)
    }

    /// Resolve the credential, or `None` when nothing usable is configured.
    pub fn credential(&self) -> Option<Credential> {
        if self.auth_type() == AuthType::ServiceAccount {
            let key_file = self
                .key_file
                .as_ref()
                .filter(|path| !path.as_os_str().is_empty())?;
            return Some(Credential::ServiceAccount {
                key_file: key_file.clone(),
            });
        }

        let token = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let secret = SecureString::new(token.to_string());
        Some(if self.auth_type() == AuthType::ApiKey {
            Credential::ApiKey(secret)
        } else {
            Credential::Bearer(secret)
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credential().is_some()
    }
}
