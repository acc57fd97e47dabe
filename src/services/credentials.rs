//! Token storage.
//!
//! The backend issues an opaque access/refresh token pair at login. The
//! client only persists and relays them. [`KeyringTokenStore`] keeps them in
//! the system's native credential storage (Keychain on macOS, Credential
//! Manager on Windows, Secret Service on Linux).

use crate::error::AppError;
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Service name used in the keychain.
const SERVICE_NAME: &str = "graduation-client";

/// Token pair issued by the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

/// Persistent storage for the session's tokens.
pub trait TokenStore: Send + Sync {
    /// Load stored tokens, if any.
    fn load(&self) -> Result<Option<AuthTokens>, AppError>;

    /// Replace the stored tokens.
    fn save(&self, tokens: &AuthTokens) -> Result<(), AppError>;

    /// Remove stored tokens. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), AppError>;
}

/// Token store backed by the OS keychain, one entry per API URL.
pub struct KeyringTokenStore {
    account: String,
}

impl KeyringTokenStore {
    /// Create a store for the given API base URL.
    pub fn new(api_base_url: &str) -> Self {
        Self {
            account: normalize_url(api_base_url),
        }
    }

    /// Create a keyring entry for this store's account.
    fn entry(&self) -> Result<Entry, AppError> {
        Entry::new(SERVICE_NAME, &self.account).map_err(|e| {
            AppError::credential_storage(format!("Failed to create keyring entry: {}", e))
        })
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<AuthTokens>, AppError> {
        match self.entry()?.get_password() {
            Ok(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                AppError::credential_storage(format!("Stored tokens are unreadable: {}", e))
            }),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::credential_storage(format!(
                "Failed to retrieve tokens: {}",
                e
            ))),
        }
    }

    fn save(&self, tokens: &AuthTokens) -> Result<(), AppError> {
        let raw = serde_json::to_string(tokens)?;
        self.entry()?
            .set_password(&raw)
            .map_err(|e| AppError::credential_storage(format!("Failed to store tokens: {}", e)))
    }

    fn clear(&self) -> Result<(), AppError> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AppError::credential_storage(format!(
                "Failed to delete tokens: {}",
                e
            ))),
        }
    }
}

/// In-process token store. Tokens are lost when the process exits.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<AuthTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<AuthTokens>>, AppError> {
        self.tokens
            .lock()
            .map_err(|_| AppError::credential_storage("Token store lock poisoned"))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthTokens>, AppError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, tokens: &AuthTokens) -> Result<(), AppError> {
        *self.lock()? = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Normalize a URL for use as an account identifier.
///
/// Removes trailing slashes and converts to lowercase.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_lowercase()
}
