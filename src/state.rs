//! Application state shared by all command handlers.

use crate::config::ClientSettings;
use crate::error::AppError;
use crate::services::api_client::{ApiClient, ApiClientConfig};
use crate::services::credentials::{KeyringTokenStore, TokenStore};
use crate::services::notifications::NotificationCenter;
use crate::services::session::SessionContext;
use std::path::Path;
use std::sync::Arc;

/// Everything a screen needs. Cloning shares the underlying session and
/// notification queue.
#[derive(Clone)]
pub struct AppState {
    pub settings: ClientSettings,
    pub session: SessionContext,
    pub api: ApiClient,
    pub notifications: NotificationCenter,
}

impl AppState {
    /// Build state around an explicit token store.
    pub fn new(settings: ClientSettings, store: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        settings.validate()?;
        let session = SessionContext::new(store);
        let api = ApiClient::new(ApiClientConfig::from(&settings), session.clone())?;

        Ok(Self {
            settings,
            session,
            api,
            notifications: NotificationCenter::new(),
        })
    }

    /// Load settings from the data directory and keep tokens in the OS
    /// keychain.
    pub fn initialize(app_data_dir: &Path) -> Result<Self, AppError> {
        let settings = ClientSettings::load(app_data_dir)?;
        let store = Arc::new(KeyringTokenStore::new(&settings.api_base_url));
        Self::new(settings, store)
    }
}
