//! Session context.
//!
//! Holds the signed-in user and their tokens. It is constructed once by the
//! application and handed to whatever needs it; all changes go through the
//! transition methods below.

use crate::error::AppError;
use crate::models::actor::Actor;
use crate::models::user::UserProfile;
use crate::services::credentials::{AuthTokens, TokenStore};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SessionState {
    tokens: Option<AuthTokens>,
    user: Option<UserProfile>,
}

/// Shared handle to the current session. Cloning is cheap.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            store,
        }
    }

    /// Load persisted tokens into memory. Returns whether any were found.
    ///
    /// The user is not known until the profile is fetched again.
    pub async fn restore(&self) -> Result<bool, AppError> {
        let tokens = self.store.load()?;
        let found = tokens.is_some();
        self.state.write().await.tokens = tokens;
        if found {
            log::info!("[session] Restored stored session tokens");
        }
        Ok(found)
    }

    /// Start a session after a successful login.
    pub async fn set_user(&self, user: UserProfile, tokens: AuthTokens) -> Result<(), AppError> {
        self.store.save(&tokens)?;
        let mut state = self.state.write().await;
        log::info!("[session] Signed in user {}", user.id);
        state.tokens = Some(tokens);
        state.user = Some(user);
        Ok(())
    }

    /// Replace the profile of the current session (e.g., after reloading it).
    pub async fn set_profile(&self, user: UserProfile) {
        self.state.write().await.user = Some(user);
    }

    /// Replace tokens after a refresh.
    pub async fn update_tokens(&self, tokens: AuthTokens) -> Result<(), AppError> {
        self.store.save(&tokens)?;
        self.state.write().await.tokens = Some(tokens);
        Ok(())
    }

    /// End the session. Calling this on an empty session is not an error.
    pub async fn logout(&self) -> Result<(), AppError> {
        {
            let mut state = self.state.write().await;
            state.tokens = None;
            state.user = None;
        }
        log::info!("[session] Session cleared");
        self.store.clear()
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.state.read().await.user.clone()
    }

    /// The signed-in user, or an authentication error.
    pub async fn require_user(&self) -> Result<UserProfile, AppError> {
        self.current_user()
            .await
            .ok_or_else(|| AppError::authentication("Not signed in"))
    }

    pub async fn actor(&self) -> Option<Actor> {
        self.state.read().await.user.as_ref().map(UserProfile::actor)
    }

    pub async fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .tokens
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .tokens
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.tokens.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::actor::UserType;
    use crate::services::credentials::MemoryTokenStore;

    fn advisor() -> UserProfile {
        UserProfile {
            id: 7,
            email: "advisor@uni.edu".to_string(),
            name: "Mehmet".to_string(),
            surname: "Demir".to_string(),
            user_type: UserType::Advisor,
            staff_role: None,
            department: Some("Physics".to_string()),
            faculty: None,
            student_number: None,
            student_id: None,
            advisor_id: None,
        }
    }

    fn tokens(access: &str) -> AuthTokens {
        AuthTokens {
            access_token: access.to_string(),
            refresh_token: Some("refresh".to_string()),
        }
    }

    #[tokio::test]
    async fn test_set_user_then_logout() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionContext::new(store.clone());

        session.set_user(advisor(), tokens("a1")).await.unwrap();
        assert_eq!(session.actor().await, Some(Actor::Advisor));
        assert_eq!(session.access_token().await.as_deref(), Some("a1"));
        assert!(store.load().unwrap().is_some());

        session.logout().await.unwrap();
        assert!(session.current_user().await.is_none());
        assert!(!session.is_authenticated().await);
        assert!(store.load().unwrap().is_none());

        // Idempotent
        session.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_restore_loads_tokens_only() {
        let store = Arc::new(MemoryTokenStore::new());
        store.save(&tokens("stored")).unwrap();

        let session = SessionContext::new(store);
        assert!(session.restore().await.unwrap());
        assert_eq!(session.access_token().await.as_deref(), Some("stored"));
        assert!(session.require_user().await.is_err());
    }

    #[tokio::test]
    async fn test_update_tokens_persists() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionContext::new(store.clone());
        session.set_user(advisor(), tokens("old")).await.unwrap();

        session.update_tokens(tokens("new")).await.unwrap();
        assert_eq!(session.access_token().await.as_deref(), Some("new"));
        assert_eq!(store.load().unwrap().unwrap().access_token, "new");
        assert!(session.current_user().await.is_some());
    }
}
