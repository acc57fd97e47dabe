//! Authentication commands: sign in, sign out, session restore.

use crate::error::AppError;
use crate::models::actor::DashboardKind;
use crate::models::user::UserProfile;
use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// Input for the login command.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Response for the login command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub user: UserProfile,

    /// Dashboard to navigate to.
    pub dashboard: DashboardKind,
}

/// Sign in with email and password.
///
/// On success the session holds the user and the tokens are persisted.
///
/// # Errors
/// - Invalid input if either field is blank
/// - Authentication error if the backend rejects the credentials
pub async fn login(state: &AppState, input: LoginInput) -> Result<LoginResult, AppError> {
    let email = input.email.trim();
    if email.is_empty() {
        return Err(AppError::invalid_input_field("Email is required", "email"));
    }
    if input.password.is_empty() {
        return Err(AppError::invalid_input_field(
            "Password is required",
            "password",
        ));
    }

    let response = state.api.login(email, &input.password).await?;
    let tokens = response.tokens();
    let user = response.user;

    state.session.set_user(user.clone(), tokens).await?;

    Ok(LoginResult {
        dashboard: DashboardKind::for_actor(&user.actor()),
        user,
    })
}

/// Sign out.
///
/// The backend is told first, but the local session is cleared whether or
/// not that call succeeds.
pub async fn logout(state: &AppState) -> Result<(), AppError> {
    if state.session.is_authenticated().await {
        if let Err(e) = state.api.logout().await {
            log::warn!("[session] Backend logout failed: {}", e);
        }
    }
    state.session.logout().await?;
    state.notifications.clear();
    Ok(())
}

/// Reload the signed-in user's profile from the backend.
pub async fn current_user(state: &AppState) -> Result<UserProfile, AppError> {
    let user = state.api.current_user().await?;
    state.session.set_profile(user.clone()).await;
    Ok(user)
}

/// Resume a persisted session at startup.
///
/// Returns `None` when there is nothing to resume or the stored tokens are
/// no longer accepted.
pub async fn restore_session(state: &AppState) -> Result<Option<LoginResult>, AppError> {
    if !state.session.restore().await? {
        return Ok(None);
    }

    match current_user(state).await {
        Ok(user) => Ok(Some(LoginResult {
            dashboard: DashboardKind::for_actor(&user.actor()),
            user,
        })),
        Err(e) if e.is_authentication_expired() => Ok(None),
        Err(e) => Err(e),
    }
}
