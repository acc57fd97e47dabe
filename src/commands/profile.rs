//! Profile page commands.

use crate::error::AppError;
use crate::models::user::UserProfile;
use crate::state::AppState;
use serde::Deserialize;

/// Minimum length of a new password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Input for the change_password command.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChangeInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.current_password.is_empty() {
            return Err(AppError::invalid_input_field(
                "Current password is required",
                "currentPassword",
            ));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input_field(
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
                "newPassword",
            ));
        }
        if self.new_password != self.confirm_password {
            return Err(AppError::invalid_input_field(
                "Passwords do not match",
                "confirmPassword",
            ));
        }
        if self.new_password == self.current_password {
            return Err(AppError::invalid_input_field(
                "New password must differ from the current one",
                "newPassword",
            ));
        }
        Ok(())
    }
}

/// The signed-in user's profile, as held by the session.
pub async fn get_profile(state: &AppState) -> Result<UserProfile, AppError> {
    state.session.require_user().await
}

/// Change the signed-in user's password.
pub async fn change_password(state: &AppState, input: PasswordChangeInput) -> Result<(), AppError> {
    state.session.require_user().await?;
    input.validate()?;
    state
        .api
        .change_password(&input.current_password, &input.new_password)
        .await?;
    state.notifications.success("Password changed.");
    Ok(())
}
