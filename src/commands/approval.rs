//! Approval commands for the stage-specific approval lists.
//!
//! Every approver screen goes through these handlers. Gating is computed
//! by `StageControls`; no screen re-derives the chain order itself.

use crate::error::AppError;
use crate::models::actor::resolve_gate;
use crate::services::approval_workflow::{self, DecisionOutcome, StageScreen, StudentScope};
use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// What the approval screen shows for the signed-in user.
#[derive(Debug, Serialize)]
#[serde(tag = "state", content = "screen", rename_all = "camelCase")]
pub enum StageAccess {
    /// The user operates no approval gate.
    NotAccessible,
    Ready(StageScreen),
}

/// Input for the submit_decision command.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionInput {
    pub student_id: i64,
    /// `true` to approve, `false` to reject.
    pub approved: bool,
}

/// Open the approval list for the signed-in user's gate.
///
/// Load failures are also pushed as a notification.
pub async fn open_approval_screen(state: &AppState) -> Result<StageAccess, AppError> {
    let user = state.session.require_user().await?;
    let Some(gate) = resolve_gate(&user.actor()) else {
        return Ok(StageAccess::NotAccessible);
    };

    let result = match StudentScope::for_gate(gate, &user) {
        Ok(scope) => StageScreen::load(&state.api, gate, scope).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(screen) => Ok(StageAccess::Ready(screen)),
        Err(e) => {
            state.notifications.error(&e);
            Err(e)
        }
    }
}

/// Reload an open list. On failure the list is left unchanged.
pub async fn refresh_approval_screen(
    state: &AppState,
    screen: &mut StageScreen,
) -> Result<(), AppError> {
    match StageScreen::load(&state.api, screen.gate, screen.scope.clone()).await {
        Ok(fresh) => {
            *screen = fresh;
            Ok(())
        }
        Err(e) => {
            state.notifications.error(&e);
            Err(e)
        }
    }
}

/// Approve or reject one student on an open list.
///
/// # Errors
/// Only when the signed-in user does not operate the screen's gate.
/// Lookup and submission failures are reported through the returned
/// outcome and the notification queue.
pub async fn submit_decision(
    state: &AppState,
    screen: &mut StageScreen,
    input: DecisionInput,
) -> Result<DecisionOutcome, AppError> {
    let user = state.session.require_user().await?;
    if resolve_gate(&user.actor()) != Some(screen.gate) {
        let e = AppError::forbidden(format!(
            "You cannot decide at the {} stage",
            screen.gate.label()
        ));
        state.notifications.error(&e);
        return Err(e);
    }

    Ok(approval_workflow::decide(
        &state.api,
        &state.notifications,
        screen,
        input.student_id,
        input.approved,
    )
    .await)
}
