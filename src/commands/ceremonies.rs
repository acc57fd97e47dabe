//! Ceremony planning commands.

use crate::error::AppError;
use crate::models::actor::{Actor, StaffRole};
use crate::models::ceremony::{Ceremony, CeremonyInput};
use crate::state::AppState;

/// Whether an actor may create, edit or delete ceremonies.
pub fn can_manage_ceremonies(actor: &Actor) -> bool {
    matches!(
        actor,
        Actor::Staff(StaffRole::StudentAffairs) | Actor::Staff(StaffRole::Rectorate)
    )
}

async fn require_manager(state: &AppState) -> Result<(), AppError> {
    let user = state.session.require_user().await?;
    if can_manage_ceremonies(&user.actor()) {
        Ok(())
    } else {
        Err(AppError::forbidden("Only student affairs and the rectorate manage ceremonies"))
    }
}

/// List all ceremonies, soonest first.
pub async fn list_ceremonies(state: &AppState) -> Result<Vec<Ceremony>, AppError> {
    let mut ceremonies = state.api.list_ceremonies().await?;
    ceremonies.sort_by_key(|c| c.scheduled_at);
    Ok(ceremonies)
}

/// Create a ceremony.
pub async fn create_ceremony(state: &AppState, input: CeremonyInput) -> Result<Ceremony, AppError> {
    require_manager(state).await?;
    input.validate()?;
    let ceremony = state.api.create_ceremony(&input).await?;
    state.notifications.success("Ceremony created.");
    Ok(ceremony)
}

/// Update an existing ceremony.
pub async fn update_ceremony(
    state: &AppState,
    ceremony_id: i64,
    input: CeremonyInput,
) -> Result<Ceremony, AppError> {
    require_manager(state).await?;
    input.validate()?;
    let ceremony = state.api.update_ceremony(ceremony_id, &input).await?;
    state.notifications.success("Ceremony updated.");
    Ok(ceremony)
}

/// Delete a ceremony.
pub async fn delete_ceremony(state: &AppState, ceremony_id: i64) -> Result<(), AppError> {
    require_manager(state).await?;
    state.api.delete_ceremony(ceremony_id).await?;
    state.notifications.success("Ceremony deleted.");
    Ok(())
}
