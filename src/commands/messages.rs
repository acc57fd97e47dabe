//! Advisor/student messaging commands.

use crate::error::AppError;
use crate::models::actor::Actor;
use crate::models::message::{Inbox, Message, NewMessage};
use crate::state::AppState;

/// Fetch the signed-in user's inbox.
pub async fn get_inbox(state: &AppState) -> Result<Inbox, AppError> {
    state.session.require_user().await?;
    Ok(Inbox::new(state.api.inbox().await?))
}

/// Fetch messages the signed-in user sent, newest first.
pub async fn get_sent_messages(state: &AppState) -> Result<Vec<Message>, AppError> {
    state.session.require_user().await?;
    let mut messages = state.api.sent_messages().await?;
    messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    Ok(messages)
}

/// Send a message.
///
/// Advisors may write to their advisees; students may write to their own
/// advisor. Nobody else can send.
pub async fn send_message(state: &AppState, message: NewMessage) -> Result<Message, AppError> {
    let user = state.session.require_user().await?;
    message.validate()?;

    let allowed = match user.actor() {
        Actor::Advisor => state
            .api
            .list_advisees(user.id)
            .await?
            .iter()
            .any(|s| s.user_id == Some(message.receiver_id)),
        Actor::Student => user.advisor_id == Some(message.receiver_id),
        Actor::Staff(_) | Actor::Admin | Actor::Guest => false,
    };
    if !allowed {
        return Err(AppError::forbidden("You cannot message this recipient"));
    }

    let sent = state.api.send_message(&message).await?;
    state.notifications.success("Message sent.");
    Ok(sent)
}

/// Mark a message as read.
pub async fn mark_message_read(state: &AppState, message_id: i64) -> Result<(), AppError> {
    state.session.require_user().await?;
    state.api.mark_message_read(message_id).await
}
