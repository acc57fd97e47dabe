//! Advisor/student inbox messages.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message in a user's inbox or sent folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub receiver_id: i64,
    #[serde(default)]
    pub receiver_name: Option<String>,
    pub subject: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Body of `POST /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub receiver_id: i64,
    pub subject: String,
    pub content: String,
}

impl NewMessage {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.subject.trim().is_empty() {
            return Err(AppError::invalid_input_field("Subject is required", "subject"));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::invalid_input_field(
                "Message body is required",
                "content",
            ));
        }
        Ok(())
    }
}

/// Inbox listing with an unread counter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbox {
    pub messages: Vec<Message>,
    pub unread: usize,
}

impl Inbox {
    /// Newest first.
    pub fn new(mut messages: Vec<Message>) -> Self {
        messages.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        let unread = messages.iter().filter(|m| !m.read).count();
        Self { messages, unread }
    }
}
