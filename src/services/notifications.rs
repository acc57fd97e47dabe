//! Transient, dismissible notifications ("toasts").
//!
//! Every recoverable failure on a screen ends up here instead of
//! propagating; the screen itself stays interactive.

use crate::error::{AppError, ErrorCategory};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    /// Error taxonomy tag, for error notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    pub message: String,
}

/// User-facing message for an error.
pub fn error_message(err: &AppError) -> String {
    match err.category() {
        ErrorCategory::NotFound => not_found_message(err),
        ErrorCategory::Forbidden => "You are not authorized to perform this action.".to_string(),
        ErrorCategory::Unauthenticated => {
            "Your session has expired. Please sign in again.".to_string()
        }
        ErrorCategory::Unknown => format!("Operation failed: {}", err),
    }
}

fn not_found_message(err: &AppError) -> String {
    match err {
        AppError::NotFound { resource, .. } if resource == "ApprovalRecord" => {
            "Approval record not found.".to_string()
        }
        AppError::NotFound { resource, .. } => format!("{} not found.", resource),
        AppError::Api {
            endpoint: Some(endpoint),
            ..
        } if endpoint.starts_with("/approvals/") => "Approval record not found.".to_string(),
        _ => "The requested resource was not found.".to_string(),
    }
}

#[derive(Default)]
struct Inner {
    next_id: AtomicU64,
    active: Mutex<Vec<Notification>>,
}

/// Queue of active notifications. Cloning shares the queue.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &self,
        level: NotificationLevel,
        category: Option<ErrorCategory>,
        message: String,
    ) -> Notification {
        let notification = Notification {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            level,
            category,
            message,
        };
        if let Ok(mut active) = self.inner.active.lock() {
            active.push(notification.clone());
        }
        notification
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationLevel::Success, None, message.into())
    }

    pub fn info(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationLevel::Info, None, message.into())
    }

    /// Report a failure, tagged with its category.
    pub fn error(&self, err: &AppError) -> Notification {
        self.push(
            NotificationLevel::Error,
            Some(err.category()),
            error_message(err),
        )
    }

    /// Remove a notification. Returns whether it was still active.
    pub fn dismiss(&self, id: u64) -> bool {
        match self.inner.active.lock() {
            Ok(mut active) => {
                let before = active.len();
                active.retain(|n| n.id != id);
                active.len() != before
            }
            Err(_) => false,
        }
    }

    /// Snapshot of the active notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.inner
            .active
            .lock()
            .map(|active| active.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut active) = self.inner.active.lock() {
            active.clear();
        }
    }
}
