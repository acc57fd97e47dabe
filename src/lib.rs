//! Graduation client - client core for the university graduation-management
//! system.
//!
//! This library holds everything behind the screens: the backend API
//! client, the session, the approval gating rules and one command handler
//! per screen. The presentation layer renders the view models it returns.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use config::ClientSettings;
pub use error::{AppError, ErrorCategory};
pub use state::AppState;
