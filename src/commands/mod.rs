//! Screen command handlers.
//!
//! Each handler takes the shared [`AppState`](crate::state::AppState) and
//! returns a serializable view model or an `AppError`. Commands are
//! organized by screen:
//! - `auth`: sign in, sign out, session restore
//! - `approval`: stage-specific approval lists and decisions
//! - `dashboard`: role-specific landing pages
//! - `ceremonies`: ceremony planning
//! - `messages`: advisor/student inbox
//! - `profile`: profile and password change

pub mod approval;
pub mod auth;
pub mod ceremonies;
pub mod dashboard;
pub mod messages;
pub mod profile;

pub use approval::{open_approval_screen, refresh_approval_screen, submit_decision, StageAccess};
pub use auth::{current_user, login, logout, restore_session};
pub use ceremonies::{create_ceremony, delete_ceremony, list_ceremonies, update_ceremony};
pub use dashboard::{load_dashboard, Dashboard};
pub use messages::{get_inbox, get_sent_messages, mark_message_read, send_message};
pub use profile::{change_password, get_profile};
