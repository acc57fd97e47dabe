//! Data models for the application.
//!
//! These models mirror the backend's JSON payloads and the view models
//! returned to the presentation layer. All wire types use camelCase.

pub mod actor;
pub mod approval;
pub mod ceremony;
pub mod message;
pub mod student;
pub mod user;

// Re-exports for convenient access
pub use actor::{resolve_gate, resolve_stage, Actor, DashboardKind, StaffRole, UserType};
pub use approval::{
    can_act, ApprovalGate, ApprovalProgress, ApprovalRecord, RowStatus, Stage, StageControls,
    StageDecision,
};
pub use ceremony::{Ceremony, CeremonyInput};
pub use message::{Inbox, Message, NewMessage};
pub use student::{Student, StudentView};
pub use user::UserProfile;
