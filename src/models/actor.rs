//! Actors and their place in the graduation approval chain.

use crate::models::approval::{ApprovalGate, Stage};
use serde::{Deserialize, Serialize};

/// Coarse account type as sent by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    Student,
    Staff,
    Advisor,
    Admin,
    /// Any tag this client does not know.
    #[serde(other)]
    Unknown,
}

/// Staff sub-role, decoded from the backend's numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StaffRole {
    /// Code 0.
    Rectorate,
    /// Code 1.
    StudentAffairs,
    /// Code 2.
    FacultyDeansOffice,
    /// Code 3.
    DepartmentSecretary,
    /// Missing or unrecognized code.
    Unassigned,
}

impl StaffRole {
    /// Decode a sub-role code.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Rectorate,
            Some(1) => Self::StudentAffairs,
            Some(2) => Self::FacultyDeansOffice,
            Some(3) => Self::DepartmentSecretary,
            _ => Self::Unassigned,
        }
    }
}

/// The party operating the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "role", rename_all = "camelCase")]
pub enum Actor {
    Student,
    Advisor,
    Staff(StaffRole),
    Admin,
    /// Account type not recognized; has no authority anywhere.
    Guest,
}

impl Actor {
    /// Build an actor from the coarse type and optional staff sub-role code.
    pub fn from_codes(user_type: UserType, staff_role: Option<i32>) -> Self {
        match user_type {
            UserType::Student => Self::Student,
            UserType::Advisor => Self::Advisor,
            UserType::Staff => Self::Staff(StaffRole::from_code(staff_role)),
            UserType::Admin => Self::Admin,
            UserType::Unknown => Self::Guest,
        }
    }
}

/// Map an actor to the chain stage it decides, if any.
///
/// Rectorate staff decide on a separate gate outside the chain and resolve
/// to `None` here; see [`resolve_gate`].
pub fn resolve_stage(actor: &Actor) -> Option<Stage> {
    match actor {
        Actor::Advisor => Some(Stage::Advisor),
        Actor::Staff(StaffRole::StudentAffairs) => Some(Stage::StudentAffairs),
        Actor::Staff(StaffRole::FacultyDeansOffice) => Some(Stage::FacultyDeansOffice),
        Actor::Staff(StaffRole::DepartmentSecretary) => Some(Stage::DepartmentSecretary),
        Actor::Staff(StaffRole::Rectorate)
        | Actor::Staff(StaffRole::Unassigned)
        | Actor::Student
        | Actor::Admin
        | Actor::Guest => None,
    }
}

/// Map an actor to the approval gate it operates, including the rectorate.
pub fn resolve_gate(actor: &Actor) -> Option<ApprovalGate> {
    match actor {
        Actor::Staff(StaffRole::Rectorate) => Some(ApprovalGate::Rectorate),
        other => resolve_stage(other).map(ApprovalGate::Chain),
    }
}

/// Landing dashboard per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardKind {
    Student,
    Advisor,
    DepartmentSecretary,
    FacultyDeansOffice,
    StudentAffairs,
    Rectorate,
    Admin,
    /// Signed in, but no dashboard applies.
    NotAccessible,
}

impl DashboardKind {
    pub fn for_actor(actor: &Actor) -> Self {
        match actor {
            Actor::Student => Self::Student,
            Actor::Advisor => Self::Advisor,
            Actor::Staff(StaffRole::DepartmentSecretary) => Self::DepartmentSecretary,
            Actor::Staff(StaffRole::FacultyDeansOffice) => Self::FacultyDeansOffice,
            Actor::Staff(StaffRole::StudentAffairs) => Self::StudentAffairs,
            Actor::Staff(StaffRole::Rectorate) => Self::Rectorate,
            Actor::Admin => Self::Admin,
            Actor::Staff(StaffRole::Unassigned) | Actor::Guest => Self::NotAccessible,
        }
    }
}
