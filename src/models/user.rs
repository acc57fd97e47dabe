//! Authenticated user model.

use crate::models::actor::{Actor, UserType};
use serde::{Deserialize, Serialize};

/// The signed-in user as returned by `/users/me` and `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,

    /// Coarse account type.
    pub user_type: UserType,

    /// Staff sub-role code (only meaningful for staff accounts).
    #[serde(default)]
    pub staff_role: Option<i32>,

    #[serde(default)]
    pub department: Option<String>,

    #[serde(default)]
    pub faculty: Option<String>,

    /// Student number, for student accounts.
    #[serde(default)]
    pub student_number: Option<String>,

    /// Student record ID, for student accounts.
    #[serde(default)]
    pub student_id: Option<i64>,

    /// Assigned advisor's user ID, for student accounts.
    #[serde(default)]
    pub advisor_id: Option<i64>,
}

impl UserProfile {
    /// The actor this user acts as in the approval chain.
    pub fn actor(&self) -> Actor {
        Actor::from_codes(self.user_type, self.staff_role)
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}
