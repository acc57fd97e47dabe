//! Student roster entries and their joined approval records.

use crate::models::approval::ApprovalRecord;
use serde::{Deserialize, Serialize};

/// A student as listed by the roster endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    /// Account ID of the student, used as a message recipient.
    #[serde(default)]
    pub user_id: Option<i64>,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    pub student_number: String,
}

/// A student joined with their approval record for list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    pub student: Student,
    pub approval: ApprovalRecord,
    /// False when the lookup failed and `approval` is a pending placeholder.
    pub record_loaded: bool,
}

impl StudentView {
    pub fn with_record(student: Student, approval: ApprovalRecord) -> Self {
        Self {
            student,
            approval,
            record_loaded: true,
        }
    }

    /// View with every flag pending, used when the lookup fails.
    pub fn without_record(student: Student) -> Self {
        let approval = ApprovalRecord::pending_for(student.id);
        Self {
            student,
            approval,
            record_loaded: false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.student.name, self.student.surname)
    }
}
