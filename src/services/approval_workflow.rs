//! Approval list assembly and decision submission.
//!
//! A [`StageScreen`] is always built from a full fetch. Decisions are never
//! applied locally: after a successful submission the whole list is fetched
//! again, and after a failure the screen is left exactly as it was.

use crate::error::AppError;
use crate::models::approval::{ApprovalGate, RowStatus, Stage, StageControls};
use crate::models::student::{Student, StudentView};
use crate::models::user::UserProfile;
use crate::services::api_client::ApiClient;
use crate::services::notifications::{Notification, NotificationCenter};
use futures::future::join_all;
use serde::Serialize;

/// Which students a gate's list covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum StudentScope {
    /// An advisor's advisees.
    Advisees(i64),
    Department(String),
    Faculty(String),
    All,
}

impl StudentScope {
    /// Roster scope for a gate operated by `user`.
    pub fn for_gate(gate: ApprovalGate, user: &UserProfile) -> Result<Self, AppError> {
        match gate {
            ApprovalGate::Chain(Stage::Advisor) => Ok(Self::Advisees(user.id)),
            ApprovalGate::Chain(Stage::DepartmentSecretary) => user
                .department
                .clone()
                .filter(|d| !d.trim().is_empty())
                .map(Self::Department)
                .ok_or_else(|| {
                    AppError::invalid_input_field("No department on your profile", "department")
                }),
            ApprovalGate::Chain(Stage::FacultyDeansOffice) => user
                .faculty
                .clone()
                .filter(|f| !f.trim().is_empty())
                .map(Self::Faculty)
                .ok_or_else(|| {
                    AppError::invalid_input_field("No faculty on your profile", "faculty")
                }),
            ApprovalGate::Chain(Stage::StudentAffairs) | ApprovalGate::Rectorate => Ok(Self::All),
        }
    }

    /// Fetch every student in scope.
    pub async fn fetch_roster(&self, api: &ApiClient) -> Result<Vec<Student>, AppError> {
        match self {
            Self::Advisees(advisor_id) => api.list_advisees(*advisor_id).await,
            Self::Department(department) => api.list_students_by_department(department).await,
            Self::Faculty(faculty) => api.list_students_by_faculty(faculty).await,
            Self::All => api.list_all_students().await,
        }
    }
}

/// Fetch the roster and join each student with their approval record.
///
/// Record lookups run concurrently. A failed lookup does not drop the
/// student: the row gets a record with every flag pending.
pub async fn assemble(api: &ApiClient, scope: &StudentScope) -> Result<Vec<StudentView>, AppError> {
    let roster = scope.fetch_roster(api).await?;

    let ids: Vec<i64> = roster.iter().map(|s| s.id).collect();
    let records = join_all(ids.into_iter().map(|id| api.get_student_approval(id))).await;

    Ok(roster
        .into_iter()
        .zip(records)
        .map(|(student, record)| match record {
            Ok(record) => StudentView::with_record(student, record),
            Err(e) => {
                log::warn!(
                    "[approval] Failed to fetch approval record for student {}: {}",
                    student.id,
                    e
                );
                StudentView::without_record(student)
            }
        })
        .collect())
}

/// One rendered row of a gate's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRow {
    pub view: StudentView,
    pub controls: StageControls,
    pub status_label: String,
}

impl StageRow {
    fn new(gate: ApprovalGate, view: StudentView) -> Self {
        let controls = StageControls::for_gate(&view.approval, gate);
        Self {
            status_label: controls.status_label(),
            view,
            controls,
        }
    }

    pub fn student_id(&self) -> i64 {
        self.view.student.id
    }
}

/// Row counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub blocked: usize,
    pub awaiting: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// The approval list of one gate, as last fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageScreen {
    pub gate: ApprovalGate,
    pub scope: StudentScope,
    pub rows: Vec<StageRow>,
}

impl StageScreen {
    pub fn build(gate: ApprovalGate, scope: StudentScope, views: Vec<StudentView>) -> Self {
        Self {
            gate,
            scope,
            rows: views.into_iter().map(|v| StageRow::new(gate, v)).collect(),
        }
    }

    /// Fetch and build the list for `gate`.
    pub async fn load(
        api: &ApiClient,
        gate: ApprovalGate,
        scope: StudentScope,
    ) -> Result<Self, AppError> {
        let views = assemble(api, &scope).await?;
        Ok(Self::build(gate, scope, views))
    }

    pub fn row(&self, student_id: i64) -> Option<&StageRow> {
        self.rows.iter().find(|r| r.student_id() == student_id)
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            total: self.rows.len(),
            ..StatusCounts::default()
        };
        for row in &self.rows {
            match row.controls.row_status() {
                RowStatus::Blocked => counts.blocked += 1,
                RowStatus::Awaiting => counts.awaiting += 1,
                RowStatus::Approved => counts.approved += 1,
                RowStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

/// Result of a decision attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DecisionOutcome {
    /// Accepted by the backend; the screen holds the refetched list.
    Applied { notification: Notification },
    /// Not sent because the control is disabled for the current record.
    Refused { notification: Notification },
    /// The lookup or submission failed; the screen is unchanged.
    Failed { notification: Notification },
}

impl DecisionOutcome {
    pub fn notification(&self) -> &Notification {
        match self {
            Self::Applied { notification }
            | Self::Refused { notification }
            | Self::Failed { notification } => notification,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Submit one approve/reject decision for `student_id` at the screen's gate.
///
/// 1. Look up the student's current record (missing record fails as not found).
/// 2. Check the controls against that fresh record.
/// 3. Submit to the gate's endpoint.
/// 4. Refetch the full list into `screen`.
///
/// Failures never escape; they are reported through `notifications`.
pub async fn decide(
    api: &ApiClient,
    notifications: &NotificationCenter,
    screen: &mut StageScreen,
    student_id: i64,
    approved: bool,
) -> DecisionOutcome {
    let gate = screen.gate;
    let verb = if approved { "approve" } else { "reject" };

    let record = match api.get_student_approval(student_id).await {
        Ok(record) => record,
        Err(e) => {
            log::warn!("[approval] Lookup for student {} failed: {}", student_id, e);
            return DecisionOutcome::Failed {
                notification: notifications.error(&e),
            };
        }
    };

    let Some(record_id) = record.id else {
        let e = AppError::not_found_with_id("ApprovalRecord", student_id.to_string());
        return DecisionOutcome::Failed {
            notification: notifications.error(&e),
        };
    };

    let controls = StageControls::for_gate(&record, gate);
    if !controls.allows(approved) {
        let e = AppError::forbidden(format!(
            "Cannot {} at {}: {}",
            verb,
            gate.label(),
            controls.status_label()
        ));
        log::info!("[approval] Refused to {} student {}: {}", verb, student_id, e);
        return DecisionOutcome::Refused {
            notification: notifications.error(&e),
        };
    }

    log::info!(
        "[approval] Submitting {} for student {} at {}",
        verb,
        student_id,
        gate.label()
    );
    if let Err(e) = api.submit_decision(record_id, gate, approved).await {
        log::warn!(
            "[approval] Decision for student {} failed ({:?}): {}",
            student_id,
            e.category(),
            e
        );
        return DecisionOutcome::Failed {
            notification: notifications.error(&e),
        };
    }

    match assemble(api, &screen.scope).await {
        Ok(views) => {
            *screen = StageScreen::build(gate, screen.scope.clone(), views);
        }
        Err(e) => {
            // The decision went through; only the refresh failed.
            log::warn!("[approval] Refetch after decision failed: {}", e);
            notifications.error(&e);
        }
    }

    let notification = notifications.success(if approved {
        "Approval recorded."
    } else {
        "Rejection recorded."
    });
    DecisionOutcome::Applied { notification }
}
