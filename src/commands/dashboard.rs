//! Role-specific dashboard summaries.

use crate::error::{AppError, ErrorCategory};
use crate::models::actor::{resolve_gate, DashboardKind};
use crate::models::approval::{ApprovalGate, ApprovalProgress, ApprovalRecord};
use crate::models::user::UserProfile;
use crate::services::approval_workflow::{StageScreen, StatusCounts, StudentScope};
use crate::state::AppState;
use serde::Serialize;

/// Dashboard contents for the signed-in user.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Dashboard {
    /// A student's own graduation progress.
    #[serde(rename_all = "camelCase")]
    Student {
        profile: UserProfile,
        progress: ApprovalProgress,
        /// False when no approval record exists yet.
        record_found: bool,
    },
    /// An approver's workload at their gate.
    #[serde(rename_all = "camelCase")]
    Approver {
        profile: UserProfile,
        dashboard: DashboardKind,
        gate: ApprovalGate,
        counts: StatusCounts,
    },
    /// Users without an approval role.
    #[serde(rename_all = "camelCase")]
    Profile {
        profile: UserProfile,
        dashboard: DashboardKind,
    },
}

/// Build the dashboard for the signed-in user.
pub async fn load_dashboard(state: &AppState) -> Result<Dashboard, AppError> {
    let profile = state.session.require_user().await?;
    let actor = profile.actor();
    let dashboard = DashboardKind::for_actor(&actor);

    if dashboard == DashboardKind::Student {
        return student_dashboard(state, profile).await;
    }

    match resolve_gate(&actor) {
        Some(gate) => {
            let scope = StudentScope::for_gate(gate, &profile)?;
            let screen = StageScreen::load(&state.api, gate, scope).await?;
            Ok(Dashboard::Approver {
                profile,
                dashboard,
                gate,
                counts: screen.counts(),
            })
        }
        None => Ok(Dashboard::Profile { profile, dashboard }),
    }
}

async fn student_dashboard(state: &AppState, profile: UserProfile) -> Result<Dashboard, AppError> {
    let student_id = profile
        .student_id
        .ok_or_else(|| AppError::invalid_input_field("No student record on your profile", "studentId"))?;

    let (record, record_found) = match state.api.get_student_approval(student_id).await {
        Ok(record) => (record, true),
        Err(e) if e.category() == ErrorCategory::NotFound => {
            (ApprovalRecord::pending_for(student_id), false)
        }
        Err(e) => return Err(e),
    };

    Ok(Dashboard::Student {
        profile,
        progress: ApprovalProgress::from_record(&record),
        record_found,
    })
}
