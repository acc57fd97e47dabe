//! Graduation approval record and the client-side gating rules.
//!
//! The backend owns the record and enforces the transitions. Everything in
//! this module is a pure projection of a fetched snapshot onto what the UI
//! may offer: which stage is unlocked and which controls are enabled.

use serde::{Deserialize, Serialize};

/// One stage of the sequential approval chain, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Advisor,
    DepartmentSecretary,
    FacultyDeansOffice,
    StudentAffairs,
}

impl Stage {
    /// The full chain in order.
    pub const CHAIN: [Stage; 4] = [
        Stage::Advisor,
        Stage::DepartmentSecretary,
        Stage::FacultyDeansOffice,
        Stage::StudentAffairs,
    ];

    /// Zero-based position in the chain.
    pub fn index(self) -> usize {
        match self {
            Stage::Advisor => 0,
            Stage::DepartmentSecretary => 1,
            Stage::FacultyDeansOffice => 2,
            Stage::StudentAffairs => 3,
        }
    }

    /// Stages that must all be approved before this one unlocks.
    pub fn predecessors(self) -> &'static [Stage] {
        &Self::CHAIN[..self.index()]
    }

    /// The stage after this one, if any.
    pub fn next(self) -> Option<Stage> {
        Self::CHAIN.get(self.index() + 1).copied()
    }

    /// Path segment of the stage's decision endpoint.
    pub fn endpoint_segment(self) -> &'static str {
        match self {
            Stage::Advisor => "advisor",
            Stage::DepartmentSecretary => "department-secretary",
            Stage::FacultyDeansOffice => "faculty-deans-office",
            Stage::StudentAffairs => "student-affairs",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Advisor => "Advisor",
            Stage::DepartmentSecretary => "Department Secretary",
            Stage::FacultyDeansOffice => "Faculty Dean's Office",
            Stage::StudentAffairs => "Student Affairs",
        }
    }
}

/// Any gate a decision can be submitted to: a chain stage, or the
/// rectorate, which has no chain dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "stage", rename_all = "camelCase")]
pub enum ApprovalGate {
    Chain(Stage),
    Rectorate,
}

impl ApprovalGate {
    pub fn endpoint_segment(self) -> &'static str {
        match self {
            ApprovalGate::Chain(stage) => stage.endpoint_segment(),
            ApprovalGate::Rectorate => "rectorate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ApprovalGate::Chain(stage) => stage.label(),
            ApprovalGate::Rectorate => "Rectorate",
        }
    }
}

/// Three-state decision flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageDecision {
    /// No decision yet.
    Pending,
    Approved,
    Rejected,
}

impl From<Option<bool>> for StageDecision {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => StageDecision::Pending,
            Some(true) => StageDecision::Approved,
            Some(false) => StageDecision::Rejected,
        }
    }
}

impl StageDecision {
    pub fn label(self) -> &'static str {
        match self {
            StageDecision::Pending => "Pending",
            StageDecision::Approved => "Approved",
            StageDecision::Rejected => "Rejected",
        }
    }
}

/// Per-student graduation approval record, as returned by the backend.
///
/// A record with every flag unset stands in for students whose record
/// could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    /// Backend record ID; absent on placeholder records.
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub student_id: Option<i64>,

    #[serde(default)]
    pub advisor: Option<bool>,

    #[serde(default)]
    pub department_secretary: Option<bool>,

    #[serde(default)]
    pub faculty_deans_office: Option<bool>,

    #[serde(default)]
    pub student_affairs: Option<bool>,

    #[serde(default)]
    pub rectorate: Option<bool>,
}

impl ApprovalRecord {
    /// Placeholder record with every flag pending.
    pub fn pending_for(student_id: i64) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    /// Raw flag of a chain stage.
    pub fn flag(&self, stage: Stage) -> Option<bool> {
        match stage {
            Stage::Advisor => self.advisor,
            Stage::DepartmentSecretary => self.department_secretary,
            Stage::FacultyDeansOffice => self.faculty_deans_office,
            Stage::StudentAffairs => self.student_affairs,
        }
    }

    /// Raw flag of any gate.
    pub fn gate_flag(&self, gate: ApprovalGate) -> Option<bool> {
        match gate {
            ApprovalGate::Chain(stage) => self.flag(stage),
            ApprovalGate::Rectorate => self.rectorate,
        }
    }

    pub fn decision(&self, gate: ApprovalGate) -> StageDecision {
        self.gate_flag(gate).into()
    }
}

/// Whether every stage before `stage` has approved.
pub fn can_act(record: &ApprovalRecord, stage: Stage) -> bool {
    blocking_stage(record, stage).is_none()
}

/// The first earlier stage that has not approved yet.
pub fn blocking_stage(record: &ApprovalRecord, stage: Stage) -> Option<Stage> {
    stage
        .predecessors()
        .iter()
        .copied()
        .find(|prior| record.flag(*prior) != Some(true))
}

/// Enabled/disabled state of the decision controls for one gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageControls {
    pub gate: ApprovalGate,
    pub unlocked: bool,
    pub decision: StageDecision,
    pub approve_enabled: bool,
    pub reject_enabled: bool,
    /// Earlier stage holding this one back, when locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_for: Option<Stage>,
}

impl StageControls {
    /// Controls for a chain stage.
    pub fn for_stage(record: &ApprovalRecord, stage: Stage) -> Self {
        let waiting_for = blocking_stage(record, stage);
        Self::from_parts(
            ApprovalGate::Chain(stage),
            waiting_for.is_none(),
            record.flag(stage),
            waiting_for,
        )
    }

    /// Controls for any gate. The rectorate gate is always unlocked.
    pub fn for_gate(record: &ApprovalRecord, gate: ApprovalGate) -> Self {
        match gate {
            ApprovalGate::Chain(stage) => Self::for_stage(record, stage),
            ApprovalGate::Rectorate => Self::from_parts(gate, true, record.rectorate, None),
        }
    }

    fn from_parts(
        gate: ApprovalGate,
        unlocked: bool,
        flag: Option<bool>,
        waiting_for: Option<Stage>,
    ) -> Self {
        Self {
            gate,
            unlocked,
            decision: flag.into(),
            approve_enabled: unlocked && flag != Some(true),
            reject_enabled: unlocked && flag != Some(false),
            waiting_for,
        }
    }

    /// Whether the control for `approved` is enabled.
    pub fn allows(&self, approved: bool) -> bool {
        if approved {
            self.approve_enabled
        } else {
            self.reject_enabled
        }
    }

    /// Status text for the row.
    pub fn status_label(&self) -> String {
        match self.waiting_for {
            Some(prior) => format!("Waiting for {}", prior.label()),
            None => self.decision.label().to_string(),
        }
    }

    pub fn row_status(&self) -> RowStatus {
        if !self.unlocked {
            return RowStatus::Blocked;
        }
        match self.decision {
            StageDecision::Pending => RowStatus::Awaiting,
            StageDecision::Approved => RowStatus::Approved,
            StageDecision::Rejected => RowStatus::Rejected,
        }
    }
}

/// Row classification used by the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RowStatus {
    /// An earlier stage has not approved.
    Blocked,
    /// Unlocked and waiting for this gate's decision.
    Awaiting,
    Approved,
    Rejected,
}

/// One step of a student's own approval timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStep {
    pub gate: ApprovalGate,
    pub decision: StageDecision,
    pub unlocked: bool,
}

/// A student's view of their approval pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalProgress {
    pub steps: Vec<ProgressStep>,
    /// The gate whose decision is outstanding, if any.
    pub current: Option<ApprovalGate>,
    pub completed: bool,
}

impl ApprovalProgress {
    pub fn from_record(record: &ApprovalRecord) -> Self {
        let mut steps: Vec<ProgressStep> = Stage::CHAIN
            .iter()
            .map(|stage| ProgressStep {
                gate: ApprovalGate::Chain(*stage),
                decision: record.decision(ApprovalGate::Chain(*stage)),
                unlocked: can_act(record, *stage),
            })
            .collect();
        steps.push(ProgressStep {
            gate: ApprovalGate::Rectorate,
            decision: record.decision(ApprovalGate::Rectorate),
            unlocked: true,
        });

        let current = steps
            .iter()
            .find(|step| step.decision != StageDecision::Approved)
            .map(|step| step.gate);

        Self {
            steps,
            current,
            completed: current.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAGS: [Option<bool>; 3] = [None, Some(true), Some(false)];

    /// Every combination of the four chain flags.
    fn all_records() -> Vec<ApprovalRecord> {
        let mut records = Vec::new();
        for a in FLAGS {
            for d in FLAGS {
                for f in FLAGS {
                    for s in FLAGS {
                        records.push(ApprovalRecord {
                            id: Some(1),
                            student_id: Some(1),
                            advisor: a,
                            department_secretary: d,
                            faculty_deans_office: f,
                            student_affairs: s,
                            rectorate: None,
                        });
                    }
                }
            }
        }
        records
    }

    #[test]
    fn test_can_act_follows_chain_order() {
        for r in all_records() {
            assert!(can_act(&r, Stage::Advisor));
            assert_eq!(
                can_act(&r, Stage::DepartmentSecretary),
                r.advisor == Some(true)
            );
            assert_eq!(
                can_act(&r, Stage::FacultyDeansOffice),
                r.advisor == Some(true) && r.department_secretary == Some(true)
            );
            assert_eq!(
                can_act(&r, Stage::StudentAffairs),
                r.advisor == Some(true)
                    && r.department_secretary == Some(true)
                    && r.faculty_deans_office == Some(true)
            );
        }
    }

    #[test]
    fn test_controls_match_own_flag() {
        for r in all_records() {
            for stage in Stage::CHAIN {
                let controls = StageControls::for_stage(&r, stage);
                if !can_act(&r, stage) {
                    assert!(!controls.approve_enabled && !controls.reject_enabled);
                    continue;
                }
                match r.flag(stage) {
                    Some(true) => {
                        assert!(!controls.approve_enabled);
                        assert!(controls.reject_enabled);
                    }
                    Some(false) => {
                        assert!(controls.approve_enabled);
                        assert!(!controls.reject_enabled);
                    }
                    None => {
                        assert!(controls.approve_enabled);
                        assert!(controls.reject_enabled);
                    }
                }
            }
        }
    }

    #[test]
    fn test_blocked_label_names_first_missing_stage() {
        let record = ApprovalRecord {
            advisor: Some(true),
            department_secretary: Some(false),
            ..ApprovalRecord::default()
        };
        let controls = StageControls::for_stage(&record, Stage::StudentAffairs);
        assert_eq!(controls.waiting_for, Some(Stage::DepartmentSecretary));
        assert_eq!(controls.status_label(), "Waiting for Department Secretary");
        assert_eq!(controls.row_status(), RowStatus::Blocked);
    }

    #[test]
    fn test_rectorate_gate_ignores_chain() {
        let mut record = ApprovalRecord::pending_for(4);
        let controls = StageControls::for_gate(&record, ApprovalGate::Rectorate);
        assert!(controls.unlocked);
        assert!(controls.approve_enabled && controls.reject_enabled);

        record.rectorate = Some(true);
        let controls = StageControls::for_gate(&record, ApprovalGate::Rectorate);
        assert!(!controls.approve_enabled);
        assert!(controls.reject_enabled);
    }

    #[test]
    fn test_downstream_flags_are_reported_as_is() {
        // Advisor revoked after later stages approved: nothing is reset.
        let record = ApprovalRecord {
            advisor: Some(false),
            department_secretary: Some(true),
            faculty_deans_office: Some(true),
            ..ApprovalRecord::default()
        };
        let controls = StageControls::for_stage(&record, Stage::DepartmentSecretary);
        assert!(!controls.unlocked);
        assert_eq!(controls.decision, StageDecision::Approved);
    }

    #[test]
    fn test_progress_current_step() {
        let record = ApprovalRecord {
            advisor: Some(true),
            ..ApprovalRecord::default()
        };
        let progress = ApprovalProgress::from_record(&record);
        assert_eq!(progress.steps.len(), 5);
        assert_eq!(
            progress.current,
            Some(ApprovalGate::Chain(Stage::DepartmentSecretary))
        );
        assert!(!progress.completed);

        let done = ApprovalRecord {
            advisor: Some(true),
            department_secretary: Some(true),
            faculty_deans_office: Some(true),
            student_affairs: Some(true),
            rectorate: Some(true),
            ..ApprovalRecord::default()
        };
        assert!(ApprovalProgress::from_record(&done).completed);
    }

    #[test]
    fn test_record_deserializes_nulls_and_missing() {
        let json = r#"{"id": 9, "studentId": 3, "advisor": true, "departmentSecretary": null}"#;
        let record: ApprovalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(9));
        assert_eq!(record.advisor, Some(true));
        assert_eq!(record.department_secretary, None);
        assert_eq!(record.student_affairs, None);
    }

    #[test]
    fn test_stage_navigation() {
        assert_eq!(Stage::Advisor.next(), Some(Stage::DepartmentSecretary));
        assert_eq!(Stage::StudentAffairs.next(), None);
        assert!(Stage::Advisor.predecessors().is_empty());
        assert_eq!(Stage::StudentAffairs.predecessors().len(), 3);
    }
}
