//! Project risks and cross-project resource warnings.
//!
//! # Invariants
//! - Severity-like labels expose a numeric rank so tables can order them
//!   without string comparison; `Unrecognized` always ranks lowest.

use serde::{Deserialize, Serialize};

use super::{check_id, ModelValidationError};
use crate::model::member::MemberId;
use crate::model::project::ProjectId;

/// Stable identifier of a risk.
pub type RiskId = String;

/// Stable identifier of a resource warning.
pub type WarningId = String;

labeled_enum! {
    /// Area a risk belongs to.
    pub enum RiskCategory {
        Resource => "resource",
        Skill => "skill",
        Schedule => "schedule",
        Compliance => "compliance",
        Budget => "budget",
    }
}

labeled_enum! {
    /// Consequence of a risk materializing.
    pub enum Impact {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

impl Impact {
    pub fn rank(&self) -> i8 {
        match self {
            Self::Critical => 3,
            Self::High => 2,
            Self::Medium => 1,
            Self::Low => 0,
            Self::Unrecognized(_) => -1,
        }
    }
}

labeled_enum! {
    /// Likelihood of a risk materializing.
    pub enum Probability {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

impl Probability {
    pub fn rank(&self) -> i8 {
        match self {
            Self::High => 2,
            Self::Medium => 1,
            Self::Low => 0,
            Self::Unrecognized(_) => -1,
        }
    }
}

labeled_enum! {
    /// Handling state of a risk.
    pub enum RiskStatus {
        Identified => "identified",
        Mitigated => "mitigated",
        Resolved => "resolved",
        Escalated => "escalated",
    }
}

impl RiskStatus {
    /// Attention rank: escalated risks need the most attention.
    pub fn rank(&self) -> i8 {
        match self {
            Self::Escalated => 3,
            Self::Identified => 2,
            Self::Mitigated => 1,
            Self::Resolved => 0,
            Self::Unrecognized(_) => -1,
        }
    }
}

/// A tracked risk on one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: RiskId,
    pub project_id: ProjectId,
    pub category: RiskCategory,
    #[serde(default)]
    pub description: String,
    pub impact: Impact,
    pub probability: Probability,
    pub status: RiskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

impl Risk {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("risk", &self.id)
    }

    /// Mitigation text, or the placeholder shown when none is planned.
    pub fn mitigation_or_placeholder(&self) -> &str {
        self.mitigation
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("No mitigation plan defined")
    }
}

labeled_enum! {
    /// Kind of staffing problem a warning reports.
    pub enum WarningType {
        Shortage => "shortage",
        SkillGap => "skill-gap",
        Overallocation => "overallocation",
        Compliance => "compliance",
    }
}

labeled_enum! {
    /// Urgency of a resource warning.
    pub enum Severity {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

impl Severity {
    /// Lower rank sorts first; `critical` leads the alerts panel.
    pub fn urgency_rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Unrecognized(_) => 4,
        }
    }

    /// `high` and `critical` warnings are counted on the summary cards.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// A staffing warning spanning one or more projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceWarning {
    pub id: WarningId,
    #[serde(rename = "type")]
    pub kind: WarningType,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub affected_projects: Vec<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_members: Option<Vec<MemberId>>,
    #[serde(default)]
    pub recommendation: String,
}

impl ResourceWarning {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("resource warning", &self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Impact, ResourceWarning, Risk, Severity, WarningType};

    #[test]
    fn warning_type_uses_type_key_and_kebab_labels() {
        let warning: ResourceWarning = serde_json::from_value(serde_json::json!({
            "id": "w2",
            "type": "skill-gap",
            "description": "Insufficient HIPAA expertise",
            "severity": "high",
            "affectedProjects": ["p3"],
            "recommendation": "Provide training"
        }))
        .unwrap();

        assert_eq!(warning.kind, WarningType::SkillGap);
        assert_eq!(warning.affected_members, None);
        assert!(warning.severity.is_urgent());
    }

    #[test]
    fn unknown_impact_ranks_below_low() {
        assert!(Impact::from_label("severe").rank() < Impact::Low.rank());
        assert!(Severity::from_label("sev-1").urgency_rank() > Severity::Low.urgency_rank());
    }

    #[test]
    fn blank_mitigation_uses_placeholder() {
        let risk: Risk = serde_json::from_value(serde_json::json!({
            "id": "r9",
            "projectId": "p1",
            "category": "budget",
            "description": "Vendor rates may rise",
            "impact": "medium",
            "probability": "low",
            "status": "identified",
            "mitigation": "  "
        }))
        .unwrap();

        assert_eq!(risk.mitigation_or_placeholder(), "No mitigation plan defined");
    }
}
