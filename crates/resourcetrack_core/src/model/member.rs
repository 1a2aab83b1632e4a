//! Team members and their project assignments.
//!
//! # Invariants
//! - `availability` and `allocation` are percentages within `0..=100`.
//! - A member may hold several assignments whose allocations sum above 100;
//!   that is reported as overallocation, never rejected.
//! - `Assignment::end_date` is not earlier than `start_date`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{check_id, check_percent, check_window, ModelValidationError};
use crate::model::project::ProjectId;

/// Stable identifier of a team member.
pub type MemberId = String;

/// Stable identifier of an assignment row.
pub type AssignmentId = String;

/// A person whose time is allocated across projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    /// Ordered as supplied; views show the first few and a `+N` overflow.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Percent of time not committed to any assignment.
    pub availability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TeamMember {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("team member", &self.id)?;
        check_percent("team member", &self.id, "availability", self.availability)
    }
}

/// Join row committing part of a member's time to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub member_id: MemberId,
    pub project_id: ProjectId,
    /// Percent of the member's time committed to this project.
    pub allocation: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Assignment {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("assignment", &self.id)?;
        check_percent("assignment", &self.id, "allocation", self.allocation)?;
        check_window("assignment", &self.id, self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::{Assignment, TeamMember};
    use crate::model::ModelValidationError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn member_deserializes_from_camel_case_shape() {
        let member: TeamMember = serde_json::from_value(serde_json::json!({
            "id": "tm9",
            "name": "Ana Ruiz",
            "role": "Analyst",
            "skills": ["Revenue Cycle"],
            "certifications": [],
            "availability": 45,
            "imageUrl": "https://example.invalid/ana.png"
        }))
        .unwrap();

        assert_eq!(member.image_url.as_deref(), Some("https://example.invalid/ana.png"));
        assert_eq!(member.skills, vec!["Revenue Cycle"]);
        assert!(member.validate().is_ok());
    }

    #[test]
    fn allocation_above_hundred_is_rejected() {
        let assignment = Assignment {
            id: "a1".to_string(),
            member_id: "tm1".to_string(),
            project_id: "p1".to_string(),
            allocation: 120.0,
            start_date: date(2025, 1, 1),
            end_date: date(2025, 2, 1),
        };

        let err = assignment.validate().unwrap_err();
        assert!(matches!(
            err,
            ModelValidationError::PercentOutOfRange { field: "allocation", .. }
        ));
    }

    #[test]
    fn reversed_assignment_window_is_rejected() {
        let assignment = Assignment {
            id: "a2".to_string(),
            member_id: "tm1".to_string(),
            project_id: "p1".to_string(),
            allocation: 20.0,
            start_date: date(2025, 3, 1),
            end_date: date(2025, 2, 1),
        };

        assert!(assignment
            .validate()
            .unwrap_err()
            .to_string()
            .contains("must be >= start date"));
    }
}
