//! Projects and their milestones.
//!
//! # Invariants
//! - `Project::start_date <= Project::end_date`.
//! - `budget` and `actual_cost` are finite, non-negative amounts.
//! - Milestone dependencies are expected to reference milestones of the same
//!   project; unresolved references are dropped at display time.
//! - `is_critical_path` is supplied by the dataset and never recomputed here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{check_amount, check_id, check_window, ModelValidationError};

/// Stable identifier of a project.
pub type ProjectId = String;

/// Stable identifier of a milestone.
pub type MilestoneId = String;

labeled_enum! {
    /// Delivery state of a project.
    pub enum ProjectStatus {
        Planning => "planning",
        InProgress => "in-progress",
        OnHold => "on-hold",
        Completed => "completed",
    }
}

impl ProjectStatus {
    /// Ordering used by the project status board: active work first.
    pub fn board_rank(&self) -> u8 {
        match self {
            Self::InProgress => 0,
            Self::Planning => 1,
            Self::OnHold => 2,
            Self::Completed => 3,
            Self::Unrecognized(_) => 4,
        }
    }
}

labeled_enum! {
    /// Business priority of a project.
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

impl Priority {
    /// Lower rank sorts first; `critical` is most urgent.
    pub fn urgency_rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Unrecognized(_) => 4,
        }
    }
}

/// A project with its schedule window and budget figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub budget: f64,
    pub actual_cost: f64,
}

impl Project {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("project", &self.id)?;
        check_window("project", &self.id, self.start_date, self.end_date)?;
        check_amount("project", &self.id, "budget", self.budget)?;
        check_amount("project", &self.id, "actualCost", self.actual_cost)
    }
}

labeled_enum! {
    /// Lifecycle state of a milestone.
    pub enum MilestoneStatus {
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
        Delayed => "delayed",
    }
}

/// A dated checkpoint inside one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
    pub status: MilestoneStatus,
    /// Ids of milestones that must finish first.
    #[serde(default)]
    pub dependencies: Vec<MilestoneId>,
    #[serde(default)]
    pub is_critical_path: bool,
}

impl Milestone {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("milestone", &self.id)
    }

    pub fn is_completed(&self) -> bool {
        self.status == MilestoneStatus::Completed
    }
}
