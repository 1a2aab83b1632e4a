//! Weekly status reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{check_id, ModelValidationError};

/// Stable identifier of a weekly update.
pub type UpdateId = String;

/// Narrative status report for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyUpdate {
    pub id: UpdateId,
    /// Human label such as `Week of April 10, 2025`.
    pub week: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub date: NaiveDate,
}

impl WeeklyUpdate {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("weekly update", &self.id)
    }
}
