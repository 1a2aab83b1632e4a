//! Expense lines booked against project budgets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{check_amount, check_id, ModelValidationError};
use crate::model::project::ProjectId;

/// Stable identifier of an expense line.
pub type ExpenseId = String;

labeled_enum! {
    /// Spend bucket of an expense line.
    pub enum ExpenseCategory {
        Labor => "labor",
        Hardware => "hardware",
        Software => "software",
        Vendor => "vendor",
        Other => "other",
    }
}

/// One budgeted-versus-actual expense line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub id: ExpenseId,
    pub project_id: ProjectId,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
    pub budgeted_amount: f64,
    pub actual_amount: f64,
    pub date: NaiveDate,
}

impl ExpenseItem {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_id("expense", &self.id)?;
        check_amount("expense", &self.id, "budgetedAmount", self.budgeted_amount)?;
        check_amount("expense", &self.id, "actualAmount", self.actual_amount)
    }

    /// Budgeted minus actual; positive means under budget.
    pub fn variance(&self) -> f64 {
        self.budgeted_amount - self.actual_amount
    }

    /// Variance relative to the budgeted amount, `0` when nothing was budgeted.
    pub fn variance_percent(&self) -> f64 {
        crate::service::metrics::percent_of(self.variance(), self.budgeted_amount)
    }
}
