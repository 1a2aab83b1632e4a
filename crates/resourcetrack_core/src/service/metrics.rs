//! Pure derived-metric functions over entity slices.
//!
//! # Responsibility
//! - Compute utilization, progress, budget, expense-rollup and schedule
//!   figures.
//! - Stay free of store access so every figure has one test surface.
//!
//! # Invariants
//! - No percentage is ever NaN or infinite; an empty or zero denominator
//!   yields `0`.
//! - Utilization is never capped; values above 100 mean overallocation.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::model::budget::{ExpenseCategory, ExpenseItem};
use crate::model::member::Assignment;
use crate::model::project::{Milestone, Project, ProjectStatus};

/// `part / whole * 100`, or `0` when the ratio is undefined.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let percent = part / whole * 100.0;
    if percent.is_finite() {
        percent
    } else {
        0.0
    }
}

/// Sum of allocations over the given assignments.
pub fn sum_allocations<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> f64 {
    assignments
        .into_iter()
        .map(|assignment| assignment.allocation)
        .sum()
}

/// Utilization of `member_id`: the sum of its allocations across `assignments`.
pub fn member_utilization(assignments: &[Assignment], member_id: &str) -> f64 {
    sum_allocations(
        assignments
            .iter()
            .filter(|assignment| assignment.member_id == member_id),
    )
}

/// Share of completed milestones, `0` when there are none.
pub fn completion_percent<'a>(milestones: impl IntoIterator<Item = &'a Milestone>) -> f64 {
    let (completed, total) = milestones
        .into_iter()
        .fold((0usize, 0usize), |(completed, total), milestone| {
            (completed + usize::from(milestone.is_completed()), total + 1)
        });
    percent_of(completed as f64, total as f64)
}

/// Allocated percent-points over the team's theoretical capacity.
pub fn team_utilization(member_count: usize, assignments: &[Assignment]) -> f64 {
    let capacity = member_count as f64 * 100.0;
    percent_of(sum_allocations(assignments), capacity)
}

/// Budget versus actual cost for one project or an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetFigures {
    pub budget: f64,
    pub actual_cost: f64,
}

impl BudgetFigures {
    pub fn for_project(project: &Project) -> Self {
        Self {
            budget: project.budget,
            actual_cost: project.actual_cost,
        }
    }

    /// Sums budgets and actual costs across `projects`.
    pub fn aggregate<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        projects
            .into_iter()
            .fold(Self::default(), |total, project| Self {
                budget: total.budget + project.budget,
                actual_cost: total.actual_cost + project.actual_cost,
            })
    }

    /// Budget minus actual cost; positive means under budget.
    pub fn variance(&self) -> f64 {
        self.budget - self.actual_cost
    }

    pub fn variance_percent(&self) -> f64 {
        percent_of(self.variance(), self.budget)
    }

    pub fn utilization_percent(&self) -> f64 {
        percent_of(self.actual_cost, self.budget)
    }

    /// Budget still available, floored at zero.
    pub fn remaining(&self) -> f64 {
        self.variance().max(0.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.variance() < 0.0
    }

    /// `true` when no budget is set, so the percentages are reported as 0.
    pub fn is_budget_undefined(&self) -> bool {
        self.budget == 0.0
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekdays counted from `start` up to, but excluding, `end`.
///
/// Negative when `end` precedes `start`; then the days after `end` up to and
/// including `start` are counted.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let calendar_days = (end - start).num_days();
    let step = calendar_days.signum();
    let weeks = calendar_days / 7;

    let mut days = weeks * 5;
    let mut cursor = start + Duration::weeks(weeks);
    while cursor != end {
        if !is_weekend(cursor) {
            days += step;
        }
        cursor += Duration::days(step);
    }
    days
}

/// Planned versus elapsed working days of one project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectTimelineMetrics {
    /// Business days between the project's start and end dates.
    pub planned_days: i64,
    /// Business days from the start to the reference date; completed
    /// projects only.
    pub actual_days: Option<i64>,
    /// `planned / actual * 100`; absent unless completed with elapsed days.
    pub efficiency_percent: Option<f64>,
}

/// Schedule figures for `project`, measuring elapsed time up to `as_of`.
pub fn project_timeline_metrics(project: &Project, as_of: NaiveDate) -> ProjectTimelineMetrics {
    let planned_days = business_days_between(project.start_date, project.end_date);
    if project.status != ProjectStatus::Completed {
        return ProjectTimelineMetrics {
            planned_days,
            actual_days: None,
            efficiency_percent: None,
        };
    }

    let actual_days = business_days_between(project.start_date, as_of);
    ProjectTimelineMetrics {
        planned_days,
        actual_days: Some(actual_days),
        efficiency_percent: (actual_days > 0)
            .then(|| percent_of(planned_days as f64, actual_days as f64)),
    }
}

/// One category's slice of total actual spend.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub share_percent: f64,
}

/// Groups expenses by category, summing actual amounts.
///
/// Categories are ordered by amount, largest first; equal amounts keep the
/// order in which their category first appeared.
pub fn category_rollup<'a>(expenses: impl IntoIterator<Item = &'a ExpenseItem>) -> Vec<CategoryShare> {
    let mut totals: Vec<(ExpenseCategory, f64)> = Vec::new();
    for expense in expenses {
        match totals
            .iter_mut()
            .find(|(category, _)| *category == expense.category)
        {
            Some((_, amount)) => *amount += expense.actual_amount,
            None => totals.push((expense.category.clone(), expense.actual_amount)),
        }
    }

    let grand_total: f64 = totals.iter().map(|(_, amount)| amount).sum();
    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            share_percent: percent_of(amount, grand_total),
        })
        .collect();
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}
