//! Dashboard use-case service.
//!
//! # Responsibility
//! - Assemble the rows each dashboard section renders from the store.
//! - Combine search and sort for the personnel, expense and risk tables.
//!
//! # Invariants
//! - Views are computed from the store on every call and never cached here.
//! - Unresolved foreign keys render with the store's fallback names.

use chrono::NaiveDate;

use crate::model::budget::ExpenseItem;
use crate::model::member::{Assignment, TeamMember};
use crate::model::project::{Project, ProjectStatus};
use crate::model::report::WeeklyUpdate;
use crate::model::risk::{ResourceWarning, Risk};
use crate::repo::store::DomainStore;
use crate::search::fields::{
    ExpenseSearchField, ExpenseSortField, MemberSearchField, MemberSortField, RiskSearchField,
    RiskSortField,
};
use crate::search::filter::{filter_items, ProjectFilter};
use crate::search::sort::TableState;
use crate::service::metrics::{self, BudgetFigures, CategoryShare, ProjectTimelineMetrics};

/// Number of assignments shown next to a member on the utilization card.
pub const TOP_ASSIGNMENTS: usize = 2;

/// Headline figures of the overview section.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub active_projects: usize,
    pub total_projects: usize,
    /// Allocated share of total team capacity, in percent.
    pub team_utilization: f64,
    /// Warnings of high or critical severity.
    pub urgent_warnings: usize,
    pub total_warnings: usize,
    pub budget: BudgetFigures,
}

/// One card of the project status board.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard<'a> {
    pub project: &'a Project,
    pub progress: f64,
}

/// A resource warning with its affected projects resolved to names.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert<'a> {
    pub warning: &'a ResourceWarning,
    pub project_names: Vec<&'a str>,
}

/// An assignment labelled with its project's name.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentLine<'a> {
    pub assignment: &'a Assignment,
    pub project_name: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationRow<'a> {
    pub member: &'a TeamMember,
    pub utilization: f64,
    /// Largest allocations first, at most [`TOP_ASSIGNMENTS`].
    pub top_assignments: Vec<AssignmentLine<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectBudget<'a> {
    pub project: &'a Project,
    pub figures: BudgetFigures,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview<'a> {
    pub totals: BudgetFigures,
    pub categories: Vec<CategoryShare>,
    pub projects: Vec<ProjectBudget<'a>>,
}

/// A project on a member's page with its progress and schedule figures.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberProjectRow<'a> {
    pub project: &'a Project,
    pub progress: f64,
    pub timeline: ProjectTimelineMetrics,
}

/// Delivery record of one member across the projects they are assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemberPerformance {
    pub total_projects: usize,
    pub completed_projects: usize,
    /// Completed projects that ended by the member's assignment end, in percent.
    pub on_time_percent: f64,
    /// Mean milestone completion over the member's projects, in percent.
    pub average_completion: f64,
}

/// Read-only view service over a loaded store.
pub struct DashboardService<'s> {
    store: &'s DomainStore,
}

impl<'s> DashboardService<'s> {
    pub fn new(store: &'s DomainStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'s DomainStore {
        self.store
    }

    pub fn summary(&self) -> DashboardSummary {
        let projects = self.store.projects();
        let warnings = self.store.resource_warnings();
        DashboardSummary {
            active_projects: projects
                .iter()
                .filter(|project| project.status == ProjectStatus::InProgress)
                .count(),
            total_projects: projects.len(),
            team_utilization: metrics::team_utilization(
                self.store.members().len(),
                self.store.assignments(),
            ),
            urgent_warnings: warnings
                .iter()
                .filter(|warning| warning.severity.is_urgent())
                .count(),
            total_warnings: warnings.len(),
            budget: BudgetFigures::aggregate(projects),
        }
    }

    /// Projects ordered for the status board: active work first, then by
    /// priority within each status.
    pub fn project_board(&self) -> Vec<ProjectCard<'s>> {
        let mut projects: Vec<&Project> = self.store.projects().iter().collect();
        projects.sort_by_key(|project| (project.status.board_rank(), project.priority.urgency_rank()));
        projects
            .into_iter()
            .map(|project| ProjectCard {
                project,
                progress: self.store.project_progress(&project.id),
            })
            .collect()
    }

    /// Resource warnings, most severe first.
    pub fn alerts(&self) -> Vec<Alert<'s>> {
        let store = self.store;
        let mut warnings: Vec<&ResourceWarning> = store.resource_warnings().iter().collect();
        warnings.sort_by_key(|warning| warning.severity.urgency_rank());
        warnings
            .into_iter()
            .map(|warning| Alert {
                warning,
                project_names: warning
                    .affected_projects
                    .iter()
                    .map(|id| store.project_name(id))
                    .collect(),
            })
            .collect()
    }

    /// Members ordered by utilization, highest first.
    pub fn team_utilization_rows(&self) -> Vec<UtilizationRow<'s>> {
        let store = self.store;
        let mut rows: Vec<UtilizationRow<'s>> = store
            .members()
            .iter()
            .map(|member| {
                let mut assignments = store.member_assignments(&member.id);
                assignments.sort_by(|a, b| b.allocation.total_cmp(&a.allocation));
                UtilizationRow {
                    member,
                    utilization: store.member_utilization(&member.id),
                    top_assignments: assignments
                        .into_iter()
                        .take(TOP_ASSIGNMENTS)
                        .map(|assignment| AssignmentLine {
                            assignment,
                            project_name: store.project_name(&assignment.project_id),
                        })
                        .collect(),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.utilization.total_cmp(&a.utilization));
        rows
    }

    pub fn budget_overview(&self) -> BudgetOverview<'s> {
        let projects = self.store.projects();
        BudgetOverview {
            totals: BudgetFigures::aggregate(projects),
            categories: metrics::category_rollup(self.store.expenses()),
            projects: projects
                .iter()
                .map(|project| ProjectBudget {
                    project,
                    figures: BudgetFigures::for_project(project),
                })
                .collect(),
        }
    }

    /// Weekly status reports, newest first.
    pub fn weekly_updates(&self) -> Vec<&'s WeeklyUpdate> {
        let mut updates: Vec<&WeeklyUpdate> = self.store.weekly_updates().iter().collect();
        updates.sort_by(|a, b| b.date.cmp(&a.date));
        updates
    }

    /// Projects `member_id` is assigned to, in project order.
    pub fn member_projects(&self, member_id: &str, filter: &ProjectFilter) -> Vec<&'s Project> {
        let assignments = self.store.member_assignments(member_id);
        self.store
            .projects()
            .iter()
            .filter(|project| assignments.iter().any(|a| a.project_id == project.id))
            .filter(|project| filter.matches(project))
            .collect()
    }

    /// Member projects with progress and schedule figures measured up to
    /// `as_of`.
    pub fn member_project_rows(
        &self,
        member_id: &str,
        filter: &ProjectFilter,
        as_of: NaiveDate,
    ) -> Vec<MemberProjectRow<'s>> {
        self.member_projects(member_id, filter)
            .into_iter()
            .map(|project| MemberProjectRow {
                project,
                progress: self.store.project_progress(&project.id),
                timeline: metrics::project_timeline_metrics(project, as_of),
            })
            .collect()
    }

    /// Delivery metrics for one member; all zero for an unassigned member.
    pub fn member_performance(&self, member_id: &str) -> MemberPerformance {
        let projects = self.member_projects(member_id, &ProjectFilter::default());
        if projects.is_empty() {
            return MemberPerformance::default();
        }
        let assignments = self.store.member_assignments(member_id);

        let completed: Vec<&Project> = projects
            .iter()
            .copied()
            .filter(|project| project.status == ProjectStatus::Completed)
            .collect();
        let on_time = completed
            .iter()
            .filter(|project| {
                assignments
                    .iter()
                    .find(|assignment| assignment.project_id == project.id)
                    .is_some_and(|assignment| project.end_date <= assignment.end_date)
            })
            .count();
        let progress_total: f64 = projects
            .iter()
            .map(|project| self.store.project_progress(&project.id))
            .sum();

        MemberPerformance {
            total_projects: projects.len(),
            completed_projects: completed.len(),
            on_time_percent: metrics::percent_of(on_time as f64, completed.len() as f64),
            average_completion: progress_total / projects.len() as f64,
        }
    }

    /// Personnel table rows matching `query`, in `state` order.
    pub fn personnel_table(
        &self,
        state: &TableState<MemberSortField>,
        query: &str,
    ) -> Vec<&'s TeamMember> {
        let rows = filter_items(
            self.store.members(),
            self.store,
            query,
            MemberSearchField::DEFAULT_FIELDS,
        );
        state.sort(rows, self.store)
    }

    /// Expense table rows matching `query`, in `state` order.
    pub fn expense_table(
        &self,
        state: &TableState<ExpenseSortField>,
        query: &str,
    ) -> Vec<&'s ExpenseItem> {
        let rows = filter_items(
            self.store.expenses(),
            self.store,
            query,
            ExpenseSearchField::DEFAULT_FIELDS,
        );
        state.sort(rows, self.store)
    }

    /// Risk register rows matching `query`, in `state` order.
    pub fn risk_table(&self, state: &TableState<RiskSortField>, query: &str) -> Vec<&'s Risk> {
        let rows = filter_items(
            self.store.risks(),
            self.store,
            query,
            RiskSearchField::DEFAULT_FIELDS,
        );
        state.sort(rows, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardService;
    use crate::repo::seed::SeedDataSource;
    use crate::repo::store::DomainStore;

    fn seed_store() -> DomainStore {
        DomainStore::load(&SeedDataSource).unwrap()
    }

    #[test]
    fn summary_counts_active_work_and_urgent_warnings() {
        let store = seed_store();
        let summary = DashboardService::new(&store).summary();

        assert_eq!(summary.active_projects, 2);
        assert_eq!(summary.total_projects, 4);
        assert_eq!(summary.urgent_warnings, 3);
        assert_eq!(summary.total_warnings, 4);
        assert!((summary.team_utilization - 530.0 / 7.0).abs() < 1e-9);
        assert_eq!(summary.budget.budget, 1_230_000.0);
        assert_eq!(summary.budget.actual_cost, 435_000.0);
    }

    #[test]
    fn board_orders_by_status_then_priority() {
        let store = seed_store();
        let board = DashboardService::new(&store).project_board();
        let ids: Vec<&str> = board.iter().map(|card| card.project.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p4", "p3"]);
        assert_eq!(board[1].progress, 50.0);
    }

    #[test]
    fn alerts_start_with_critical() {
        let store = seed_store();
        let alerts = DashboardService::new(&store).alerts();
        let ids: Vec<&str> = alerts.iter().map(|alert| alert.warning.id.as_str()).collect();
        assert_eq!(ids, vec!["w4", "w2", "w3", "w1"]);
        assert_eq!(alerts[0].project_names, vec!["Patient Billing Portal"]);
    }

    #[test]
    fn utilization_rows_show_two_largest_assignments() {
        let store = seed_store();
        let rows = DashboardService::new(&store).team_utilization_rows();

        assert_eq!(rows[0].member.id, "tm2");
        assert_eq!(rows[0].utilization, 90.0);
        assert_eq!(rows[0].top_assignments[0].project_name, "Claims Processing Portal");

        let tm5 = rows.iter().find(|row| row.member.id == "tm5").unwrap();
        let ids: Vec<&str> = tm5
            .top_assignments
            .iter()
            .map(|line| line.assignment.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a9", "a10"]);
    }

    #[test]
    fn performance_of_member_without_completed_projects() {
        let store = seed_store();
        let service = DashboardService::new(&store);

        let performance = service.member_performance("tm1");
        assert_eq!(performance.total_projects, 2);
        assert_eq!(performance.completed_projects, 0);
        assert_eq!(performance.on_time_percent, 0.0);
        assert!((performance.average_completion - (100.0 / 3.0 + 50.0) / 2.0).abs() < 1e-9);

        assert_eq!(service.member_performance("tm404").total_projects, 0);
    }

    #[test]
    fn weekly_updates_are_newest_first() {
        let store = seed_store();
        let updates = DashboardService::new(&store).weekly_updates();
        assert_eq!(updates[0].id, "wu1");
        assert_eq!(updates[1].id, "wu2");
    }
}
