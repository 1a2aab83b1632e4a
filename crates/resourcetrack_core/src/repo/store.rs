//! Indexed, read-only domain store.
//!
//! # Responsibility
//! - Own the loaded dataset for the process lifetime.
//! - Resolve entities by id and children by parent id in O(1).
//! - Memoize per-entity derived metrics on first access.
//!
//! # Invariants
//! - Every entity passed `validate()` and ids are unique per collection.
//! - Child sequences keep dataset insertion order.
//! - Dangling references are logged at load time and tolerated afterwards.

use std::collections::{HashMap, HashSet};

use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::model::budget::ExpenseItem;
use crate::model::member::{Assignment, TeamMember};
use crate::model::project::{Milestone, Project};
use crate::model::report::WeeklyUpdate;
use crate::model::risk::{ResourceWarning, Risk};
use crate::repo::source::{DataSource, Dataset, RepoError, RepoResult};
use crate::service::metrics;

/// Display name used when a project id cannot be resolved.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";
/// Display name used when a member id cannot be resolved.
pub const UNKNOWN_MEMBER: &str = "Unknown Member";

type Positions = HashMap<String, Vec<usize>>;

/// In-memory store backing every dashboard view.
#[derive(Debug)]
pub struct DomainStore {
    data: Dataset,
    members_by_id: HashMap<String, usize>,
    projects_by_id: HashMap<String, usize>,
    milestones_by_id: HashMap<String, usize>,
    assignments_by_member: Positions,
    assignments_by_project: Positions,
    milestones_by_project: Positions,
    expenses_by_project: Positions,
    risks_by_project: Positions,
    derived: OnceCell<DerivedMetrics>,
}

#[derive(Debug, Default)]
struct DerivedMetrics {
    utilization_by_member: HashMap<String, f64>,
    progress_by_project: HashMap<String, f64>,
}

impl DomainStore {
    /// Loads a dataset from `source` and indexes it.
    ///
    /// # Errors
    /// - Propagates source read/decode failures.
    /// - Returns `RepoError::Validation` for the first invalid entity.
    /// - Returns `RepoError::DuplicateId` when an id repeats in a collection.
    pub fn load(source: &dyn DataSource) -> RepoResult<Self> {
        let dataset = source.load().inspect_err(|err| {
            warn!(
                "event=store_load module=repo status=error source={} error={}",
                source.name(),
                err
            );
        })?;
        let store = Self::new(dataset)?;
        info!(
            "event=store_load module=repo status=ok source={} members={} projects={} entities={}",
            source.name(),
            store.data.team_members.len(),
            store.data.projects.len(),
            store.data.len()
        );
        Ok(store)
    }

    /// Validates and indexes an already materialized dataset.
    pub fn new(data: Dataset) -> RepoResult<Self> {
        validate_entities(&data)?;

        let members_by_id =
            unique_index("team member", data.team_members.iter().map(|m| m.id.as_str()))?;
        let projects_by_id = unique_index("project", data.projects.iter().map(|p| p.id.as_str()))?;
        let milestones_by_id =
            unique_index("milestone", data.milestones.iter().map(|m| m.id.as_str()))?;
        ensure_unique("assignment", data.assignments.iter().map(|a| a.id.as_str()))?;
        ensure_unique("expense", data.expenses.iter().map(|e| e.id.as_str()))?;
        ensure_unique("risk", data.risks.iter().map(|r| r.id.as_str()))?;
        ensure_unique(
            "resource warning",
            data.resource_warnings.iter().map(|w| w.id.as_str()),
        )?;
        ensure_unique(
            "weekly update",
            data.weekly_updates.iter().map(|u| u.id.as_str()),
        )?;

        let store = Self {
            members_by_id,
            projects_by_id,
            milestones_by_id,
            assignments_by_member: group_positions(
                data.assignments.iter().map(|a| a.member_id.as_str()),
            ),
            assignments_by_project: group_positions(
                data.assignments.iter().map(|a| a.project_id.as_str()),
            ),
            milestones_by_project: group_positions(
                data.milestones.iter().map(|m| m.project_id.as_str()),
            ),
            expenses_by_project: group_positions(
                data.expenses.iter().map(|e| e.project_id.as_str()),
            ),
            risks_by_project: group_positions(data.risks.iter().map(|r| r.project_id.as_str())),
            derived: OnceCell::new(),
            data,
        };
        store.report_dangling_references();
        Ok(store)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.data.team_members
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.data.assignments
    }

    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.data.milestones
    }

    pub fn expenses(&self) -> &[ExpenseItem] {
        &self.data.expenses
    }

    pub fn risks(&self) -> &[Risk] {
        &self.data.risks
    }

    pub fn resource_warnings(&self) -> &[ResourceWarning] {
        &self.data.resource_warnings
    }

    pub fn weekly_updates(&self) -> &[WeeklyUpdate] {
        &self.data.weekly_updates
    }

    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.members_by_id
            .get(id)
            .and_then(|&position| self.data.team_members.get(position))
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects_by_id
            .get(id)
            .and_then(|&position| self.data.projects.get(position))
    }

    pub fn milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones_by_id
            .get(id)
            .and_then(|&position| self.data.milestones.get(position))
    }

    pub fn member_assignments(&self, member_id: &str) -> Vec<&Assignment> {
        children(&self.data.assignments, self.assignments_by_member.get(member_id))
    }

    pub fn project_assignments(&self, project_id: &str) -> Vec<&Assignment> {
        children(&self.data.assignments, self.assignments_by_project.get(project_id))
    }

    pub fn project_milestones(&self, project_id: &str) -> Vec<&Milestone> {
        children(&self.data.milestones, self.milestones_by_project.get(project_id))
    }

    pub fn project_expenses(&self, project_id: &str) -> Vec<&ExpenseItem> {
        children(&self.data.expenses, self.expenses_by_project.get(project_id))
    }

    pub fn project_risks(&self, project_id: &str) -> Vec<&Risk> {
        children(&self.data.risks, self.risks_by_project.get(project_id))
    }

    /// Project name, or [`UNKNOWN_PROJECT`] for an unresolved id.
    pub fn project_name(&self, id: &str) -> &str {
        self.project(id)
            .map(|project| project.name.as_str())
            .unwrap_or(UNKNOWN_PROJECT)
    }

    /// Member name, or [`UNKNOWN_MEMBER`] for an unresolved id.
    pub fn member_name(&self, id: &str) -> &str {
        self.member(id)
            .map(|member| member.name.as_str())
            .unwrap_or(UNKNOWN_MEMBER)
    }

    /// Sum of the member's allocations; may exceed 100.
    pub fn member_utilization(&self, member_id: &str) -> f64 {
        self.derived()
            .utilization_by_member
            .get(member_id)
            .copied()
            .unwrap_or(0.0)
    }

    /// Share of completed milestones, `0` for a project without milestones.
    pub fn project_progress(&self, project_id: &str) -> f64 {
        self.derived()
            .progress_by_project
            .get(project_id)
            .copied()
            .unwrap_or(0.0)
    }

    fn derived(&self) -> &DerivedMetrics {
        self.derived.get_or_init(|| {
            let utilization_by_member = self
                .assignments_by_member
                .keys()
                .map(|member_id| {
                    let total = metrics::sum_allocations(self.member_assignments(member_id));
                    (member_id.clone(), total)
                })
                .collect();
            let progress_by_project = self
                .milestones_by_project
                .keys()
                .map(|project_id| {
                    let progress =
                        metrics::completion_percent(self.project_milestones(project_id));
                    (project_id.clone(), progress)
                })
                .collect();
            DerivedMetrics {
                utilization_by_member,
                progress_by_project,
            }
        })
    }

    fn report_dangling_references(&self) {
        for assignment in &self.data.assignments {
            if self.member(&assignment.member_id).is_none() {
                warn!(
                    "event=dangling_ref module=repo entity=assignment id={} member_id={}",
                    assignment.id, assignment.member_id
                );
            }
            if self.project(&assignment.project_id).is_none() {
                warn!(
                    "event=dangling_ref module=repo entity=assignment id={} project_id={}",
                    assignment.id, assignment.project_id
                );
            }
        }

        for milestone in &self.data.milestones {
            if self.project(&milestone.project_id).is_none() {
                warn!(
                    "event=dangling_ref module=repo entity=milestone id={} project_id={}",
                    milestone.id, milestone.project_id
                );
            }
            for dependency in &milestone.dependencies {
                match self.milestone(dependency) {
                    None => warn!(
                        "event=dangling_ref module=repo entity=milestone id={} dependency={}",
                        milestone.id, dependency
                    ),
                    Some(other) if other.project_id != milestone.project_id => warn!(
                        "event=cross_project_dependency module=repo milestone={} dependency={}",
                        milestone.id, dependency
                    ),
                    Some(_) => {}
                }
            }
        }

        let project_refs = self
            .data
            .expenses
            .iter()
            .map(|e| ("expense", e.id.as_str(), e.project_id.as_str()))
            .chain(
                self.data
                    .risks
                    .iter()
                    .map(|r| ("risk", r.id.as_str(), r.project_id.as_str())),
            );
        for (entity, id, project_id) in project_refs {
            if self.project(project_id).is_none() {
                warn!(
                    "event=dangling_ref module=repo entity={} id={} project_id={}",
                    entity, id, project_id
                );
            }
        }
    }
}

fn validate_entities(data: &Dataset) -> RepoResult<()> {
    for member in &data.team_members {
        member.validate()?;
    }
    for assignment in &data.assignments {
        assignment.validate()?;
    }
    for project in &data.projects {
        project.validate()?;
    }
    for milestone in &data.milestones {
        milestone.validate()?;
    }
    for expense in &data.expenses {
        expense.validate()?;
    }
    for risk in &data.risks {
        risk.validate()?;
    }
    for warning in &data.resource_warnings {
        warning.validate()?;
    }
    for update in &data.weekly_updates {
        update.validate()?;
    }
    Ok(())
}

fn unique_index<'a>(
    entity: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> RepoResult<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        if index.insert(id.to_string(), position).is_some() {
            return Err(RepoError::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(index)
}

fn ensure_unique<'a>(entity: &'static str, ids: impl Iterator<Item = &'a str>) -> RepoResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RepoError::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn group_positions<'a>(keys: impl Iterator<Item = &'a str>) -> Positions {
    let mut groups = Positions::new();
    for (position, key) in keys.enumerate() {
        groups.entry(key.to_string()).or_default().push(position);
    }
    groups
}

fn children<'a, T>(items: &'a [T], positions: Option<&Vec<usize>>) -> Vec<&'a T> {
    positions
        .map(|positions| {
            positions
                .iter()
                .filter_map(|&position| items.get(position))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{DomainStore, UNKNOWN_PROJECT};
    use crate::repo::seed::SeedDataSource;
    use crate::repo::source::{DataSource, RepoError};

    fn seed_store() -> DomainStore {
        DomainStore::load(&SeedDataSource).unwrap()
    }

    #[test]
    fn resolves_entities_by_id() {
        let store = seed_store();
        assert_eq!(store.member("tm5").unwrap().name, "Marcus Johnson");
        assert_eq!(store.project("p2").unwrap().name, "Insurance Verification System");
        assert!(store.member("tm404").is_none());
        assert!(store.project("").is_none());
    }

    #[test]
    fn child_lookups_keep_insertion_order() {
        let store = seed_store();
        let ids: Vec<&str> = store
            .member_assignments("tm5")
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a9", "a10", "a11"]);

        let milestones: Vec<&str> = store
            .project_milestones("p2")
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(milestones, vec!["m7", "m8", "m9", "m10"]);
    }

    #[test]
    fn unknown_parent_yields_empty_children() {
        let store = seed_store();
        assert!(store.project_milestones("p4").is_empty());
        assert!(store.project_expenses("p404").is_empty());
        assert!(store.project_risks("p404").is_empty());
        assert!(store.member_assignments("tm404").is_empty());
    }

    #[test]
    fn unresolved_project_name_falls_back() {
        let store = seed_store();
        assert_eq!(store.project_name("p404"), UNKNOWN_PROJECT);
        assert_eq!(store.project_name("p1"), "Claims Processing Portal");
    }

    #[test]
    fn memoized_metrics_match_direct_sums() {
        let store = seed_store();
        assert_eq!(store.member_utilization("tm5"), 75.0);
        assert_eq!(store.member_utilization("tm1"), 85.0);
        assert_eq!(store.member_utilization("tm404"), 0.0);
        assert!((store.project_progress("p1") - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(store.project_progress("p4"), 0.0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut dataset = SeedDataSource.load().unwrap();
        let copy = dataset.projects[0].clone();
        dataset.projects.push(copy);

        let err = DomainStore::new(dataset).unwrap_err();
        match err {
            RepoError::DuplicateId { entity, id } => {
                assert_eq!(entity, "project");
                assert_eq!(id, "p1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_entity_fails_the_load() {
        let mut dataset = SeedDataSource.load().unwrap();
        dataset.team_members[0].availability = 140.0;

        let err = DomainStore::new(dataset).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
