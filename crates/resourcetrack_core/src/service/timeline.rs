//! Gantt-style timeline geometry and critical-path display lists.
//!
//! # Responsibility
//! - Convert project and milestone dates into whole-week offsets from the
//!   earliest project start.
//! - Express offsets and spans as fractions of the total axis width.
//! - Resolve milestone dependencies for display.
//!
//! # Invariants
//! - Week counts use `ceil(|days| / 7)`; dates before the axis start still
//!   yield a non-negative offset.
//! - Fractions are `0` when the axis spans zero weeks.
//! - Critical-path membership is the stored milestone flag; no scheduling
//!   graph is computed.

use chrono::{Duration, NaiveDate};

use crate::model::project::{Milestone, Project};
use crate::repo::store::DomainStore;

/// Whole weeks between two dates, rounded up.
pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let days = (to - from).num_days().abs();
    (days + 6) / 7
}

/// Short axis label for a week start, e.g. `Jan 15`.
pub fn week_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Date range covered by the timeline axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineSpan {
    /// Earliest start to latest end across `projects`; `None` when empty.
    pub fn covering<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Option<Self> {
        projects.into_iter().fold(None, |span: Option<Self>, project| {
            Some(match span {
                None => Self {
                    start: project.start_date,
                    end: project.end_date,
                },
                Some(span) => Self {
                    start: span.start.min(project.start_date),
                    end: span.end.max(project.end_date),
                },
            })
        })
    }

    pub fn total_weeks(&self) -> i64 {
        weeks_between(self.start, self.end)
    }

    pub fn offset_weeks(&self, date: NaiveDate) -> i64 {
        weeks_between(self.start, date)
    }

    /// `weeks / total_weeks`, or `0` on a zero-week axis.
    pub fn fraction(&self, weeks: f64) -> f64 {
        let total = self.total_weeks();
        if total == 0 {
            return 0.0;
        }
        weeks / total as f64
    }

    /// Left edge of `date` on the axis as a `[0, 1]` fraction.
    pub fn position(&self, date: NaiveDate) -> f64 {
        self.fraction(self.offset_weeks(date) as f64)
    }

    /// Width of the `start..end` window as a fraction of the axis.
    pub fn width(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        self.fraction(weeks_between(start, end) as f64)
    }

    /// First day of every axis column.
    pub fn week_starts(&self) -> Vec<NaiveDate> {
        (0..self.total_weeks())
            .map(|week| self.start + Duration::weeks(week))
            .collect()
    }
}

/// Line drawn from a project bar to a critical milestone marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneMarker<'a> {
    pub milestone: &'a Milestone,
    pub offset_weeks: i64,
    pub position: f64,
    /// Present for critical-path milestones that have dependencies.
    pub connector: Option<Connector>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectBar<'a> {
    pub project: &'a Project,
    pub offset_weeks: i64,
    pub span_weeks: i64,
    pub left: f64,
    pub width: f64,
    pub milestones: Vec<MilestoneMarker<'a>>,
}

/// Complete timeline layout: axis plus one bar per project.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineChart<'a> {
    pub span: TimelineSpan,
    /// Bars ordered by project start date.
    pub rows: Vec<ProjectBar<'a>>,
}

impl TimelineChart<'_> {
    pub fn week_labels(&self) -> Vec<String> {
        self.span.week_starts().into_iter().map(week_label).collect()
    }
}

/// Lays out every project of `store` on a shared week axis.
///
/// Returns `None` when the store holds no projects.
pub fn build_chart(store: &DomainStore) -> Option<TimelineChart<'_>> {
    let span = TimelineSpan::covering(store.projects())?;

    let mut projects: Vec<&Project> = store.projects().iter().collect();
    projects.sort_by_key(|project| project.start_date);

    let rows = projects
        .into_iter()
        .map(|project| {
            let offset_weeks = span.offset_weeks(project.start_date);
            let milestones = store
                .project_milestones(&project.id)
                .into_iter()
                .map(|milestone| milestone_marker(&span, offset_weeks, milestone))
                .collect();
            ProjectBar {
                project,
                offset_weeks,
                span_weeks: weeks_between(project.start_date, project.end_date),
                left: span.fraction(offset_weeks as f64),
                width: span.width(project.start_date, project.end_date),
                milestones,
            }
        })
        .collect();

    Some(TimelineChart { span, rows })
}

fn milestone_marker<'a>(
    span: &TimelineSpan,
    project_offset: i64,
    milestone: &'a Milestone,
) -> MilestoneMarker<'a> {
    let offset_weeks = span.offset_weeks(milestone.due_date);
    let connector = (milestone.is_critical_path && !milestone.dependencies.is_empty()).then(|| {
        let from = project_offset as f64 + 0.5;
        Connector {
            left: span.fraction(from),
            width: span.fraction((offset_weeks as f64 - from).max(0.0)),
        }
    });
    MilestoneMarker {
        milestone,
        offset_weeks,
        position: span.position(milestone.due_date),
        connector,
    }
}

/// Which milestones a milestone list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneFilter {
    All,
    CriticalPath,
}

impl MilestoneFilter {
    fn accepts(self, milestone: &Milestone) -> bool {
        match self {
            Self::All => true,
            Self::CriticalPath => milestone.is_critical_path,
        }
    }
}

/// A milestone with its dependencies resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneEntry<'a> {
    pub milestone: &'a Milestone,
    pub dependencies: Vec<&'a Milestone>,
}

/// Resolves dependency ids by direct lookup, dropping unknown ids.
pub fn resolve_dependencies<'a>(store: &'a DomainStore, milestone: &Milestone) -> Vec<&'a Milestone> {
    milestone
        .dependencies
        .iter()
        .filter_map(|id| store.milestone(id))
        .collect()
}

/// Milestones of a project accepted by `filter`, ordered by due date.
pub fn milestone_list<'a>(
    store: &'a DomainStore,
    project_id: &str,
    filter: MilestoneFilter,
) -> Vec<MilestoneEntry<'a>> {
    let mut milestones: Vec<&Milestone> = store
        .project_milestones(project_id)
        .into_iter()
        .filter(|milestone| filter.accepts(milestone))
        .collect();
    milestones.sort_by_key(|milestone| milestone.due_date);

    milestones
        .into_iter()
        .map(|milestone| MilestoneEntry {
            milestone,
            dependencies: resolve_dependencies(store, milestone),
        })
        .collect()
}

/// Critical-path milestones of a project, ordered by due date.
pub fn critical_path<'a>(store: &'a DomainStore, project_id: &str) -> Vec<MilestoneEntry<'a>> {
    milestone_list(store, project_id, MilestoneFilter::CriticalPath)
}
