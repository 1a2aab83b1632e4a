//! Sortable and searchable columns of the personnel, expense and risk tables.

use std::borrow::Cow;

use chrono::Datelike;

use crate::model::budget::ExpenseItem;
use crate::model::member::TeamMember;
use crate::model::risk::Risk;
use crate::repo::store::DomainStore;
use crate::search::filter::SearchField;
use crate::search::sort::{FieldId, SortField, SortKey};

fn text(value: &str) -> SortKey<'_> {
    SortKey::Text(Cow::Borrowed(value))
}

/// Project name for sorting; unresolved projects sort as empty text.
fn project_name_key<'a>(store: &'a DomainStore, project_id: &str) -> SortKey<'a> {
    text(
        store
            .project(project_id)
            .map(|project| project.name.as_str())
            .unwrap_or(""),
    )
}

fn project_name_haystack<'a>(store: &'a DomainStore, project_id: &str) -> Vec<Cow<'a, str>> {
    store
        .project(project_id)
        .map(|project| Cow::Borrowed(project.name.as_str()))
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortField {
    Name,
    Role,
    Utilization,
    Availability,
}

impl FieldId for MemberSortField {
    const DEFAULT: Self = Self::Utilization;
    const ALL: &'static [Self] = &[Self::Name, Self::Role, Self::Utilization, Self::Availability];

    fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Role => "role",
            Self::Utilization => "utilization",
            Self::Availability => "availability",
        }
    }
}

impl SortField<TeamMember> for MemberSortField {
    fn key<'a>(self, store: &'a DomainStore, item: &'a TeamMember) -> SortKey<'a> {
        match self {
            Self::Name => text(&item.name),
            Self::Role => text(&item.role),
            Self::Utilization => SortKey::Number(store.member_utilization(&item.id)),
            Self::Availability => SortKey::Number(item.availability),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSearchField {
    Name,
    Role,
    Skills,
}

impl MemberSearchField {
    pub const DEFAULT_FIELDS: &'static [Self] = &[Self::Name, Self::Role, Self::Skills];
}

impl SearchField<TeamMember> for MemberSearchField {
    fn haystacks<'a>(self, _store: &'a DomainStore, item: &'a TeamMember) -> Vec<Cow<'a, str>> {
        match self {
            Self::Name => vec![Cow::Borrowed(item.name.as_str())],
            Self::Role => vec![Cow::Borrowed(item.role.as_str())],
            Self::Skills => item
                .skills
                .iter()
                .map(|skill| Cow::Borrowed(skill.as_str()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSortField {
    Date,
    Project,
    Description,
    Category,
    Budgeted,
    Actual,
    Variance,
}

impl FieldId for ExpenseSortField {
    const DEFAULT: Self = Self::Date;
    const ALL: &'static [Self] = &[
        Self::Date,
        Self::Project,
        Self::Description,
        Self::Category,
        Self::Budgeted,
        Self::Actual,
        Self::Variance,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Project => "project",
            Self::Description => "description",
            Self::Category => "category",
            Self::Budgeted => "budgeted",
            Self::Actual => "actual",
            Self::Variance => "variance",
        }
    }
}

impl SortField<ExpenseItem> for ExpenseSortField {
    fn key<'a>(self, store: &'a DomainStore, item: &'a ExpenseItem) -> SortKey<'a> {
        match self {
            Self::Date => SortKey::Number(f64::from(item.date.num_days_from_ce())),
            Self::Project => project_name_key(store, &item.project_id),
            Self::Description => text(&item.description),
            Self::Category => text(item.category.as_str()),
            Self::Budgeted => SortKey::Number(item.budgeted_amount),
            Self::Actual => SortKey::Number(item.actual_amount),
            Self::Variance => SortKey::Number(item.variance()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSearchField {
    Description,
    ProjectName,
    Category,
}

impl ExpenseSearchField {
    pub const DEFAULT_FIELDS: &'static [Self] =
        &[Self::Description, Self::ProjectName, Self::Category];
}

impl SearchField<ExpenseItem> for ExpenseSearchField {
    fn haystacks<'a>(self, store: &'a DomainStore, item: &'a ExpenseItem) -> Vec<Cow<'a, str>> {
        match self {
            Self::Description => vec![Cow::Borrowed(item.description.as_str())],
            Self::ProjectName => project_name_haystack(store, &item.project_id),
            Self::Category => vec![Cow::Borrowed(item.category.as_str())],
        }
    }
}

/// Risk columns; impact, probability and status compare by severity rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskSortField {
    Project,
    Category,
    Impact,
    Probability,
    Status,
}

impl FieldId for RiskSortField {
    const DEFAULT: Self = Self::Impact;
    const ALL: &'static [Self] = &[
        Self::Project,
        Self::Category,
        Self::Impact,
        Self::Probability,
        Self::Status,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Category => "category",
            Self::Impact => "impact",
            Self::Probability => "probability",
            Self::Status => "status",
        }
    }
}

impl SortField<Risk> for RiskSortField {
    fn key<'a>(self, store: &'a DomainStore, item: &'a Risk) -> SortKey<'a> {
        match self {
            Self::Project => project_name_key(store, &item.project_id),
            Self::Category => text(item.category.as_str()),
            Self::Impact => SortKey::Number(f64::from(item.impact.rank())),
            Self::Probability => SortKey::Number(f64::from(item.probability.rank())),
            Self::Status => SortKey::Number(f64::from(item.status.rank())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskSearchField {
    Description,
    ProjectName,
    Category,
    Status,
}

impl RiskSearchField {
    pub const DEFAULT_FIELDS: &'static [Self] = &[
        Self::Description,
        Self::ProjectName,
        Self::Category,
        Self::Status,
    ];
}

impl SearchField<Risk> for RiskSearchField {
    fn haystacks<'a>(self, store: &'a DomainStore, item: &'a Risk) -> Vec<Cow<'a, str>> {
        match self {
            Self::Description => vec![Cow::Borrowed(item.description.as_str())],
            Self::ProjectName => project_name_haystack(store, &item.project_id),
            Self::Category => vec![Cow::Borrowed(item.category.as_str())],
            Self::Status => vec![Cow::Borrowed(item.status.as_str())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpenseSortField, MemberSortField, RiskSortField};
    use crate::search::sort::FieldId;

    #[test]
    fn field_ids_round_trip() {
        for field in MemberSortField::ALL {
            assert_eq!(MemberSortField::parse(field.id()), Some(*field));
        }
        for field in ExpenseSortField::ALL {
            assert_eq!(ExpenseSortField::parse(field.id()), Some(*field));
        }
        for field in RiskSortField::ALL {
            assert_eq!(RiskSortField::parse(field.id()), Some(*field));
        }
        assert_eq!(RiskSortField::parse("mitigation"), None);
    }

    #[test]
    fn defaults_match_table_conventions() {
        assert_eq!(MemberSortField::DEFAULT, MemberSortField::Utilization);
        assert_eq!(ExpenseSortField::DEFAULT, ExpenseSortField::Date);
        assert_eq!(RiskSortField::DEFAULT, RiskSortField::Impact);
    }
}
