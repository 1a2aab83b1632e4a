//! Case-insensitive substring search and structured project filters.

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::model::project::{Priority, Project, ProjectStatus};
use crate::repo::store::DomainStore;

/// A searchable column of `T`.
///
/// A field may expand to several strings (e.g. every skill tag) and may
/// resolve foreign keys through the store; unresolvable references simply
/// contribute nothing.
pub trait SearchField<T>: Copy {
    fn haystacks<'a>(self, store: &'a DomainStore, item: &'a T) -> Vec<Cow<'a, str>>;
}

/// Lowercased, trimmed query; `None` when it matches everything.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Returns whether any of `fields` of `item` contains `needle`.
///
/// `needle` must already be normalized with [`normalize_query`].
pub fn matches_query<T, F>(store: &DomainStore, item: &T, needle: &str, fields: &[F]) -> bool
where
    F: SearchField<T>,
{
    fields.iter().any(|field| {
        field
            .haystacks(store, item)
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle))
    })
}

/// Keeps the items whose fields contain `query`, preserving order.
pub fn filter_items<'a, T, F>(
    items: impl IntoIterator<Item = &'a T>,
    store: &'a DomainStore,
    query: &str,
    fields: &[F],
) -> Vec<&'a T>
where
    T: 'a,
    F: SearchField<T>,
{
    let Some(needle) = normalize_query(query) else {
        return items.into_iter().collect();
    };
    items
        .into_iter()
        .filter(|item| matches_query(store, *item, &needle, fields))
        .collect()
}

/// Structured filter for a member's project list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    /// Keeps projects starting on or after this date.
    pub starts_on_or_after: Option<NaiveDate>,
    /// Keeps projects ending on or before this date.
    pub ends_on_or_before: Option<NaiveDate>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if self
            .status
            .as_ref()
            .is_some_and(|status| &project.status != status)
        {
            return false;
        }
        if self
            .priority
            .as_ref()
            .is_some_and(|priority| &project.priority != priority)
        {
            return false;
        }
        if self
            .starts_on_or_after
            .is_some_and(|from| project.start_date < from)
        {
            return false;
        }
        if self
            .ends_on_or_before
            .is_some_and(|to| project.end_date > to)
        {
            return false;
        }
        true
    }
}
