//! Typed, stable multi-field sorting and the table sort state machine.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::repo::store::DomainStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Comparable value extracted from one field of an item.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey<'a> {
    Text(Cow<'a, str>),
    Number(f64),
}

impl SortKey<'_> {
    /// Compares keys of the same kind; mixed kinds compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => compare_text(a, b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    }
}

/// Dictionary-style text order: case-insensitive first, then lowercase
/// before uppercase for otherwise equal text.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Column identity shared by sort and table state.
pub trait FieldId: Copy + Eq + 'static {
    /// Field a table sorts by before any header click.
    const DEFAULT: Self;
    const ALL: &'static [Self];

    /// Stable string id, e.g. `utilization`.
    fn id(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.id() == raw)
    }
}

/// A column of `T` with a declared key extractor.
pub trait SortField<T>: FieldId {
    fn key<'a>(self, store: &'a DomainStore, item: &'a T) -> SortKey<'a>;
}

/// Returns `items` ordered by `field` in `direction`.
///
/// Keys are extracted once per item. The sort is stable, so reversing the
/// direction of a strictly ordered sequence reverses it, and ties keep their
/// input order in both directions.
pub fn sort_by_field<'a, T, F>(
    items: impl IntoIterator<Item = &'a T>,
    store: &'a DomainStore,
    field: F,
    direction: SortDirection,
) -> Vec<&'a T>
where
    T: 'a,
    F: SortField<T>,
{
    let mut keyed: Vec<(SortKey<'a>, &'a T)> = items
        .into_iter()
        .map(|item| (field.key(store, item), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.compare(b)));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Sort state of one table: the active column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState<F> {
    field: F,
    direction: SortDirection,
}

impl<F: FieldId> Default for TableState<F> {
    fn default() -> Self {
        Self::new(F::DEFAULT)
    }
}

impl<F: FieldId> TableState<F> {
    /// Starts sorted by `field`, descending.
    pub fn new(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    pub fn field(&self) -> F {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Header click: flips direction on the active field, otherwise switches
    /// to `field` in descending order.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    /// Header click by string id; unknown ids leave the state unchanged.
    pub fn toggle_by_id(&mut self, raw: &str) -> bool {
        match F::parse(raw) {
            Some(field) => {
                self.toggle(field);
                true
            }
            None => false,
        }
    }

    pub fn sort<'a, T>(&self, items: impl IntoIterator<Item = &'a T>, store: &'a DomainStore) -> Vec<&'a T>
    where
        T: 'a,
        F: SortField<T>,
    {
        sort_by_field(items, store, self.field, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_text, sort_by_field, FieldId, SortDirection, SortField, SortKey, TableState};
    use crate::repo::source::Dataset;
    use crate::repo::store::DomainStore;
    use std::borrow::Cow;
    use std::cmp::Ordering;

    #[derive(Debug)]
    struct Row {
        label: &'static str,
        score: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RowField {
        Label,
        Score,
    }

    impl FieldId for RowField {
        const DEFAULT: Self = Self::Score;
        const ALL: &'static [Self] = &[Self::Label, Self::Score];

        fn id(self) -> &'static str {
            match self {
                Self::Label => "label",
                Self::Score => "score",
            }
        }
    }

    impl SortField<Row> for RowField {
        fn key<'a>(self, _store: &'a DomainStore, item: &'a Row) -> SortKey<'a> {
            match self {
                Self::Label => SortKey::Text(Cow::Borrowed(item.label)),
                Self::Score => SortKey::Number(item.score),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { label: "delta", score: 2.0 },
            Row { label: "Alpha", score: 1.0 },
            Row { label: "charlie", score: 2.0 },
            Row { label: "bravo", score: 3.0 },
        ]
    }

    fn labels(rows: &[&Row]) -> Vec<&'static str> {
        rows.iter().map(|row| row.label).collect()
    }

    #[test]
    fn text_order_ignores_case() {
        let store = DomainStore::new(Dataset::default()).unwrap();
        let rows = rows();
        let sorted = sort_by_field(&rows, &store, RowField::Label, SortDirection::Ascending);
        assert_eq!(labels(&sorted), vec!["Alpha", "bravo", "charlie", "delta"]);
        assert_eq!(compare_text("a", "A"), Ordering::Less);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let store = DomainStore::new(Dataset::default()).unwrap();
        let rows = rows();

        let desc = sort_by_field(&rows, &store, RowField::Score, SortDirection::Descending);
        assert_eq!(labels(&desc), vec!["bravo", "delta", "charlie", "Alpha"]);

        let asc = sort_by_field(&rows, &store, RowField::Score, SortDirection::Ascending);
        assert_eq!(labels(&asc), vec!["Alpha", "delta", "charlie", "bravo"]);
    }

    #[test]
    fn resorting_sorted_output_is_identity() {
        let store = DomainStore::new(Dataset::default()).unwrap();
        let rows = rows();
        let once = sort_by_field(&rows, &store, RowField::Score, SortDirection::Descending);
        let twice = sort_by_field(once.iter().copied(), &store, RowField::Score, SortDirection::Descending);
        assert_eq!(labels(&once), labels(&twice));
    }

    #[test]
    fn table_state_toggles_like_header_clicks() {
        let mut state = TableState::<RowField>::default();
        assert_eq!(state.field(), RowField::Score);
        assert_eq!(state.direction(), SortDirection::Descending);

        state.toggle(RowField::Score);
        assert_eq!(state.direction(), SortDirection::Ascending);

        state.toggle(RowField::Label);
        assert_eq!(state.field(), RowField::Label);
        assert_eq!(state.direction(), SortDirection::Descending);

        assert!(!state.toggle_by_id("unknown"));
        assert!(state.toggle_by_id("label"));
        assert_eq!(state.direction(), SortDirection::Ascending);
    }
}
