use pretty_assertions::assert_eq;
use resourcetrack_core::model::risk::{Impact, Probability, Risk, RiskCategory, RiskStatus};
use resourcetrack_core::search::fields::{
    ExpenseSortField, MemberSearchField, MemberSortField, RiskSortField,
};
use resourcetrack_core::{
    filter_items, sort_by_field, DashboardService, DataSource, DomainStore, JsonDataSource,
    SeedDataSource, SortDirection, TableState,
};

fn seed_store() -> DomainStore {
    DomainStore::load(&SeedDataSource).unwrap()
}

fn ids<'a, T: 'a>(rows: &[&'a T], id: impl Fn(&'a T) -> &'a str) -> Vec<&'a str> {
    rows.iter().map(|row| id(*row)).collect()
}

#[test]
fn personnel_defaults_to_utilization_descending() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let state = TableState::<MemberSortField>::default();

    let rows = service.personnel_table(&state, "");
    assert_eq!(
        ids(&rows, |m| m.id.as_str()),
        vec!["tm2", "tm1", "tm4", "tm5", "tm3", "tm7", "tm6"]
    );
}

#[test]
fn toggling_the_active_column_keeps_ties_in_input_order() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let mut state = TableState::<MemberSortField>::default();
    state.toggle(MemberSortField::Utilization);
    assert_eq!(state.direction(), SortDirection::Ascending);

    let rows = service.personnel_table(&state, "");
    assert_eq!(
        ids(&rows, |m| m.id.as_str()),
        vec!["tm6", "tm3", "tm7", "tm5", "tm4", "tm1", "tm2"]
    );
}

#[test]
fn reversing_a_strict_order_reverses_the_rows() {
    let store = seed_store();
    let members = store.members();

    let asc = sort_by_field(members, &store, MemberSortField::Name, SortDirection::Ascending);
    let mut desc = sort_by_field(members, &store, MemberSortField::Name, SortDirection::Descending);
    desc.reverse();
    assert_eq!(ids(&asc, |m| m.id.as_str()), ids(&desc, |m| m.id.as_str()));
    assert_eq!(asc[0].name, "Andre Williams");
}

#[test]
fn personnel_search_covers_skills() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let state = TableState::<MemberSortField>::default();

    let rows = service.personnel_table(&state, "  revenue CYCLE ");
    assert_eq!(ids(&rows, |m| m.id.as_str()), vec!["tm1", "tm5"]);

    let rows = service.personnel_table(&state, "hipaa");
    assert_eq!(ids(&rows, |m| m.id.as_str()), vec!["tm7", "tm6"]);

    assert!(service.personnel_table(&state, "cobol").is_empty());
}

#[test]
fn filtering_is_idempotent() {
    let store = seed_store();
    let fields = MemberSearchField::DEFAULT_FIELDS;
    let once = filter_items(store.members(), &store, "developer", fields);
    let twice = filter_items(once.iter().copied(), &store, "developer", fields);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 2);
}

#[test]
fn expenses_default_to_newest_first() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let state = TableState::<ExpenseSortField>::default();

    let rows = service.expense_table(&state, "");
    assert_eq!(
        ids(&rows, |e| e.id.as_str()),
        vec!["e3", "e7", "e10", "e2", "e6", "e5", "e9", "e8", "e1", "e4"]
    );
}

#[test]
fn expense_search_matches_resolved_project_names() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let state = TableState::<ExpenseSortField>::default();

    let rows = service.expense_table(&state, "claims processing");
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|e| e.project_id == "p1"));

    let rows = service.expense_table(&state, "API");
    assert_eq!(ids(&rows, |e| e.id.as_str()), vec!["e5", "e9"]);
}

#[test]
fn expense_variance_column_sorts_overruns_last_when_descending() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let mut state = TableState::<ExpenseSortField>::default();
    assert!(state.toggle_by_id("variance"));

    let rows = service.expense_table(&state, "");
    assert_eq!(rows[0].id, "e1");
    assert_eq!(rows[rows.len() - 1].id, "e6");
}

#[test]
fn risks_default_to_impact_rank() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let state = TableState::<RiskSortField>::default();

    let rows = service.risk_table(&state, "");
    assert_eq!(
        ids(&rows, |r| r.id.as_str()),
        vec!["r2", "r1", "r4", "r3", "r5", "r6"]
    );
}

#[test]
fn risk_search_spans_status_and_project() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let state = TableState::<RiskSortField>::default();

    let rows = service.risk_table(&state, "escalated");
    assert_eq!(ids(&rows, |r| r.id.as_str()), vec!["r6"]);

    let rows = service.risk_table(&state, "insurance");
    assert_eq!(ids(&rows, |r| r.id.as_str()), vec!["r4", "r5"]);
}

#[test]
fn risk_project_column_sorts_by_name() {
    let store = seed_store();
    let service = DashboardService::new(&store);
    let mut state = TableState::<RiskSortField>::default();
    state.toggle(RiskSortField::Project);

    let rows = service.risk_table(&state, "");
    assert_eq!(
        ids(&rows, |r| r.id.as_str()),
        vec!["r6", "r4", "r5", "r1", "r2", "r3"]
    );

    state.toggle(RiskSortField::Project);
    let rows = service.risk_table(&state, "");
    assert_eq!(
        ids(&rows, |r| r.id.as_str()),
        vec!["r1", "r2", "r3", "r4", "r5", "r6"]
    );
}

#[test]
fn orphaned_and_unlabelled_risks_sort_last() {
    let mut dataset = SeedDataSource.load().unwrap();
    dataset.risks.push(Risk {
        id: "r7".to_string(),
        project_id: "p404".to_string(),
        category: RiskCategory::from_label("contract"),
        description: "Legacy clearinghouse contract".to_string(),
        impact: Impact::from_label("severe"),
        probability: Probability::Low,
        status: RiskStatus::Identified,
        mitigation: None,
    });
    let store = DomainStore::new(dataset).unwrap();
    let service = DashboardService::new(&store);

    let by_impact = service.risk_table(&TableState::<RiskSortField>::default(), "");
    assert_eq!(by_impact[by_impact.len() - 1].id, "r7");

    let mut by_project = TableState::<RiskSortField>::default();
    by_project.toggle(RiskSortField::Project);
    let rows = service.risk_table(&by_project, "");
    assert_eq!(rows[rows.len() - 1].id, "r7");

    assert!(service.risk_table(&by_project, "unknown project").is_empty());
    assert_eq!(service.risk_table(&by_project, "clearinghouse").len(), 1);
}

#[test]
fn unknown_category_labels_stay_searchable() {
    let mut snapshot = serde_json::to_value(SeedDataSource.load().unwrap()).unwrap();
    snapshot["risks"][0]["category"] = "legacy".into();
    snapshot["expenses"][0]["category"] = "travel".into();
    let store = DomainStore::load(&JsonDataSource::from_json(snapshot.to_string())).unwrap();
    let service = DashboardService::new(&store);

    let risks = service.risk_table(&TableState::<RiskSortField>::default(), "legacy");
    assert_eq!(ids(&risks, |r| r.id.as_str()), vec!["r1"]);
    assert_eq!(risks[0].category.as_str(), "legacy");
    assert!(service
        .risk_table(&TableState::<RiskSortField>::default(), "unrecognized")
        .is_empty());

    let expenses = service.expense_table(&TableState::<ExpenseSortField>::default(), "TRAVEL");
    assert_eq!(ids(&expenses, |e| e.id.as_str()), vec!["e1"]);
}
