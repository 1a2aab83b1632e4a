//! Built-in revenue-cycle sample dataset.
//!
//! The snapshot ships inside the binary so the dashboard can start without
//! any external data.

use crate::repo::source::{DataSource, Dataset, JsonDataSource, RepoResult};

const SEED_JSON: &str = include_str!("../../data/seed.json");

/// Data source serving the embedded sample dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedDataSource;

impl DataSource for SeedDataSource {
    fn name(&self) -> &str {
        "seed"
    }

    fn load(&self) -> RepoResult<Dataset> {
        JsonDataSource::from_json(SEED_JSON).load()
    }
}

#[cfg(test)]
mod tests {
    use super::SeedDataSource;
    use crate::repo::source::DataSource;

    #[test]
    fn seed_snapshot_decodes_every_collection() {
        let dataset = SeedDataSource.load().unwrap();
        assert_eq!(dataset.team_members.len(), 7);
        assert_eq!(dataset.projects.len(), 4);
        assert_eq!(dataset.assignments.len(), 15);
        assert_eq!(dataset.milestones.len(), 10);
        assert_eq!(dataset.expenses.len(), 10);
        assert_eq!(dataset.risks.len(), 6);
        assert_eq!(dataset.resource_warnings.len(), 4);
        assert_eq!(dataset.weekly_updates.len(), 2);
    }
}
