//! Core domain logic for the ResourceTrack dashboard.
//! This crate owns the entity model, lookups, derived metrics and table
//! sorting/filtering that every dashboard surface renders from.

pub mod config;
pub mod display;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod selection;
pub mod service;

pub use config::{ConfigError, ConfigResult, DashboardConfig, Thresholds};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::ModelValidationError;
pub use repo::seed::SeedDataSource;
pub use repo::source::{DataSource, Dataset, JsonDataSource, RepoError, RepoResult};
pub use repo::store::{DomainStore, UNKNOWN_MEMBER, UNKNOWN_PROJECT};
pub use search::filter::{filter_items, ProjectFilter, SearchField};
pub use search::sort::{sort_by_field, FieldId, SortDirection, SortField, SortKey, TableState};
pub use selection::{AppState, Section};
pub use service::dashboard::DashboardService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
