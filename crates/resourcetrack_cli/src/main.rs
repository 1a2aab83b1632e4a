//! ResourceTrack command-line digest.
//!
//! # Responsibility
//! - Load configuration and a dataset, then print one dashboard section.
//! - Report load/config failures on stderr with a non-zero exit code.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use log::info;
use resourcetrack_core::{
    core_version, init_from_config, AppState, DashboardConfig, DataSource, DomainStore,
    JsonDataSource, Section, SeedDataSource,
};

/// Prints a ResourceTrack dashboard section to stdout.
#[derive(Debug, Parser)]
#[command(name = "resourcetrack", version, about)]
struct Cli {
    /// JSON snapshot to load instead of the built-in sample data.
    #[arg(long, value_name = "SNAPSHOT")]
    data: Option<PathBuf>,
    /// JSON configuration file.
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Section id: dashboard, personnel, timeline, budget, risks, reports, analytics.
    /// Defaults to the dashboard.
    #[arg(long)]
    section: Option<String>,
    /// Project id to select (opens the timeline when no section is given).
    #[arg(long)]
    project: Option<String>,
    /// Case-insensitive table search.
    #[arg(long, default_value = "")]
    search: String,
    /// Column id to sort tables by, as if its header were clicked.
    #[arg(long, value_name = "FIELD")]
    sort: Option<String>,
    /// Reference date for schedule figures (YYYY-MM-DD); defaults to today.
    #[arg(long, value_name = "DATE")]
    as_of: Option<NaiveDate>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("resourcetrack error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match cli.config.as_deref() {
        Some(path) => DashboardConfig::from_path(path).map_err(|err| err.to_string())?,
        None => DashboardConfig::default(),
    };
    init_from_config(&config)?;

    let section = cli
        .section
        .as_deref()
        .map(|id| Section::from_id(id).ok_or_else(|| format!("unknown section `{id}`")))
        .transpose()?;

    let data_path = cli.data.or_else(|| config.data_path.clone());
    let source: Box<dyn DataSource> = match data_path {
        Some(path) => Box::new(JsonDataSource::from_path(path)),
        None => Box::new(SeedDataSource),
    };
    let store = DomainStore::load(source.as_ref()).map_err(|err| err.to_string())?;

    if let Some(project_id) = cli.project.as_deref() {
        if store.project(project_id).is_none() {
            return Err(format!("unknown project `{project_id}`"));
        }
    }
    let state = initial_state(section, cli.project.as_deref());
    info!(
        "event=cli_render module=cli section={} project={}",
        state.active_section().id(),
        state.active_project().unwrap_or("none")
    );

    println!("resourcetrack {} ({})", core_version(), source.name());
    let view = render::View {
        store: &store,
        state: &state,
        thresholds: &config.thresholds,
        query: &cli.search,
        sort: cli.sort.as_deref(),
        as_of: cli.as_of.unwrap_or_else(|| Local::now().date_naive()),
    };
    print!("{}", view.digest());
    print!("{}", view.section()?);
    Ok(())
}

/// Selection for one invocation; a project given without a section opens
/// its timeline.
fn initial_state(section: Option<Section>, project_id: Option<&str>) -> AppState {
    let mut state = AppState::new();
    match (section, project_id) {
        (None, Some(project_id)) => state.open_project_timeline(project_id),
        (section, project_id) => {
            state.set_active_section(section.unwrap_or_default());
            state.set_active_project(project_id);
        }
    }
    state
}
