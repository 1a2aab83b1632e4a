//! UI selection state: the active section and the active project.
//!
//! # Responsibility
//! - Hold the only mutable state of a dashboard session.
//! - Expose named write operations; every view reads the state explicitly.
//!
//! # Invariants
//! - Selecting a project expands it on the timeline; the expansion can still
//!   be toggled off afterwards.

use std::collections::BTreeSet;

use log::debug;

use crate::model::project::ProjectId;

/// Navigable dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Personnel,
    Timeline,
    Budget,
    Risks,
    Reports,
    Analytics,
}

impl Section {
    /// Sections in navigation order.
    pub const ALL: &'static [Section] = &[
        Self::Dashboard,
        Self::Personnel,
        Self::Timeline,
        Self::Budget,
        Self::Risks,
        Self::Reports,
        Self::Analytics,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Personnel => "personnel",
            Self::Timeline => "timeline",
            Self::Budget => "budget",
            Self::Risks => "risks",
            Self::Reports => "reports",
            Self::Analytics => "analytics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Personnel => "Personnel",
            Self::Timeline => "Timeline",
            Self::Budget => "Budget",
            Self::Risks => "Risks",
            Self::Reports => "Reports",
            Self::Analytics => "Analytics",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|section| section.id() == raw)
    }
}

/// Session state shared by every view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    active_section: Section,
    active_project: Option<ProjectId>,
    expanded_projects: BTreeSet<ProjectId>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn active_project(&self) -> Option<&str> {
        self.active_project.as_deref()
    }

    pub fn set_active_section(&mut self, section: Section) {
        if self.active_section != section {
            debug!(
                "event=section_change module=selection from={} to={}",
                self.active_section.id(),
                section.id()
            );
        }
        self.active_section = section;
    }

    /// Selects a project (or clears the selection with `None`).
    ///
    /// A selected project is also expanded on the timeline.
    pub fn set_active_project(&mut self, project_id: Option<&str>) {
        debug!(
            "event=project_select module=selection project={}",
            project_id.unwrap_or("none")
        );
        if let Some(id) = project_id {
            self.expanded_projects.insert(id.to_string());
        }
        self.active_project = project_id.map(str::to_string);
    }

    /// Project card click: select the project and jump to the timeline.
    pub fn open_project_timeline(&mut self, project_id: &str) {
        self.set_active_project(Some(project_id));
        self.set_active_section(Section::Timeline);
    }

    pub fn is_expanded(&self, project_id: &str) -> bool {
        self.expanded_projects.contains(project_id)
    }

    /// Flips a timeline row between expanded and collapsed.
    pub fn toggle_project_expansion(&mut self, project_id: &str) -> bool {
        if self.expanded_projects.remove(project_id) {
            false
        } else {
            self.expanded_projects.insert(project_id.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, Section};

    #[test]
    fn starts_on_dashboard_without_project() {
        let state = AppState::new();
        assert_eq!(state.active_section(), Section::Dashboard);
        assert_eq!(state.active_project(), None);
    }

    #[test]
    fn section_ids_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_id(section.id()), Some(*section));
        }
        assert_eq!(Section::from_id("settings"), None);
    }

    #[test]
    fn selecting_a_project_expands_it() {
        let mut state = AppState::new();
        state.open_project_timeline("p2");

        assert_eq!(state.active_section(), Section::Timeline);
        assert_eq!(state.active_project(), Some("p2"));
        assert!(state.is_expanded("p2"));

        state.set_active_project(None);
        assert_eq!(state.active_project(), None);
        assert!(state.is_expanded("p2"));
    }

    #[test]
    fn expansion_toggles() {
        let mut state = AppState::new();
        assert!(state.toggle_project_expansion("p1"));
        assert!(state.is_expanded("p1"));
        assert!(!state.toggle_project_expansion("p1"));
        assert!(!state.is_expanded("p1"));
    }

    #[test]
    fn active_project_can_be_collapsed() {
        let mut state = AppState::new();
        state.set_active_project(Some("p2"));
        assert!(state.is_expanded("p2"));

        assert!(!state.toggle_project_expansion("p2"));
        assert_eq!(state.active_project(), Some("p2"));
        assert!(!state.is_expanded("p2"));
    }
}
