//! Plain-text rendering of dashboard sections.

use std::fmt::Write;

use chrono::NaiveDate;
use resourcetrack_core::display::{
    budget_tone, capitalize, category_tone, format_currency, format_thousands, progress_tone,
    utilization_tone, Badge,
};
use resourcetrack_core::search::fields::{ExpenseSortField, MemberSortField, RiskSortField};
use resourcetrack_core::service::timeline::{build_chart, milestone_list, MilestoneFilter};
use resourcetrack_core::{
    AppState, DashboardService, DomainStore, FieldId, ProjectFilter, Section, TableState,
    Thresholds,
};

pub struct View<'a> {
    pub store: &'a DomainStore,
    pub state: &'a AppState,
    pub thresholds: &'a Thresholds,
    pub query: &'a str,
    pub sort: Option<&'a str>,
    pub as_of: NaiveDate,
}

impl View<'_> {
    fn service(&self) -> DashboardService<'_> {
        DashboardService::new(self.store)
    }

    /// One-paragraph headline shown above every section.
    pub fn digest(&self) -> String {
        let summary = self.service().summary();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "projects: {} active / {} total | team utilization: {:.0}% | alerts: {} urgent / {} total",
            summary.active_projects,
            summary.total_projects,
            summary.team_utilization,
            summary.urgent_warnings,
            summary.total_warnings
        );
        let _ = writeln!(
            out,
            "budget: {} of {} ({:.0}% utilized)\n",
            format_currency(summary.budget.actual_cost),
            format_currency(summary.budget.budget),
            summary.budget.utilization_percent()
        );
        out
    }

    pub fn section(&self) -> Result<String, String> {
        let mut out = String::new();
        let section = self.state.active_section();
        let _ = writeln!(out, "== {} ==", section.label());
        match section {
            Section::Dashboard => self.dashboard(&mut out),
            Section::Personnel => self.personnel(&mut out)?,
            Section::Timeline => self.timeline(&mut out),
            Section::Budget => self.budget(&mut out)?,
            Section::Risks => self.risks(&mut out)?,
            Section::Reports => self.reports(&mut out),
            Section::Analytics => self.analytics(&mut out),
        }
        Ok(out)
    }

    fn table_state<F: FieldId>(&self) -> Result<TableState<F>, String> {
        let mut state = TableState::<F>::default();
        if let Some(raw) = self.sort {
            if !state.toggle_by_id(raw) {
                return Err(format!("unknown sort field `{raw}`"));
            }
        }
        Ok(state)
    }

    fn dashboard(&self, out: &mut String) {
        let service = self.service();
        let _ = writeln!(out, "-- project status --");
        for card in service.project_board() {
            let _ = writeln!(
                out,
                "{:<36} {:<12} {:<9} {:>5.1}% [{}]",
                card.project.name,
                Badge::from(&card.project.status).text,
                Badge::from(&card.project.priority).text,
                card.progress,
                progress_tone(&card.project.status, card.progress).as_str()
            );
        }

        let _ = writeln!(out, "-- resource alerts --");
        for alert in service.alerts() {
            let _ = writeln!(
                out,
                "[{}] {}: {} ({})",
                Badge::from(&alert.warning.severity).text,
                capitalize(alert.warning.kind.as_str()),
                alert.warning.description,
                alert.project_names.join(", ")
            );
        }

        let _ = writeln!(out, "-- team utilization --");
        for row in service.team_utilization_rows() {
            let top: Vec<String> = row
                .top_assignments
                .iter()
                .map(|line| format!("{} {:.0}%", line.project_name, line.assignment.allocation))
                .collect();
            let _ = writeln!(
                out,
                "{:<20} {:>4.0}% [{}] {}",
                row.member.name,
                row.utilization,
                utilization_tone(row.utilization, self.thresholds).as_str(),
                top.join(", ")
            );
        }
    }

    fn personnel(&self, out: &mut String) -> Result<(), String> {
        let state = self.table_state::<MemberSortField>()?;
        let _ = writeln!(out, "sorted by {} {}", state.field().id(), state.direction().as_str());
        for member in self.service().personnel_table(&state, self.query) {
            let utilization = self.store.member_utilization(&member.id);
            let _ = writeln!(
                out,
                "{:<20} {:<24} {:>4.0}% [{}] avail {:>3.0}% | {}",
                member.name,
                member.role,
                utilization,
                utilization_tone(utilization, self.thresholds).as_str(),
                member.availability,
                member.skills.join(", ")
            );
        }
        Ok(())
    }

    fn timeline(&self, out: &mut String) {
        let Some(chart) = build_chart(self.store) else {
            let _ = writeln!(out, "no projects");
            return;
        };
        let _ = writeln!(
            out,
            "{} weeks from {}",
            chart.span.total_weeks(),
            chart.week_labels().first().map(String::as_str).unwrap_or("-")
        );
        for row in &chart.rows {
            let marker = if self.state.active_project() == Some(row.project.id.as_str()) {
                '*'
            } else {
                ' '
            };
            let _ = writeln!(
                out,
                "{marker} {:<36} week {:>2} +{:>2} ({:.0}%..{:.0}%)",
                row.project.name,
                row.offset_weeks,
                row.span_weeks,
                row.left * 100.0,
                (row.left + row.width) * 100.0
            );
            if !self.state.is_expanded(&row.project.id) {
                continue;
            }
            for entry in milestone_list(self.store, &row.project.id, MilestoneFilter::All) {
                let depends: Vec<&str> = entry
                    .dependencies
                    .iter()
                    .map(|milestone| milestone.name.as_str())
                    .collect();
                let _ = writeln!(
                    out,
                    "    {} {} {:<32} [{}]{}",
                    entry.milestone.due_date,
                    if entry.milestone.is_critical_path { "!" } else { " " },
                    entry.milestone.name,
                    Badge::from(&entry.milestone.status).text,
                    if depends.is_empty() {
                        String::new()
                    } else {
                        format!(" after {}", depends.join(", "))
                    }
                );
            }
        }
    }

    fn budget(&self, out: &mut String) -> Result<(), String> {
        let overview = self.service().budget_overview();
        for row in &overview.projects {
            let _ = writeln!(
                out,
                "{:<36} {:>6} / {:>6} ({:.0}%) [{}]",
                row.project.name,
                format_thousands(row.figures.actual_cost),
                format_thousands(row.figures.budget),
                row.figures.utilization_percent(),
                budget_tone(row.figures.utilization_percent(), self.thresholds).as_str()
            );
        }
        for share in &overview.categories {
            let _ = writeln!(
                out,
                "  {:<10} {:>12} {:>5.1}% [{}]",
                capitalize(share.category.as_str()),
                format_currency(share.amount),
                share.share_percent,
                category_tone(&share.category).as_str()
            );
        }

        let state = self.table_state::<ExpenseSortField>()?;
        let _ = writeln!(out, "-- expenses ({} {}) --", state.field().id(), state.direction().as_str());
        for expense in self.service().expense_table(&state, self.query) {
            let _ = writeln!(
                out,
                "{} {:<28} {:<40} {:<9} {:>10} {:>10} {:>10}",
                expense.date,
                self.store.project_name(&expense.project_id),
                expense.description,
                expense.category,
                format_currency(expense.budgeted_amount),
                format_currency(expense.actual_amount),
                format_currency(expense.variance())
            );
        }
        Ok(())
    }

    fn risks(&self, out: &mut String) -> Result<(), String> {
        let state = self.table_state::<RiskSortField>()?;
        let _ = writeln!(out, "sorted by {} {}", state.field().id(), state.direction().as_str());
        for risk in self.service().risk_table(&state, self.query) {
            let _ = writeln!(
                out,
                "{:<28} {:<10} impact={:<8} probability={:<6} [{}] {}\n    mitigation: {}",
                self.store.project_name(&risk.project_id),
                risk.category,
                risk.impact,
                risk.probability,
                Badge::from(&risk.status).text,
                risk.description,
                risk.mitigation_or_placeholder()
            );
        }
        Ok(())
    }

    fn reports(&self, out: &mut String) {
        for update in self.service().weekly_updates() {
            let _ = writeln!(out, "{} ({})", update.week, update.date);
            for (title, lines) in [
                ("highlights", &update.highlights),
                ("issues", &update.issues),
                ("recommendations", &update.recommendations),
            ] {
                let _ = writeln!(out, "  {title}:");
                for line in lines {
                    let _ = writeln!(out, "    - {line}");
                }
            }
        }
    }

    fn analytics(&self, out: &mut String) {
        let service = self.service();
        for member in self.store.members() {
            let performance = service.member_performance(&member.id);
            let _ = writeln!(
                out,
                "{:<20} projects {} completed {} on-time {:>3.0}% avg progress {:>3.0}%",
                member.name,
                performance.total_projects,
                performance.completed_projects,
                performance.on_time_percent,
                performance.average_completion
            );
            let rows =
                service.member_project_rows(&member.id, &ProjectFilter::default(), self.as_of);
            for row in rows {
                let efficiency = row
                    .timeline
                    .efficiency_percent
                    .map(|percent| format!("{percent:.0}%"))
                    .unwrap_or_else(|| "N/A".to_string());
                let _ = writeln!(
                    out,
                    "    {:<36} {:>5.1}% planned {:>3}d efficiency {}",
                    row.project.name,
                    row.progress,
                    row.timeline.planned_days,
                    efficiency
                );
            }
        }
    }
}
