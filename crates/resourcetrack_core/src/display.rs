//! Display descriptors for badges, progress bars and amounts.
//!
//! # Responsibility
//! - Map `(badge kind, label)` pairs to a colour tone through one table.
//! - Map utilization, budget and progress figures to tones via configurable
//!   thresholds.
//! - Format currency and labels the way dashboard cards show them.
//!
//! # Invariants
//! - Unknown labels always map to [`Tone::Neutral`].

use crate::config::Thresholds;
use crate::model::budget::ExpenseCategory;
use crate::model::project::{MilestoneStatus, Priority, ProjectStatus};
use crate::model::risk::{Impact, RiskStatus, Severity};

/// Colour family a view renders a badge or bar with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Neutral,
    Blue,
    Green,
    Amber,
    Yellow,
    Orange,
    Purple,
    Red,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Red => "red",
        }
    }
}

/// Dimension a status badge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeKind {
    Project,
    Milestone,
    Risk,
    Severity,
    Priority,
}

const BADGE_TONES: &[(BadgeKind, &str, Tone)] = &[
    (BadgeKind::Project, "planning", Tone::Blue),
    (BadgeKind::Project, "in-progress", Tone::Green),
    (BadgeKind::Project, "on-hold", Tone::Amber),
    (BadgeKind::Project, "completed", Tone::Neutral),
    (BadgeKind::Milestone, "pending", Tone::Neutral),
    (BadgeKind::Milestone, "in-progress", Tone::Green),
    (BadgeKind::Milestone, "completed", Tone::Blue),
    (BadgeKind::Milestone, "delayed", Tone::Red),
    (BadgeKind::Risk, "identified", Tone::Yellow),
    (BadgeKind::Risk, "mitigated", Tone::Green),
    (BadgeKind::Risk, "resolved", Tone::Blue),
    (BadgeKind::Risk, "escalated", Tone::Red),
    (BadgeKind::Severity, "low", Tone::Blue),
    (BadgeKind::Severity, "medium", Tone::Yellow),
    (BadgeKind::Severity, "high", Tone::Orange),
    (BadgeKind::Severity, "critical", Tone::Red),
    (BadgeKind::Priority, "low", Tone::Neutral),
    (BadgeKind::Priority, "medium", Tone::Blue),
    (BadgeKind::Priority, "high", Tone::Purple),
    (BadgeKind::Priority, "critical", Tone::Red),
];

/// Tone of a badge showing `label` in dimension `kind`.
pub fn badge_tone(kind: BadgeKind, label: &str) -> Tone {
    BADGE_TONES
        .iter()
        .find(|(entry_kind, entry_label, _)| *entry_kind == kind && *entry_label == label)
        .map(|(_, _, tone)| *tone)
        .unwrap_or(Tone::Neutral)
}

/// A labelled, toned status badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(kind: BadgeKind, label: &str) -> Self {
        Self {
            text: capitalize(label),
            tone: badge_tone(kind, label),
        }
    }
}

impl From<&ProjectStatus> for Badge {
    fn from(value: &ProjectStatus) -> Self {
        Self::new(BadgeKind::Project, value.as_str())
    }
}

impl From<&MilestoneStatus> for Badge {
    fn from(value: &MilestoneStatus) -> Self {
        Self::new(BadgeKind::Milestone, value.as_str())
    }
}

impl From<&RiskStatus> for Badge {
    fn from(value: &RiskStatus) -> Self {
        Self::new(BadgeKind::Risk, value.as_str())
    }
}

impl From<&Severity> for Badge {
    fn from(value: &Severity) -> Self {
        Self::new(BadgeKind::Severity, value.as_str())
    }
}

/// Risk impact shares the severity palette.
impl From<&Impact> for Badge {
    fn from(value: &Impact) -> Self {
        Self::new(BadgeKind::Severity, value.as_str())
    }
}

impl From<&Priority> for Badge {
    fn from(value: &Priority) -> Self {
        Self::new(BadgeKind::Priority, value.as_str())
    }
}

/// Bar tone for a member's utilization; above the warning cut-off is hot.
pub fn utilization_tone(utilization: f64, thresholds: &Thresholds) -> Tone {
    if utilization > thresholds.utilization_critical {
        Tone::Red
    } else if utilization > thresholds.utilization_warning {
        Tone::Yellow
    } else if utilization > thresholds.utilization_low {
        Tone::Green
    } else {
        Tone::Blue
    }
}

/// Bar tone for the share of a budget already spent.
pub fn budget_tone(utilization_percent: f64, thresholds: &Thresholds) -> Tone {
    if utilization_percent > thresholds.budget_critical {
        Tone::Red
    } else if utilization_percent > thresholds.budget_warning {
        Tone::Yellow
    } else {
        Tone::Green
    }
}

/// Progress-bar tone on the project status board.
pub fn progress_tone(status: &ProjectStatus, progress: f64) -> Tone {
    match status {
        ProjectStatus::OnHold => Tone::Yellow,
        ProjectStatus::Completed => Tone::Green,
        _ if progress < 25.0 => Tone::Blue,
        _ if progress < 75.0 => Tone::Purple,
        _ => Tone::Green,
    }
}

pub fn category_tone(category: &ExpenseCategory) -> Tone {
    match category {
        ExpenseCategory::Labor => Tone::Blue,
        ExpenseCategory::Hardware => Tone::Purple,
        ExpenseCategory::Software => Tone::Green,
        ExpenseCategory::Vendor => Tone::Yellow,
        ExpenseCategory::Other | ExpenseCategory::Unrecognized(_) => Tone::Neutral,
    }
}

/// Upper-cases the first character, e.g. `in-progress` → `In-progress`.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whole-dollar US currency, e.g. `$450,000` or `-$1,500`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}")
}

/// Compact thousands, e.g. `$220k`.
pub fn format_thousands(amount: f64) -> String {
    format!("${:.0}k", amount / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::{
        badge_tone, capitalize, category_tone, format_currency, format_thousands, progress_tone,
        utilization_tone, Badge, BadgeKind, Tone,
    };
    use crate::config::Thresholds;
    use crate::model::budget::ExpenseCategory;
    use crate::model::project::ProjectStatus;
    use crate::model::risk::Severity;

    #[test]
    fn same_label_differs_per_dimension() {
        assert_eq!(badge_tone(BadgeKind::Project, "completed"), Tone::Neutral);
        assert_eq!(badge_tone(BadgeKind::Milestone, "completed"), Tone::Blue);
        assert_eq!(badge_tone(BadgeKind::Severity, "low"), Tone::Blue);
        assert_eq!(badge_tone(BadgeKind::Priority, "low"), Tone::Neutral);
    }

    #[test]
    fn unknown_labels_are_neutral() {
        assert_eq!(badge_tone(BadgeKind::Risk, "archived"), Tone::Neutral);
        let badge = Badge::from(&Severity::from_label("sev-2"));
        assert_eq!(badge.tone, Tone::Neutral);
        assert_eq!(badge.text, "Sev-2");
        assert_eq!(category_tone(&ExpenseCategory::from_label("travel")), Tone::Neutral);
    }

    #[test]
    fn utilization_bands_follow_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(utilization_tone(95.0, &thresholds), Tone::Red);
        assert_eq!(utilization_tone(90.0, &thresholds), Tone::Yellow);
        assert_eq!(utilization_tone(75.0, &thresholds), Tone::Yellow);
        assert_eq!(utilization_tone(50.0, &thresholds), Tone::Green);
        assert_eq!(utilization_tone(30.0, &thresholds), Tone::Blue);
    }

    #[test]
    fn progress_tone_prefers_status() {
        assert_eq!(progress_tone(&ProjectStatus::OnHold, 90.0), Tone::Yellow);
        assert_eq!(progress_tone(&ProjectStatus::InProgress, 10.0), Tone::Blue);
        assert_eq!(progress_tone(&ProjectStatus::InProgress, 50.0), Tone::Purple);
        assert_eq!(progress_tone(&ProjectStatus::Planning, 80.0), Tone::Green);
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(450_000.0), "$450,000");
        assert_eq!(format_currency(-1_500.4), "-$1,500");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1_230_000.0), "$1,230,000");
        assert_eq!(format_thousands(220_000.0), "$220k");
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("in-progress"), "In-progress");
    }
}
