//! Navigation across dashboard sections.
//!
//! Exactly one [`View`] is active at a time. [`Navigator::select_view`] moves
//! to any view from any view with no guards, and the active view only decides
//! which derived [`Section`] is exposed; it never touches the records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use log::debug;
use serde::Serialize;

use crate::asset::Asset;
use crate::dataset::Dataset;
use crate::error::DashboardError;
use crate::filters::{self, NamedClientSummary};
use crate::metrics::{self, ServiceTotals, Stats};
use crate::project::Project;
use crate::service::Service;
use crate::task::Task;

/// The five dashboard sections, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Projects,
    Clients,
    Assets,
    Services,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Projects,
        View::Clients,
        View::Assets,
        View::Services,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Projects => "projects",
            View::Clients => "clients",
            View::Assets => "assets",
            View::Services => "services",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Projects => "Projects",
            View::Clients => "Clients",
            View::Assets => "Assets",
            View::Services => "Services",
        }
    }

    /// Position in tab order.
    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Projects => 1,
            View::Clients => 2,
            View::Assets => 3,
            View::Services => 4,
        }
    }

    pub fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn previous(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

impl FromStr for View {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| DashboardError::InvalidEnumValue { field: "view", value: s.to_string() })
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Holds the single mutable selector of a dashboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: View,
}

impl Navigator {
    /// A fresh session, always on the dashboard.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn select_view(&mut self, target: View) {
        if self.current != target {
            debug!("event=view_selected from={} to={}", self.current, target);
        }
        self.current = target;
    }

    /// Select a view by its lowercase name, leaving the state alone on error.
    pub fn select_view_named(&mut self, name: &str) -> Result<View, DashboardError> {
        let target = name.parse()?;
        self.select_view(target);
        Ok(target)
    }

    pub fn select_next(&mut self) {
        self.select_view(self.current.next());
    }

    pub fn select_previous(&mut self) {
        self.select_view(self.current.previous());
    }

    /// Derive the payload of the active view.
    pub fn section<'a>(&self, data: &'a Dataset, now: DateTime<Utc>) -> Section<'a> {
        Section::derive(self.current, data, now)
    }
}

/// Derived content of one dashboard section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Section<'a> {
    Dashboard {
        stats: Stats,
        active_projects: Vec<&'a Project>,
        open_tasks: Vec<&'a Task>,
        services: &'a [Service],
        service_totals: ServiceTotals,
    },
    Projects { projects: &'a [Project] },
    Clients { clients: Vec<NamedClientSummary> },
    Assets { assets: &'a [Asset] },
    Services { services: &'a [Service] },
}

impl<'a> Section<'a> {
    pub fn derive(view: View, data: &'a Dataset, now: DateTime<Utc>) -> Self {
        match view {
            View::Dashboard => Section::Dashboard {
                stats: metrics::compute_stats(&data.projects, now),
                active_projects: filters::active_projects(&data.projects),
                open_tasks: filters::open_tasks(&data.tasks),
                services: filters::all_services(&data.services),
                service_totals: metrics::service_totals(&data.services),
            },
            View::Projects => Section::Projects { projects: filters::all_projects(&data.projects) },
            View::Clients => Section::Clients { clients: filters::client_summaries(&data.projects) },
            View::Assets => Section::Assets { assets: filters::all_assets(&data.assets) },
            View::Services => Section::Services { services: filters::all_services(&data.services) },
        }
    }

    pub fn view(&self) -> View {
        match self {
            Section::Dashboard { .. } => View::Dashboard,
            Section::Projects { .. } => View::Projects,
            Section::Clients { .. } => View::Clients,
            Section::Assets { .. } => View::Assets,
            Section::Services { .. } => View::Services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_starts_on_dashboard() {
        assert_eq!(Navigator::new().current(), View::Dashboard);
        assert_eq!(View::default(), View::Dashboard);
    }

    #[test]
    fn test_round_trip_through_assets() {
        let mut nav = Navigator::new();
        nav.select_view_named("assets").unwrap();
        assert_eq!(nav.current(), View::Assets);
        nav.select_view_named("dashboard").unwrap();
        assert_eq!(nav, Navigator::new());
    }

    #[test]
    fn test_every_view_reachable_from_every_view() {
        for from in View::ALL {
            for to in View::ALL {
                let mut nav = Navigator::new();
                nav.select_view(from);
                nav.select_view(to);
                assert_eq!(nav.current(), to);
            }
        }
    }

    #[test]
    fn test_unknown_name_keeps_state() {
        let mut nav = Navigator::new();
        nav.select_view(View::Clients);
        let err = nav.select_view_named("settings").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidEnumValue { field: "view", .. }));
        assert_eq!(nav.current(), View::Clients);
    }

    #[test]
    fn test_tab_order_cycles() {
        assert_eq!(View::Services.next(), View::Dashboard);
        assert_eq!(View::Dashboard.previous(), View::Services);
        let mut nav = Navigator::new();
        for _ in 0..View::ALL.len() {
            nav.select_next();
        }
        assert_eq!(nav.current(), View::Dashboard);
        nav.select_previous();
        assert_eq!(nav.current(), View::Services);
    }

    #[test]
    fn test_dashboard_section_content() {
        let data = Dataset::sample();
        match Navigator::new().section(&data, now()) {
            Section::Dashboard { stats, active_projects, open_tasks, services, service_totals } => {
                assert_eq!(stats.active_projects, 2);
                assert_eq!(stats.total_revenue, 45500);
                assert_eq!(stats.completion_rate, Some(40));
                assert_eq!(active_projects.len(), 2);
                assert_eq!(open_tasks.len(), 5);
                assert_eq!(services.len(), 5);
                assert_eq!(service_totals.delivered, 33);
                assert_eq!(service_totals.active, 13);
            }
            other => panic!("unexpected section {:?}", other.view()),
        }
    }

    #[test]
    fn test_section_follows_selected_view() {
        let data = Dataset::sample();
        let mut nav = Navigator::new();
        for view in View::ALL {
            nav.select_view(view);
            assert_eq!(nav.section(&data, now()).view(), view);
        }
        nav.select_view(View::Clients);
        match nav.section(&data, now()) {
            Section::Clients { clients } => assert_eq!(clients.len(), 3),
            other => panic!("unexpected section {:?}", other.view()),
        }
        // Selecting views never alters the records.
        assert_eq!(data, Dataset::sample());
    }

    #[test]
    fn test_section_serializes_with_view_tag() {
        let data = Dataset::sample();
        let json = serde_json::to_value(Section::derive(View::Services, &data, now())).unwrap();
        assert_eq!(json["view"], "services");
        assert_eq!(json["services"][1]["name"], "Prompt Engineering");
    }

    proptest! {
        #[test]
        fn prop_last_selection_wins(seq in prop::collection::vec(prop::sample::select(View::ALL.to_vec()), 0..40)) {
            let mut nav = Navigator::new();
            for v in &seq {
                nav.select_view(*v);
            }
            prop_assert_eq!(nav.current(), seq.last().copied().unwrap_or(View::Dashboard));
        }
    }
}
