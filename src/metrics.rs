//! Dashboard-wide aggregates.
//!
//! Everything here is a pure function of its inputs. Time-sensitive metrics
//! take the current instant as an argument so they can be pinned in tests and
//! overridden from the command line.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use log::debug;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::fields::ProjectStatus;
use crate::project::Project;
use crate::service::Service;

/// How far ahead a deadline still counts as upcoming.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Headline numbers for the dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub active_projects: usize,
    pub total_revenue: u64,
    /// Rounded mean progress. `None` when there are no projects.
    pub completion_rate: Option<u32>,
    pub upcoming_deadlines: usize,
}

/// Delivery totals across all service lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceTotals {
    pub delivered: u64,
    pub active: u64,
}

/// Compute every headline metric in one pass over `projects`.
pub fn compute_stats(projects: &[Project], now: DateTime<Utc>) -> Stats {
    let stats = Stats {
        active_projects: active_project_count(projects),
        total_revenue: total_revenue(projects),
        completion_rate: completion_rate(projects).ok(),
        upcoming_deadlines: upcoming_deadlines(projects, now),
    };
    debug!(
        "event=stats_computed projects={} active={} revenue={} completion={:?} upcoming={}",
        projects.len(),
        stats.active_projects,
        stats.total_revenue,
        stats.completion_rate,
        stats.upcoming_deadlines
    );
    stats
}

pub fn active_project_count(projects: &[Project]) -> usize {
    projects.iter().filter(|p| p.status == ProjectStatus::Active).count()
}

/// Sum of `value` over every project, whatever its status. Saturates at
/// `u64::MAX`; [`crate::dataset::Dataset::validate`] rejects snapshots that
/// would get there.
pub fn total_revenue(projects: &[Project]) -> u64 {
    projects.iter().fold(0u64, |acc, p| acc.saturating_add(p.value))
}

/// Mean progress rounded half-up to a whole percent.
///
/// # Errors
/// [`DashboardError::EmptyCollectionMetric`] when `projects` is empty.
pub fn completion_rate(projects: &[Project]) -> Result<u32> {
    if projects.is_empty() {
        return Err(DashboardError::EmptyCollectionMetric { metric: "completion rate" });
    }
    let n = projects.len() as u64;
    let sum: u64 = projects.iter().map(|p| u64::from(p.progress)).sum();
    // floor(sum / n + 1/2) without leaving integers.
    Ok(((2 * sum + n) / (2 * n)) as u32)
}

/// Projects whose deadline, taken at midnight UTC, falls strictly before
/// `now` plus the upcoming window. Overdue and closed projects count too.
pub fn upcoming_deadlines(projects: &[Project], now: DateTime<Utc>) -> usize {
    let horizon = now + Duration::days(UPCOMING_WINDOW_DAYS);
    projects
        .iter()
        .filter(|p| p.deadline.and_time(NaiveTime::MIN).and_utc() < horizon)
        .count()
}

pub fn service_totals(services: &[Service]) -> ServiceTotals {
    services.iter().fold(ServiceTotals::default(), |acc, s| ServiceTotals {
        delivered: acc.delivered.saturating_add(u64::from(s.count)),
        active: acc.active.saturating_add(u64::from(s.active)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use proptest::prelude::*;

    fn project(id: &str, status: ProjectStatus, progress: u8, deadline: &str, value: u64) -> Project {
        Project {
            id: id.into(),
            title: format!("Project {id}"),
            client: "TechCorp".into(),
            service: "AI Engine Development".into(),
            status,
            progress,
            deadline: NaiveDate::parse_from_str(deadline, "%Y-%m-%d").unwrap(),
            value,
        }
    }

    fn seed() -> Vec<Project> {
        vec![
            project("1", ProjectStatus::Active, 65, "2025-12-01", 15000),
            project("2", ProjectStatus::Active, 40, "2025-11-25", 8500),
            project("3", ProjectStatus::Pending, 15, "2025-12-10", 22000),
        ]
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_seed_scenario() {
        let stats = compute_stats(&seed(), at(2025, 11, 15, 9));
        assert_eq!(stats.active_projects, 2);
        assert_eq!(stats.total_revenue, 45500);
        assert_eq!(stats.completion_rate, Some(40));
        assert_eq!(stats.upcoming_deadlines, 0);
    }

    #[test]
    fn test_empty_collection_has_no_completion_rate() {
        let err = completion_rate(&[]).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyCollectionMetric { .. }));

        let stats = compute_stats(&[], at(2025, 11, 15, 0));
        assert_eq!(stats.completion_rate, None);
        assert_eq!(stats.active_projects, 0);
        assert_eq!(stats.total_revenue, 0);
        assert_eq!(stats.upcoming_deadlines, 0);
    }

    #[test]
    fn test_completion_rate_rounds_half_up() {
        let ps = vec![
            project("1", ProjectStatus::Active, 1, "2025-01-01", 0),
            project("2", ProjectStatus::Active, 2, "2025-01-01", 0),
        ];
        assert_eq!(completion_rate(&ps).unwrap(), 2);

        let ps = vec![
            project("1", ProjectStatus::Active, 0, "2025-01-01", 0),
            project("2", ProjectStatus::Active, 0, "2025-01-01", 0),
            project("3", ProjectStatus::Active, 1, "2025-01-01", 0),
        ];
        assert_eq!(completion_rate(&ps).unwrap(), 0);
    }

    #[test]
    fn test_upcoming_window_is_strict() {
        let ps = vec![project("1", ProjectStatus::Active, 0, "2025-11-22", 0)];
        // Horizon lands exactly on the deadline's midnight: not upcoming.
        assert_eq!(upcoming_deadlines(&ps, at(2025, 11, 15, 0)), 0);
        assert_eq!(upcoming_deadlines(&ps, at(2025, 11, 15, 1)), 1);
    }

    #[test]
    fn test_upcoming_counts_past_and_closed_projects() {
        let ps = vec![
            project("1", ProjectStatus::Delivered, 100, "2025-10-01", 0),
            project("2", ProjectStatus::Archived, 100, "2025-11-18", 0),
            project("3", ProjectStatus::Active, 10, "2026-01-01", 0),
        ];
        assert_eq!(upcoming_deadlines(&ps, at(2025, 11, 15, 12)), 2);
    }

    #[test]
    fn test_total_revenue_saturates_instead_of_overflowing() {
        let ps = vec![
            project("1", ProjectStatus::Active, 0, "2025-12-01", 10_000_000_000_000_000_000),
            project("2", ProjectStatus::Active, 0, "2025-12-01", 10_000_000_000_000_000_000),
        ];
        assert_eq!(total_revenue(&ps), u64::MAX);
        assert_eq!(compute_stats(&ps, at(2025, 11, 15, 0)).total_revenue, u64::MAX);
    }

    #[test]
    fn test_service_totals() {
        let services = vec![
            Service { name: "Custom AI Engines".into(), count: 3, active: 2 },
            Service { name: "Prompt Engineering".into(), count: 12, active: 5 },
        ];
        assert_eq!(service_totals(&services), ServiceTotals { delivered: 15, active: 7 });
        assert_eq!(service_totals(&[]), ServiceTotals::default());
    }

    fn arb_project() -> impl Strategy<Value = Project> {
        (
            "[a-z0-9]{1,6}",
            prop::sample::select(ProjectStatus::ALL.to_vec()),
            0u8..=100,
            0u32..3650,
            0u64..1_000_000,
        )
            .prop_map(|(id, status, progress, offset, value)| {
                let deadline = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset as i64);
                Project {
                    id,
                    title: "t".into(),
                    client: "c".into(),
                    service: "s".into(),
                    status,
                    progress,
                    deadline,
                    value,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_total_revenue_is_additive(
            ps in prop::collection::vec(arb_project(), 0..20),
            qs in prop::collection::vec(arb_project(), 0..20),
        ) {
            let now = at(2024, 6, 1, 0);
            let joined: Vec<Project> = ps.iter().chain(qs.iter()).cloned().collect();
            prop_assert_eq!(
                compute_stats(&joined, now).total_revenue,
                compute_stats(&ps, now).total_revenue + compute_stats(&qs, now).total_revenue
            );
        }

        #[test]
        fn prop_constant_progress_is_its_own_rate(p in 0u8..=100, n in 1usize..30) {
            let ps: Vec<Project> = (0..n)
                .map(|i| project(&i.to_string(), ProjectStatus::Pending, p, "2025-01-01", 0))
                .collect();
            prop_assert_eq!(completion_rate(&ps).unwrap(), u32::from(p));
        }

        #[test]
        fn prop_completion_rate_is_rounded_mean(ps in prop::collection::vec(arb_project(), 1..30)) {
            let mean = ps.iter().map(|p| f64::from(p.progress)).sum::<f64>() / ps.len() as f64;
            prop_assert_eq!(completion_rate(&ps).unwrap(), (mean + 0.5).floor() as u32);
        }

        #[test]
        fn prop_counts_never_exceed_collection(ps in prop::collection::vec(arb_project(), 0..30)) {
            let stats = compute_stats(&ps, at(2024, 6, 1, 0));
            prop_assert!(stats.active_projects <= ps.len());
            prop_assert!(stats.upcoming_deadlines <= ps.len());
        }
    }
}
