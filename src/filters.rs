//! Per-section views over the record collections.
//!
//! Every filter keeps the input order. Nothing here sorts; any ordering a
//! renderer shows is the insertion order of the backing collection.

use serde::Serialize;

use crate::asset::Asset;
use crate::fields::ProjectStatus;
use crate::project::Project;
use crate::service::Service;
use crate::task::Task;

/// Project count and total value for one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub project_count: usize,
    pub total_value: u64,
}

/// A [`ClientSummary`] together with the client it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedClientSummary {
    pub client: String,
    #[serde(flatten)]
    pub summary: ClientSummary,
}

pub fn active_projects(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.status == ProjectStatus::Active).collect()
}

/// Tasks that are not done.
pub fn open_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_open()).collect()
}

/// Totals over the projects whose client is exactly `client_name`.
///
/// An unknown client yields an all-zero summary.
pub fn client_summary(projects: &[Project], client_name: &str) -> ClientSummary {
    projects
        .iter()
        .filter(|p| p.client == client_name)
        .fold(ClientSummary::default(), |acc, p| ClientSummary {
            project_count: acc.project_count + 1,
            total_value: acc.total_value.saturating_add(p.value),
        })
}

/// Distinct client names in order of first appearance.
pub fn clients(projects: &[Project]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for p in projects {
        if !seen.contains(&p.client.as_str()) {
            seen.push(&p.client);
        }
    }
    seen
}

/// One summary per distinct client, in first-appearance order.
pub fn client_summaries(projects: &[Project]) -> Vec<NamedClientSummary> {
    clients(projects)
        .into_iter()
        .map(|client| NamedClientSummary {
            client: client.to_string(),
            summary: client_summary(projects, client),
        })
        .collect()
}

/// Tasks whose project reference names `project` by title or id.
pub fn tasks_for_project<'a>(tasks: &'a [Task], project: &Project) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.project.as_deref().is_some_and(|r| project.is_referenced_by(r)))
        .collect()
}

/// Tasks whose project reference matches no known project.
pub fn dangling_tasks<'a>(tasks: &'a [Task], projects: &[Project]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| match t.project.as_deref() {
            Some(r) => !projects.iter().any(|p| p.is_referenced_by(r)),
            None => false,
        })
        .collect()
}

pub fn all_projects(projects: &[Project]) -> &[Project] {
    projects
}

pub fn all_assets(assets: &[Asset]) -> &[Asset] {
    assets
}

pub fn all_services(services: &[Service]) -> &[Service] {
    services
}
