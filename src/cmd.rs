//! Command implementations for the CLI interface.
//!
//! Each subcommand derives one view through the core and prints it as a
//! plain-text table. Rendering is split into `render_*` functions that return
//! the text, so the layout can be checked without capturing stdout.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use log::info;

use crate::asset::Asset;
use crate::classify::{badge, Emphasis, FieldKind};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::fields::AssetType;
use crate::filters::{self, ClientSummary, NamedClientSummary};
use crate::format::*;
use crate::metrics::{compute_stats, ServiceTotals, Stats};
use crate::nav::{Navigator, Section, View};
use crate::project::Project;
use crate::service::Service;
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard.
    Ui,

    /// Show the headline metrics.
    Stats {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List projects.
    Projects {
        /// Only projects with status active.
        #[arg(long)]
        active: bool,
    },

    /// List tasks. Done tasks are hidden unless --all is given.
    Tasks {
        /// Include done tasks.
        #[arg(long)]
        all: bool,
        /// Only tasks referencing this project title or id.
        #[arg(long)]
        project: Option<String>,
    },

    /// Summarise clients, or a single client with --name.
    Clients {
        /// Exact client name.
        #[arg(long)]
        name: Option<String>,
    },

    /// List the asset library.
    Assets {
        /// Asset type: prompt | model | workflow | brand-kit | template.
        #[arg(long = "type", value_enum)]
        kind: Option<AssetType>,
        /// Only assets carrying this tag.
        #[arg(long)]
        tag: Option<String>,
    },

    /// List service offerings.
    Services,

    /// Print one dashboard section: dashboard | projects | clients | assets | services.
    View {
        #[arg(value_enum)]
        view: View,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Classify a status or priority value.
    Classify {
        #[arg(value_enum)]
        kind: FieldKind,
        value: String,
    },

    /// Print the built-in sample dataset as a JSON snapshot.
    Sample,

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(data: Dataset, now: DateTime<Utc>) -> Result<()> {
    run_tui(data, now)
}

pub fn cmd_stats(data: &Dataset, now: DateTime<Utc>, json: bool) -> Result<()> {
    let stats = compute_stats(&data.projects, now);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_stats(&stats));
    }
    Ok(())
}

pub fn cmd_projects(data: &Dataset, now: DateTime<Utc>, active: bool) {
    let projects: Vec<&Project> = if active {
        filters::active_projects(&data.projects)
    } else {
        filters::all_projects(&data.projects).iter().collect()
    };
    print!("{}", render_projects(&projects, now.date_naive()));
}

pub fn cmd_tasks(data: &Dataset, now: DateTime<Utc>, all: bool, project: Option<String>) {
    let mut tasks: Vec<&Task> = if all {
        data.tasks.iter().collect()
    } else {
        filters::open_tasks(&data.tasks)
    };
    if let Some(reference) = project {
        // A known project matches tasks naming it by title or id; an unknown
        // name still matches dangling references verbatim.
        match data.projects.iter().find(|p| p.is_referenced_by(&reference)) {
            Some(p) => {
                let linked = filters::tasks_for_project(&data.tasks, p);
                tasks.retain(|t| linked.iter().any(|l| std::ptr::eq(*l, *t)));
            }
            None => tasks.retain(|t| t.project.as_deref() == Some(reference.as_str())),
        }
    }
    print!("{}", render_tasks(&tasks, now.date_naive()));
}

pub fn cmd_clients(data: &Dataset, name: Option<String>) {
    let summaries = match name {
        Some(client) => {
            let summary = filters::client_summary(&data.projects, &client);
            vec![NamedClientSummary { client, summary }]
        }
        None => filters::client_summaries(&data.projects),
    };
    print!("{}", render_clients(&summaries));
}

pub fn cmd_assets(data: &Dataset, kind: Option<AssetType>, tag: Option<String>) {
    let assets: Vec<&Asset> = filters::all_assets(&data.assets)
        .iter()
        .filter(|a| kind.map_or(true, |k| a.kind == k))
        .filter(|a| tag.as_deref().map_or(true, |t| a.has_tag(t)))
        .collect();
    print!("{}", render_assets(&assets));
}

pub fn cmd_services(data: &Dataset) {
    print!("{}", render_services(filters::all_services(&data.services)));
}

/// Print whichever section a fresh navigator lands on after selecting `view`.
pub fn cmd_view(data: &Dataset, now: DateTime<Utc>, view: View, json: bool) -> Result<()> {
    let mut nav = Navigator::new();
    nav.select_view(view);
    let section = nav.section(data, now);
    if json {
        println!("{}", serde_json::to_string_pretty(&section)?);
    } else {
        print!("{}", render_section(&section, now.date_naive()));
    }
    Ok(())
}

pub fn cmd_classify(kind: FieldKind, value: &str) {
    println!("{}", describe_badge(kind, value));
}

pub fn cmd_sample() -> Result<()> {
    println!("{}", Dataset::sample().to_json_pretty()?);
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Resolve the dataset: an explicit snapshot, the default snapshot if it
/// exists, or the bundled sample.
pub fn load_dataset(explicit: Option<&Path>) -> Result<Dataset> {
    if let Some(path) = explicit {
        return Dataset::load(path);
    }
    let default_path = crate::dataset::default_snapshot_path();
    if default_path.exists() {
        Dataset::load(&default_path)
    } else {
        info!("event=sample_data reason=no_snapshot path={}", default_path.display());
        Ok(Dataset::sample())
    }
}

pub fn describe_badge(kind: FieldKind, value: &str) -> String {
    let b = badge(kind, value);
    match b.emphasis {
        Emphasis::Strong => format!("{} (strong)", b.classification),
        Emphasis::Light => format!("{} (light)", b.classification),
        Emphasis::Normal => b.classification.to_string(),
    }
}

pub fn render_stats(stats: &Stats) -> String {
    let rate = stats
        .completion_rate
        .map(|r| format!("{r}%"))
        .unwrap_or_else(|| "n/a".into());
    let mut out = String::new();
    let _ = writeln!(out, "{:<18} {}", "Active Projects", stats.active_projects);
    let _ = writeln!(out, "{:<18} {}", "Total Pipeline", format_thousands(stats.total_revenue, 0));
    let _ = writeln!(out, "{:<18} {}", "Completion Rate", rate);
    let _ = writeln!(out, "{:<18} {}", "Due This Week", stats.upcoming_deadlines);
    out
}

pub fn render_projects(projects: &[&Project], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<10} {:<14} {:<8} {:<9} {:<16} {}",
        "ID", "Status", "Progress", "Due", "Value", "Client", "Title"
    );
    for p in projects {
        let _ = writeln!(
            out,
            "{:<5} {:<10} {:<14} {:<8} {:<9} {:<16} {}",
            truncate(&p.id, 5),
            p.status,
            format!("{} {:>3}%", progress_bar(p.progress, 8), p.progress),
            format_due_relative(Some(p.deadline), today),
            format_thousands(p.value, 1),
            truncate(&p.client, 16),
            p.title
        );
    }
    out
}

pub fn render_tasks(tasks: &[&Task], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<8} {:<12} {:<10} {:<18} {}",
        "ID", "Pri", "Status", "Due", "Project", "Title"
    );
    for t in tasks {
        let project = t.project.clone().unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:<5} {:<8} {:<12} {:<10} {:<18} {}",
            truncate(&t.id, 5),
            t.priority,
            t.status,
            format_due_relative(t.due_date, today),
            truncate(&project, 18),
            t.title
        );
    }
    out
}

pub fn render_clients(summaries: &[NamedClientSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<9} {}", "Client", "Projects", "Total Value");
    for NamedClientSummary { client, summary: ClientSummary { project_count, total_value } } in summaries {
        let _ = writeln!(
            out,
            "{:<20} {:<9} {}",
            truncate(client, 20),
            project_count,
            format_thousands(*total_value, 1)
        );
    }
    out
}

pub fn render_assets(assets: &[&Asset]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<5} {:<10} {:<12} {:<40} {}", "ID", "Type", "Last Used", "Name", "Tags");
    for a in assets {
        let last_used = a.last_used.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:<5} {:<10} {:<12} {:<40} {}",
            truncate(&a.id, 5),
            format_asset_type(a.kind),
            last_used,
            truncate(&a.name, 40),
            a.tags.join(", ")
        );
    }
    out
}

pub fn render_services(services: &[Service]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24} {:>9} {:>7}", "Service", "Delivered", "Active");
    for s in services {
        let _ = writeln!(out, "{:<24} {:>9} {:>7}", truncate(&s.name, 24), s.count, s.active);
    }
    out
}

fn render_service_totals(totals: &ServiceTotals) -> String {
    format!("{:<24} {:>9} {:>7}\n", "Total", totals.delivered, totals.active)
}

pub fn render_section(section: &Section<'_>, today: NaiveDate) -> String {
    match section {
        Section::Dashboard { stats, active_projects, open_tasks, services, service_totals } => {
            let mut out = String::new();
            out.push_str(&render_stats(stats));
            out.push_str("\nActive Projects\n");
            out.push_str(&render_projects(active_projects, today));
            out.push_str("\nToday's Focus\n");
            out.push_str(&render_tasks(open_tasks, today));
            out.push_str("\nService Delivery Overview\n");
            out.push_str(&render_services(services));
            out.push_str(&render_service_totals(service_totals));
            out
        }
        Section::Projects { projects } => {
            render_projects(&projects.iter().collect::<Vec<_>>(), today)
        }
        Section::Clients { clients } => render_clients(clients),
        Section::Assets { assets } => render_assets(&assets.iter().collect::<Vec<_>>()),
        Section::Services { services } => render_services(services),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
    }

    #[test]
    fn test_render_stats_for_sample() {
        let now = Utc.with_ymd_and_hms(2025, 11, 15, 9, 0, 0).unwrap();
        let text = render_stats(&compute_stats(&Dataset::sample().projects, now));
        assert!(text.contains("Active Projects    2"));
        assert!(text.contains("Total Pipeline     $46k"));
        assert!(text.contains("Completion Rate    40%"));
        assert!(text.contains("Due This Week      0"));
    }

    #[test]
    fn test_render_stats_without_projects() {
        let now = Utc.with_ymd_and_hms(2025, 11, 15, 9, 0, 0).unwrap();
        let text = render_stats(&compute_stats(&[], now));
        assert!(text.contains("Completion Rate    n/a"));
    }

    #[test]
    fn test_render_projects_keeps_input_order() {
        let data = Dataset::sample();
        let projects: Vec<&Project> = data.projects.iter().collect();
        let text = render_projects(&projects, today());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("Custom GPT Engine"));
        assert!(lines[2].contains("in 10d"));
        assert!(lines[3].contains("$22.0k"));
    }

    #[test]
    fn test_render_tasks_shows_raw_project_reference() {
        let data = Dataset::sample();
        let tasks = filters::open_tasks(&data.tasks);
        let text = render_tasks(&tasks, today());
        assert!(text.contains("tomorrow"));
        assert!(text.contains("Custom GPT Engine"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_render_clients_and_assets() {
        let data = Dataset::sample();
        let text = render_clients(&filters::client_summaries(&data.projects));
        assert!(text.contains("StartupXYZ"));
        assert!(text.contains("$8.5k"));

        let assets: Vec<&Asset> = data.assets.iter().collect();
        let text = render_assets(&assets);
        assert!(text.contains("Brand Kit"));
        assert!(text.contains("saas, branding"));
    }

    #[test]
    fn test_render_dashboard_section() {
        let data = Dataset::sample();
        let now = Utc.with_ymd_and_hms(2025, 11, 15, 9, 0, 0).unwrap();
        let text = render_section(&Navigator::new().section(&data, now), today());
        assert!(text.contains("Today's Focus"));
        assert!(text.contains("Service Delivery Overview"));
        assert!(text.contains("Total                           33      13"));
        assert!(!text.contains("Workflow Automation"));
    }

    #[test]
    fn test_describe_badge() {
        assert_eq!(describe_badge(FieldKind::Priority, "high"), "attention (strong)");
        assert_eq!(describe_badge(FieldKind::Priority, "medium"), "attention (light)");
        assert_eq!(describe_badge(FieldKind::Status, "done"), "informational");
        assert_eq!(describe_badge(FieldKind::Status, "paused"), "neutral");
    }

    #[test]
    fn test_load_dataset_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, r#"{"projects":[]}"#).unwrap();
        let data = load_dataset(Some(&path)).unwrap();
        assert_eq!(data, Dataset::default());
    }
}
