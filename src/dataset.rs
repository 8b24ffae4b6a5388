//! In-memory bundle of dashboard records and the read-only snapshot loader.
//!
//! The dashboard never writes records. A [`Dataset`] is either read from a
//! JSON snapshot produced elsewhere or built from the bundled sample, then
//! validated once and handed to the derivation functions by reference.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::error::{DashboardError, Result};
use crate::fields::*;
use crate::filters::dangling_tasks;
use crate::project::{Project, MAX_PROGRESS};
use crate::service::Service;
use crate::task::Task;

/// Directory under `$HOME` holding the default snapshot.
pub const DATA_DIR_NAME: &str = ".command_center";
/// File name of the default snapshot inside [`DATA_DIR_NAME`].
pub const SNAPSHOT_FILE_NAME: &str = "dashboard.json";

/// The four record collections, in the order the source supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Dataset {
    /// Read and validate a JSON snapshot.
    ///
    /// # Errors
    /// I/O failures, malformed JSON, out-of-enumeration values and invariant
    /// violations are all reported; nothing is silently dropped.
    pub fn load(path: &Path) -> Result<Self> {
        let buf = fs::read_to_string(path)?;
        let data = Self::from_json(&buf)?;
        info!(
            "event=snapshot_loaded path={} projects={} tasks={} assets={} services={}",
            path.display(),
            data.projects.len(),
            data.tasks.len(),
            data.assets.len(),
            data.services.len()
        );
        Ok(data)
    }

    /// Parse and validate a snapshot held in memory.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Dataset = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Check the data-model invariants that the types alone cannot carry.
    pub fn validate(&self) -> Result<()> {
        let mut revenue: u64 = 0;
        for p in &self.projects {
            if p.progress > MAX_PROGRESS {
                return Err(invalid("project", &p.id, format!("progress {} exceeds 100", p.progress)));
            }
            revenue = revenue.checked_add(p.value).ok_or_else(|| {
                invalid("project", &p.id, format!("value {} overflows the revenue total", p.value))
            })?;
        }
        for s in &self.services {
            if s.active > s.count {
                return Err(invalid(
                    "service",
                    &s.name,
                    format!("active {} exceeds count {}", s.active, s.count),
                ));
            }
        }
        unique_ids("project", self.projects.iter().map(|p| p.id.as_str()))?;
        unique_ids("task", self.tasks.iter().map(|t| t.id.as_str()))?;
        unique_ids("asset", self.assets.iter().map(|a| a.id.as_str()))?;

        // Legal, but worth a trace when a renderer shows a name nobody owns.
        for t in dangling_tasks(&self.tasks, &self.projects) {
            warn!(
                "event=dangling_project_reference task={} reference={:?}",
                t.id, t.project
            );
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The records the dashboard ships with.
    pub fn sample() -> Self {
        Dataset {
            projects: vec![
                sample_project("1", "Custom GPT Engine", "TechCorp", "AI Engine Development",
                               ProjectStatus::Active, 65, (2025, 12, 1), 15000),
                sample_project("2", "Brand Persona Kit", "StartupXYZ", "Brand Identity AI",
                               ProjectStatus::Active, 40, (2025, 11, 25), 8500),
                sample_project("3", "Workflow Automation", "Enterprise Co", "Process Optimization",
                               ProjectStatus::Pending, 15, (2025, 12, 10), 22000),
            ],
            tasks: vec![
                sample_task("1", "Finalize prompt architecture for TechCorp", Some("Custom GPT Engine"),
                            Priority::High, TaskStatus::InProgress, Some((2025, 11, 16))),
                sample_task("2", "Create brand voice guidelines", Some("Brand Persona Kit"),
                            Priority::High, TaskStatus::Todo, Some((2025, 11, 17))),
                sample_task("3", "Test model fine-tuning results", None,
                            Priority::Medium, TaskStatus::InProgress, None),
                sample_task("4", "Schedule client demo", Some("Custom GPT Engine"),
                            Priority::Medium, TaskStatus::Todo, Some((2025, 11, 18))),
                sample_task("5", "Document workflow improvements", None,
                            Priority::Low, TaskStatus::Todo, None),
            ],
            assets: vec![
                sample_asset("1", "E-commerce Product Description Engine", AssetType::Prompt,
                             &["ecommerce", "copywriting"], Some((2025, 11, 14))),
                sample_asset("2", "Brand Voice Analyzer", AssetType::Model,
                             &["brand", "analysis"], Some((2025, 11, 13))),
                sample_asset("3", "Content Calendar Workflow", AssetType::Workflow,
                             &["content", "automation"], Some((2025, 11, 12))),
                sample_asset("4", "SaaS Startup Identity Kit", AssetType::BrandKit,
                             &["saas", "branding"], Some((2025, 11, 10))),
                sample_asset("5", "Prompt Engineering Template", AssetType::Template,
                             &["prompts", "framework"], None),
            ],
            services: vec![
                Service { name: "Custom AI Engines".into(), count: 3, active: 2 },
                Service { name: "Prompt Engineering".into(), count: 12, active: 5 },
                Service { name: "Creative Production".into(), count: 8, active: 3 },
                Service { name: "Workflow Audits".into(), count: 4, active: 1 },
                Service { name: "Brand Persona Kits".into(), count: 6, active: 2 },
            ],
        }
    }
}

/// Directory name of the TUI's rotating logs inside [`data_dir`].
pub const LOG_DIR_NAME: &str = "logs";

/// `$HOME/.command_center`, falling back to the working directory when
/// `HOME` is unset.
pub fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DATA_DIR_NAME)
}

pub fn default_snapshot_path() -> PathBuf {
    data_dir().join(SNAPSHOT_FILE_NAME)
}

pub fn default_log_dir() -> PathBuf {
    data_dir().join(LOG_DIR_NAME)
}

fn invalid(entity: &'static str, id: &str, reason: String) -> DashboardError {
    DashboardError::InvalidRecord { entity, id: id.to_string(), reason }
}

fn unique_ids<'a>(entity: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(invalid(entity, id, "duplicate id".into()));
        }
    }
    Ok(())
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn sample_project(
    id: &str,
    title: &str,
    client: &str,
    service: &str,
    status: ProjectStatus,
    progress: u8,
    deadline: (i32, u32, u32),
    value: u64,
) -> Project {
    Project {
        id: id.into(),
        title: title.into(),
        client: client.into(),
        service: service.into(),
        status,
        progress,
        deadline: ymd(deadline),
        value,
    }
}

fn sample_task(
    id: &str,
    title: &str,
    project: Option<&str>,
    priority: Priority,
    status: TaskStatus,
    due: Option<(i32, u32, u32)>,
) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        project: project.map(str::to_string),
        priority,
        status,
        due_date: due.map(ymd),
    }
}

fn sample_asset(
    id: &str,
    name: &str,
    kind: AssetType,
    tags: &[&str],
    last_used: Option<(i32, u32, u32)>,
) -> Asset {
    Asset {
        id: id.into(),
        name: name.into(),
        kind,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        last_used: last_used.map(ymd),
    }
}
