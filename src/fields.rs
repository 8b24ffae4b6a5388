//! Enumerations and field types for dashboard records.
//!
//! Every categorical field of a record is drawn from one of these closed sets.
//! Parsing matches the lowercase wire names exactly: a value outside the set,
//! including a differently cased one, is an [`DashboardError::InvalidEnumValue`].
//! Deserialization goes through the same parser, so a snapshot holding an
//! unknown status fails to load instead of being shown as-is.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::error::DashboardError;

/// Lifecycle of a client project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ProjectStatus {
    Active,
    Pending,
    Delivered,
    Archived,
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

/// Task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Kind of reusable creative or AI asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum AssetType {
    Prompt,
    Model,
    Workflow,
    BrandKit,
    Template,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::Pending,
        ProjectStatus::Delivered,
        ProjectStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Pending => "pending",
            ProjectStatus::Delivered => "delivered",
            ProjectStatus::Archived => "archived",
        }
    }

    pub fn classification(self) -> Classification {
        match self {
            ProjectStatus::Active => Classification::Positive,
            ProjectStatus::Pending => Classification::Attention,
            ProjectStatus::Delivered => Classification::Informational,
            ProjectStatus::Archived => Classification::Neutral,
        }
    }
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn classification(self) -> Classification {
        match self {
            TaskStatus::InProgress => Classification::Positive,
            TaskStatus::Todo => Classification::Attention,
            TaskStatus::Done => Classification::Informational,
        }
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// High and medium share the attention family; the emphasis in
    /// [`crate::classify::badge`] tells them apart.
    pub fn classification(self) -> Classification {
        match self {
            Priority::High | Priority::Medium => Classification::Attention,
            Priority::Low => Classification::Informational,
        }
    }
}

impl AssetType {
    pub const ALL: [AssetType; 5] = [
        AssetType::Prompt,
        AssetType::Model,
        AssetType::Workflow,
        AssetType::BrandKit,
        AssetType::Template,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Prompt => "prompt",
            AssetType::Model => "model",
            AssetType::Workflow => "workflow",
            AssetType::BrandKit => "brand-kit",
            AssetType::Template => "template",
        }
    }
}

/// Look up `raw` among the wire names of `all`.
fn parse_member<T: Copy>(
    field: &'static str,
    raw: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, DashboardError> {
    all.iter()
        .copied()
        .find(|v| name(*v) == raw)
        .ok_or_else(|| DashboardError::InvalidEnumValue {
            field,
            value: raw.to_string(),
        })
}

impl FromStr for ProjectStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member("project status", s, &ProjectStatus::ALL, ProjectStatus::as_str)
    }
}

impl FromStr for TaskStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member("task status", s, &TaskStatus::ALL, TaskStatus::as_str)
    }
}

impl FromStr for Priority {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member("priority", s, &Priority::ALL, Priority::as_str)
    }
}

impl FromStr for AssetType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member("asset type", s, &AssetType::ALL, AssetType::as_str)
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Priority {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for AssetType {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
