//! Task record.
//!
//! Tasks are the operator's to-do items. A task may mention a project, but the
//! mention is only text: it is never resolved on load and a name that matches
//! no project is still a valid task.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, TaskStatus};

/// A unit of work on the operator's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Weak reference to a project by title or id. `None` means unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Done
    }
}
