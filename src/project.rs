//! Client project record.
//!
//! A project is one paid engagement: who it is for, which service line it
//! belongs to, where it stands and what it is worth. Clients have no record of
//! their own; they are the distinct values of [`Project::client`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::ProjectStatus;

/// Highest legal value of [`Project::progress`].
pub const MAX_PROGRESS: u8 = 100;

/// A client engagement tracked on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub client: String,
    pub service: String,
    pub status: ProjectStatus,
    /// Percent complete, `0..=100`.
    pub progress: u8,
    pub deadline: NaiveDate,
    /// Whole units of the dashboard's single currency.
    pub value: u64,
}

impl Project {
    /// Whether a task's weak project reference points at this project.
    ///
    /// Tasks may name a project by title or by id.
    pub fn is_referenced_by(&self, reference: &str) -> bool {
        self.title == reference || self.id == reference
    }
}
