//! Presentation mapping from categorical field values to display categories.
//!
//! The core decides what a status or priority *means*; renderers decide how
//! that meaning is painted. Both sides meet on the four [`Classification`]
//! buckets. Values outside an enumeration classify as [`Classification::Neutral`]
//! rather than failing: this mapping only feeds cosmetics.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::fields::{Priority, ProjectStatus, TaskStatus};

/// Semantic bucket a renderer maps to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Positive,
    Attention,
    Informational,
    Neutral,
}

/// Which categorical field a raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldKind {
    /// Project or task status.
    Status,
    Priority,
}

/// Strength within a classification. Only priorities use anything but
/// `Normal`: high is strong attention, medium is light attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emphasis {
    Strong,
    Normal,
    Light,
}

/// Classification plus emphasis, everything a renderer needs for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Badge {
    pub classification: Classification,
    pub emphasis: Emphasis,
}

/// Classify a raw status or priority value.
///
/// Status values from both projects and tasks share one table:
/// `active`/`in-progress` are positive, `pending`/`todo` need attention,
/// `delivered`/`done` are informational and everything else is neutral.
pub fn classify(kind: FieldKind, value: &str) -> Classification {
    badge(kind, value).classification
}

/// Classify a raw value and attach its emphasis.
pub fn badge(kind: FieldKind, value: &str) -> Badge {
    match kind {
        FieldKind::Status => {
            let classification = value
                .parse::<ProjectStatus>()
                .map(ProjectStatus::classification)
                .or_else(|_| value.parse::<TaskStatus>().map(TaskStatus::classification))
                .unwrap_or(Classification::Neutral);
            Badge { classification, emphasis: Emphasis::Normal }
        }
        FieldKind::Priority => match value.parse::<Priority>() {
            Ok(p) => priority_badge(p),
            Err(_) => Badge { classification: Classification::Neutral, emphasis: Emphasis::Normal },
        },
    }
}

/// Badge for an already-typed priority.
pub fn priority_badge(priority: Priority) -> Badge {
    let emphasis = match priority {
        Priority::High => Emphasis::Strong,
        Priority::Medium => Emphasis::Light,
        Priority::Low => Emphasis::Normal,
    };
    Badge { classification: priority.classification(), emphasis }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Positive => "positive",
            Classification::Attention => "attention",
            Classification::Informational => "informational",
            Classification::Neutral => "neutral",
        };
        f.pad(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            ("active", Classification::Positive),
            ("in-progress", Classification::Positive),
            ("pending", Classification::Attention),
            ("todo", Classification::Attention),
            ("delivered", Classification::Informational),
            ("done", Classification::Informational),
            ("archived", Classification::Neutral),
        ];
        for (value, expected) in cases {
            assert_eq!(classify(FieldKind::Status, value), expected, "status {value}");
        }
    }

    #[test]
    fn test_priority_table() {
        assert_eq!(classify(FieldKind::Priority, "high"), Classification::Attention);
        assert_eq!(classify(FieldKind::Priority, "medium"), Classification::Attention);
        assert_eq!(classify(FieldKind::Priority, "low"), Classification::Informational);
    }

    #[test]
    fn test_unknown_values_fall_back_to_neutral() {
        assert_eq!(classify(FieldKind::Status, "unknown-value"), Classification::Neutral);
        assert_eq!(classify(FieldKind::Status, ""), Classification::Neutral);
        assert_eq!(classify(FieldKind::Priority, "urgent"), Classification::Neutral);
        // Field kinds do not borrow from each other.
        assert_eq!(classify(FieldKind::Priority, "active"), Classification::Neutral);
        assert_eq!(classify(FieldKind::Status, "high"), Classification::Neutral);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(classify(FieldKind::Status, "Active"), Classification::Neutral);
        assert_eq!(classify(FieldKind::Status, " done "), Classification::Neutral);
        assert_eq!(classify(FieldKind::Priority, "HIGH"), Classification::Neutral);
        assert_eq!(badge(FieldKind::Priority, "High").emphasis, Emphasis::Normal);
    }

    #[test]
    fn test_medium_priority_is_light_attention() {
        let high = badge(FieldKind::Priority, "high");
        let medium = badge(FieldKind::Priority, "medium");
        let pending = badge(FieldKind::Status, "pending");

        assert_eq!(high.emphasis, Emphasis::Strong);
        assert_eq!(medium.emphasis, Emphasis::Light);
        assert_eq!(medium.classification, pending.classification);
        assert_ne!(medium, high);
    }

    #[test]
    fn test_typed_classification_agrees_with_raw() {
        for s in ProjectStatus::ALL {
            assert_eq!(classify(FieldKind::Status, s.as_str()), s.classification());
        }
        for s in TaskStatus::ALL {
            assert_eq!(classify(FieldKind::Status, s.as_str()), s.classification());
        }
        for p in Priority::ALL {
            assert_eq!(badge(FieldKind::Priority, p.as_str()), priority_badge(p));
        }
    }
}
