//! Error taxonomy for the dashboard core and its surfaces.

use thiserror::Error;

/// Everything that can go wrong while loading, validating or deriving
/// dashboard data.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A status, priority, type or view name outside its fixed enumeration.
    #[error("invalid {field} value: '{value}'")]
    InvalidEnumValue { field: &'static str, value: String },

    /// An aggregate that has no meaning over an empty collection.
    #[error("no data: {metric} is undefined over an empty collection")]
    EmptyCollectionMetric { metric: &'static str },

    /// A record that breaks a data-model invariant.
    #[error("invalid {entity} '{id}': {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },

    #[error("invalid date '{0}': expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
