//! # Command Center
//!
//! A single-operator business dashboard for a solo service provider: client
//! projects, to-do tasks, a library of reusable creative/AI assets and the
//! service lines on offer, plus the summary numbers derived from them.
//!
//! The crate is split into a pure core and the surfaces that consume it.
//!
//! ## Core
//!
//! - **Records**: [`project::Project`], [`task::Task`], [`asset::Asset`],
//!   [`service::Service`] and the closed enumerations in [`fields`].
//! - **Metrics**: [`metrics::compute_stats`] and friends.
//! - **Filters**: per-section views in [`filters`], always order-preserving.
//! - **Classification**: [`classify::classify`] maps a status or priority to
//!   Positive / Attention / Informational / Neutral; renderers own colour.
//! - **Navigation**: [`nav::Navigator`] holds the one mutable selector and
//!   derives the active [`nav::Section`].
//!
//! Records come in through [`dataset::Dataset`], either a read-only JSON
//! snapshot or the bundled sample. The core never writes them back.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use command_center::dataset::Dataset;
//! use command_center::metrics::compute_stats;
//!
//! let data = Dataset::sample();
//! let now = Utc.with_ymd_and_hms(2025, 11, 15, 9, 0, 0).unwrap();
//! let stats = compute_stats(&data.projects, now);
//! assert_eq!(stats.active_projects, 2);
//! assert_eq!(stats.total_revenue, 45500);
//! assert_eq!(stats.completion_rate, Some(40));
//! ```
//!
//! ## Surfaces
//!
//! The `ccenter` binary wraps the core in a CLI ([`cli`], [`cmd`]) with one
//! subcommand per section, and a terminal UI ([`tui`]) whose tab bar is the
//! navigation state machine.

pub mod asset;
pub mod classify;
pub mod cli;
pub mod cmd;
pub mod dataset;
pub mod error;
pub mod fields;
pub mod filters;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod nav;
pub mod project;
pub mod service;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod run;
}

pub use error::{DashboardError, Result};
