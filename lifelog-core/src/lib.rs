//! # lifelog-core
//!
//! Core library for lifelog - behavioral analytics over habits, routines
//! and daily mood check-ins.
//!
//! This library provides:
//! - Domain types for tracked entities, completions and mood records
//! - A pure analytics engine (windows, metrics, correlations, insights)
//! - Event store adapters (JSON snapshot, SQLite)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows in one direction:
//! - **Store:** an [`EventStore`] produces a [`Snapshot`]
//! - **Engine:** `analytics` turns a snapshot, a period and a reference date
//!   into reports and insights, without touching the clock or storage
//! - **Presentation:** callers format the report structs
//!
//! ## Example
//!
//! ```rust,no_run
//! use lifelog_core::analytics::{generate_all, ReportConfig, ReportPeriod};
//! use lifelog_core::{Config, Database, EventStore};
//!
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let snapshot = db.load_snapshot().expect("failed to load snapshot");
//! let today = chrono::Local::now().date_naive();
//! let report = generate_all(&snapshot, ReportPeriod::Week, today, &ReportConfig::default());
//! for insight in &report.combined.insights {
//!     println!("{}: {}", insight.title, insight.description);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use store::{EventStore, JsonSnapshotStore};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod store;
pub mod types;
