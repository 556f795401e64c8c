//! Database layer for lifelog
//!
//! SQLite-backed [`EventStore`](crate::store::EventStore):
//! - Schema migrations
//! - Snapshot import (upsert, last write wins)
//! - Snapshot loading for the analytics engine

pub mod repo;
pub mod schema;

pub use repo::{Database, ImportResult, StoreCounts};
