//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: entities, completions, moods
    r#"
    -- Habits and routines. `position` keeps insertion order, which
    -- rankings rely on to break ties.
    CREATE TABLE IF NOT EXISTS entities (
        domain           TEXT NOT NULL,
        id               TEXT NOT NULL,
        name             TEXT NOT NULL DEFAULT '',
        is_active        INTEGER NOT NULL DEFAULT 1,
        period           TEXT,
        position         INTEGER NOT NULL,
        PRIMARY KEY (domain, id)
    );

    -- One row per (domain, entity, day). Dates are ISO-8601 (YYYY-MM-DD).
    CREATE TABLE IF NOT EXISTS completions (
        domain           TEXT NOT NULL,
        entity_id        TEXT NOT NULL,
        date             TEXT NOT NULL,
        completed        INTEGER NOT NULL,
        PRIMARY KEY (domain, entity_id, date)
    );

    CREATE INDEX IF NOT EXISTS idx_completions_date ON completions(domain, date);

    -- One row per day.
    CREATE TABLE IF NOT EXISTS moods (
        date             TEXT PRIMARY KEY,
        day_rating       INTEGER,
        emotion_ids      JSON NOT NULL DEFAULT '[]'
    );
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute_batch(&format!("PRAGMA user_version = {}", version))?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
