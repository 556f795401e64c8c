//! Repository layer for database operations

use crate::error::{Error, Result};
use crate::store::EventStore;
use crate::types::{CompletionRecord, DayPeriod, Domain, MoodRecord, Snapshot, TrackedEntity};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Transaction};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row counts per table, for status output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub habits: i64,
    pub routines: i64,
    pub habit_completions: i64,
    pub routine_completions: i64,
    pub moods: i64,
}

/// Outcome of importing a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub entities: usize,
    pub completions: usize,
    pub moods: usize,
}

/// Database handle with a single guarded connection
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn();
        super::schema::run_migrations(&conn)
    }

    /// Lock the connection. A poisoned lock still holds a usable connection.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ============================================
    // Import
    // ============================================

    /// Import a snapshot.
    ///
    /// Entities keep their first-seen position; re-imported entities only
    /// update name, activity and period. Completions and moods are upserted,
    /// so later records for the same key win.
    pub fn import_snapshot(&self, snapshot: &Snapshot) -> Result<ImportResult> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let mut result = ImportResult::default();
        for domain in [Domain::Habits, Domain::Routines] {
            for entity in snapshot.entities(domain) {
                upsert_entity(&tx, domain, entity)?;
                result.entities += 1;
            }
            for record in snapshot.completions(domain) {
                upsert_completion(&tx, domain, record)?;
                result.completions += 1;
            }
        }
        for mood in &snapshot.moods {
            upsert_mood(&tx, mood)?;
            result.moods += 1;
        }

        tx.commit()?;

        tracing::info!(
            entities = result.entities,
            completions = result.completions,
            moods = result.moods,
            "Imported snapshot"
        );

        Ok(result)
    }

    // ============================================
    // Queries
    // ============================================

    /// Entities of a domain in insertion order.
    pub fn list_entities(&self, domain: Domain) -> Result<Vec<TrackedEntity>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, is_active, period
            FROM entities
            WHERE domain = ?1
            ORDER BY position ASC
            "#,
        )?;

        let rows = stmt.query_map([domain.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut entities = Vec::new();
        for row in rows {
            let (id, name, is_active, period) = row?;
            let period = period
                .map(|p| p.parse::<DayPeriod>().map_err(Error::InvalidRecord))
                .transpose()?;
            entities.push(TrackedEntity {
                id,
                name,
                is_active,
                period,
            });
        }
        Ok(entities)
    }

    /// Completion records of a domain, oldest first.
    pub fn list_completions(&self, domain: Domain) -> Result<Vec<CompletionRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT entity_id, date, completed
            FROM completions
            WHERE domain = ?1
            ORDER BY date ASC, entity_id ASC
            "#,
        )?;

        let rows = stmt.query_map([domain.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (entity_id, date, completed) = row?;
            records.push(CompletionRecord {
                entity_id,
                date: parse_date(&date)?,
                completed,
            });
        }
        Ok(records)
    }

    /// Mood records, oldest first.
    pub fn list_moods(&self) -> Result<Vec<MoodRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT date, day_rating, emotion_ids
            FROM moods
            ORDER BY date ASC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<u8>>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut moods = Vec::new();
        for row in rows {
            let (date, day_rating, emotions) = row?;
            let emotion_ids: BTreeSet<String> = serde_json::from_str(&emotions)?;
            moods.push(MoodRecord {
                date: parse_date(&date)?,
                emotion_ids,
                day_rating,
            });
        }
        Ok(moods)
    }

    /// Row counts for each collection.
    pub fn counts(&self) -> Result<StoreCounts> {
        let conn = self.conn();
        let count = |sql: &str, domain: Option<&str>| -> Result<i64> {
            let n = match domain {
                Some(d) => conn.query_row(sql, [d], |r| r.get(0))?,
                None => conn.query_row(sql, [], |r| r.get(0))?,
            };
            Ok(n)
        };

        let entities = "SELECT COUNT(*) FROM entities WHERE domain = ?1";
        let completions = "SELECT COUNT(*) FROM completions WHERE domain = ?1";

        Ok(StoreCounts {
            habits: count(entities, Some(Domain::Habits.as_str()))?,
            routines: count(entities, Some(Domain::Routines.as_str()))?,
            habit_completions: count(completions, Some(Domain::Habits.as_str()))?,
            routine_completions: count(completions, Some(Domain::Routines.as_str()))?,
            moods: count("SELECT COUNT(*) FROM moods", None)?,
        })
    }
}

impl EventStore for Database {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn load_snapshot(&self) -> Result<Snapshot> {
        let snapshot = Snapshot {
            habits: self.list_entities(Domain::Habits)?,
            routines: self.list_entities(Domain::Routines)?,
            habit_completions: self.list_completions(Domain::Habits)?,
            routine_completions: self.list_completions(Domain::Routines)?,
            moods: self.list_moods()?,
        };

        tracing::debug!(
            habits = snapshot.habits.len(),
            routines = snapshot.routines.len(),
            habit_completions = snapshot.habit_completions.len(),
            routine_completions = snapshot.routine_completions.len(),
            moods = snapshot.moods.len(),
            "Loaded snapshot from database"
        );

        Ok(snapshot)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| Error::InvalidRecord(format!("bad date '{}': {}", value, e)))
}

fn upsert_entity(tx: &Transaction<'_>, domain: Domain, entity: &TrackedEntity) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO entities (domain, id, name, is_active, period, position)
        VALUES (?1, ?2, ?3, ?4, ?5,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM entities WHERE domain = ?1))
        ON CONFLICT(domain, id) DO UPDATE SET
            name = excluded.name,
            is_active = excluded.is_active,
            period = excluded.period
        "#,
        params![
            domain.as_str(),
            entity.id,
            entity.name,
            entity.is_active,
            entity.period.map(|p| p.as_str()),
        ],
    )?;
    Ok(())
}

fn upsert_completion(
    tx: &Transaction<'_>,
    domain: Domain,
    record: &CompletionRecord,
) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO completions (domain, entity_id, date, completed)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(domain, entity_id, date) DO UPDATE SET
            completed = excluded.completed
        "#,
        params![
            domain.as_str(),
            record.entity_id,
            record.date.format(DATE_FORMAT).to_string(),
            record.completed,
        ],
    )?;
    Ok(())
}

fn upsert_mood(tx: &Transaction<'_>, mood: &MoodRecord) -> Result<()> {
    tx.execute(
        r#"
        INSERT INTO moods (date, day_rating, emotion_ids)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(date) DO UPDATE SET
            day_rating = excluded.day_rating,
            emotion_ids = excluded.emotion_ids
        "#,
        params![
            mood.date.format(DATE_FORMAT).to_string(),
            mood.day_rating,
            serde_json::to_string(&mood.emotion_ids)?,
        ],
    )?;
    Ok(())
}
