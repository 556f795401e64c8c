//! Core domain types for lifelog
//!
//! These types are the input side of the analytics engine. They are supplied
//! fresh by an [`EventStore`](crate::store::EventStore) on every invocation and
//! are never mutated by the engine.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Habit** | Something the person wants to do every day, optionally tied to a part of the day |
//! | **Routine** | A recurring checklist item; same shape as a habit but without a period |
//! | **Completion** | One (entity, date) record saying whether the entity was done that day |
//! | **Mood** | One per-day journal entry with a 0-5 rating and a set of emotions |
//!
//! A missing completion record means "not completed". The engine does not
//! distinguish "not yet due" from "explicitly skipped".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================
// Tracked entities
// ============================================

/// Part of the day a habit is scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Night,
}

impl DayPeriod {
    /// All periods in display order.
    pub const ALL: [DayPeriod; 3] = [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Night => "night",
        }
    }

    /// Position in [`DayPeriod::ALL`].
    pub fn index(&self) -> usize {
        match self {
            DayPeriod::Morning => 0,
            DayPeriod::Afternoon => 1,
            DayPeriod::Night => 2,
        }
    }
}

impl std::str::FromStr for DayPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(DayPeriod::Morning),
            "afternoon" => Ok(DayPeriod::Afternoon),
            "night" => Ok(DayPeriod::Night),
            _ => Err(format!("unknown day period: {}", s)),
        }
    }
}

/// A habit or routine that can be completed on a given day.
///
/// Only entities with `is_active = true` take part in aggregation; inactive
/// ones are dropped before any metric is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
    /// Stable identifier used as the completion key
    pub id: String,
    /// Display name used when rendering insights
    #[serde(default)]
    pub name: String,
    /// Inactive entities are excluded entirely
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Declared part of the day (habits only)
    #[serde(default)]
    pub period: Option<DayPeriod>,
}

fn default_active() -> bool {
    true
}

impl TrackedEntity {
    /// Create an active entity with no declared period.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            period: None,
        }
    }

    /// Set the declared period.
    pub fn with_period(mut self, period: DayPeriod) -> Self {
        self.period = Some(period);
        self
    }

    /// Mark the entity inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Name for display, falling back to the id when no name was recorded.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Filter a list down to its active entities, keeping insertion order.
pub fn active_entities(entities: &[TrackedEntity]) -> Vec<&TrackedEntity> {
    entities.iter().filter(|e| e.is_active).collect()
}

/// Which completion collection a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Habits,
    Routines,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Habits => "habits",
            Domain::Routines => "routines",
        }
    }

    /// Singular noun for display ("habit", "routine").
    pub fn noun(&self) -> &'static str {
        match self {
            Domain::Habits => "habit",
            Domain::Routines => "routine",
        }
    }
}

// ============================================
// Event records
// ============================================

/// Whether an entity was completed on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub entity_id: String,
    pub date: NaiveDate,
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(entity_id: impl Into<String>, date: NaiveDate, completed: bool) -> Self {
        Self {
            entity_id: entity_id.into(),
            date,
            completed,
        }
    }
}

/// A daily mood journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub date: NaiveDate,
    /// Emotions tagged for the day (may be empty)
    #[serde(default)]
    pub emotion_ids: BTreeSet<String>,
    /// Overall rating for the day, 0-5
    #[serde(default)]
    pub day_rating: Option<u8>,
}

impl MoodRecord {
    pub fn new(date: NaiveDate, day_rating: Option<u8>) -> Self {
        Self {
            date,
            emotion_ids: BTreeSet::new(),
            day_rating,
        }
    }

    /// Attach emotion ids to the record.
    pub fn with_emotions<I, S>(mut self, emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emotion_ids = emotions.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================
// Snapshot
// ============================================

/// Everything the engine needs for one invocation.
///
/// Produced by an event store and treated as an immutable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub habits: Vec<TrackedEntity>,
    #[serde(default)]
    pub routines: Vec<TrackedEntity>,
    #[serde(default)]
    pub habit_completions: Vec<CompletionRecord>,
    #[serde(default)]
    pub routine_completions: Vec<CompletionRecord>,
    #[serde(default)]
    pub moods: Vec<MoodRecord>,
}

impl Snapshot {
    /// Entities for a domain.
    pub fn entities(&self, domain: Domain) -> &[TrackedEntity] {
        match domain {
            Domain::Habits => &self.habits,
            Domain::Routines => &self.routines,
        }
    }

    /// Completion records for a domain.
    pub fn completions(&self, domain: Domain) -> &[CompletionRecord] {
        match domain {
            Domain::Habits => &self.habit_completions,
            Domain::Routines => &self.routine_completions,
        }
    }

    /// True when there is nothing at all to analyze.
    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
            && self.routines.is_empty()
            && self.habit_completions.is_empty()
            && self.routine_completions.is_empty()
            && self.moods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_period_round_trip_str() {
        for period in DayPeriod::ALL {
            assert_eq!(period.as_str().parse::<DayPeriod>().unwrap(), period);
        }
        assert!("evening".parse::<DayPeriod>().is_err());
    }

    #[test]
    fn test_active_entities_keeps_order() {
        let entities = vec![
            TrackedEntity::new("a", "Read"),
            TrackedEntity::new("b", "Run").inactive(),
            TrackedEntity::new("c", "Meditate"),
        ];
        let ids: Vec<_> = active_entities(&entities).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_snapshot_json_defaults() {
        let json = r#"{
            "habits": [{"id": "h1", "period": "morning"}],
            "moods": [{"date": "2024-03-01", "day_rating": 4}]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        let habit = &snapshot.habits[0];
        assert!(habit.is_active);
        assert_eq!(habit.period, Some(DayPeriod::Morning));
        assert_eq!(habit.display_name(), "h1");
        assert!(snapshot.routines.is_empty());
        assert!(snapshot.moods[0].emotion_ids.is_empty());
        assert!(!snapshot.is_empty());
        assert!(Snapshot::default().is_empty());
        assert_eq!(snapshot.moods[0].day_rating, Some(4));
    }
}
