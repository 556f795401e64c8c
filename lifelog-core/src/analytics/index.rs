//! Keyed lookup structures built once per invocation.
//!
//! Calculators never scan the raw record lists; they go through these
//! indexes so each (entity, date) check is a single hash lookup.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::types::{CompletionRecord, MoodRecord};

/// (entity id, date) -> completed.
///
/// Duplicate records for the same key resolve last-write-wins. Keys with no
/// record read as `false`. Keyed by entity first so lookups can borrow the
/// id as `&str`.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    entries: HashMap<String, HashMap<NaiveDate, bool>>,
}

impl CompletionIndex {
    /// Build the index from raw completion records.
    pub fn build(records: &[CompletionRecord]) -> Self {
        let mut entries: HashMap<String, HashMap<NaiveDate, bool>> = HashMap::new();
        for record in records {
            entries
                .entry(record.entity_id.clone())
                .or_default()
                .insert(record.date, record.completed);
        }
        Self { entries }
    }

    /// Whether `entity_id` was completed on `date`. Absent means `false`.
    pub fn lookup(&self, entity_id: &str, date: NaiveDate) -> bool {
        self.entries
            .get(entity_id)
            .and_then(|days| days.get(&date))
            .copied()
            .unwrap_or(false)
    }

    /// Number of distinct (entity, date) keys.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mood records keyed by date, last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct MoodIndex {
    by_date: BTreeMap<NaiveDate, MoodRecord>,
}

impl MoodIndex {
    pub fn build(records: &[MoodRecord]) -> Self {
        let mut by_date = BTreeMap::new();
        for record in records {
            by_date.insert(record.date, record.clone());
        }
        Self { by_date }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MoodRecord> {
        self.by_date.get(&date)
    }

    /// Day rating for `date`, if a record with a rating exists.
    pub fn rating(&self, date: NaiveDate) -> Option<u8> {
        self.by_date.get(&date).and_then(|m| m.day_rating)
    }

    /// Records in date order.
    pub fn iter(&self) -> impl Iterator<Item = &MoodRecord> {
        self.by_date.values()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_absent_is_false() {
        let index = CompletionIndex::build(&[CompletionRecord::new("read", date(1), true)]);
        assert!(index.lookup("read", date(1)));
        assert!(!index.lookup("read", date(2)));
        assert!(!index.lookup("run", date(1)));
    }

    #[test]
    fn test_recorded_false_reads_as_false() {
        let index = CompletionIndex::build(&[CompletionRecord::new("read", date(1), false)]);
        assert!(!index.lookup("read", date(1)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_duplicates_are_last_write_wins() {
        let index = CompletionIndex::build(&[
            CompletionRecord::new("read", date(1), true),
            CompletionRecord::new("read", date(1), false),
            CompletionRecord::new("run", date(1), false),
            CompletionRecord::new("run", date(1), true),
        ]);
        assert!(!index.lookup("read", date(1)));
        assert!(index.lookup("run", date(1)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_mood_index_last_write_wins() {
        let index = MoodIndex::build(&[
            MoodRecord::new(date(2), Some(2)),
            MoodRecord::new(date(1), None),
            MoodRecord::new(date(2), Some(5)),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.rating(date(2)), Some(5));
        assert_eq!(index.rating(date(1)), None);
        assert_eq!(index.rating(date(3)), None);
        let dates: Vec<_> = index.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(1), date(2)]);
    }
}
