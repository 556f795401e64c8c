//! Metric calculators
//!
//! Pure functions over a [`Window`] and a [`CompletionIndex`]. Every
//! calculator is total: empty windows and empty entity sets produce zeros,
//! never errors. Only active entities are considered; inactive ones are
//! dropped, not zero-filled.
//!
//! Percentages are reported on a 0-100 scale.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use super::index::CompletionIndex;
use super::window::Window;
use crate::format::weekday_name;
use crate::types::{active_entities, DayPeriod, TrackedEntity};

/// Upper bound on a backward streak scan.
pub const STREAK_CAP: u32 = 365;

/// Weekday buckets in display order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ============================================
// Metric results
// ============================================

/// `numerator / denominator`, with an empty denominator defined as 0%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionRate {
    pub numerator: u32,
    pub denominator: u32,
    pub percentage: f64,
}

impl CompletionRate {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
            percentage: percentage(numerator, denominator),
        }
    }

    /// Rate on a 0-1 scale.
    pub fn ratio(&self) -> f64 {
        self.percentage / 100.0
    }
}

/// Consecutive completed days ending at the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub entity_id: String,
    pub length_in_days: u32,
}

/// Pooled completion percentage for one bucket (weekday or period of day).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketAverage {
    pub bucket_key: String,
    pub average_percentage: f64,
    /// Number of (entity, date) slots that fell in the bucket
    pub sample_count: u32,
}

/// One entry of a top-N or bottom-N ranking. Ranks start at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub entity_id: String,
    pub percentage: f64,
    pub rank: usize,
}

/// Completion rate of a single entity over the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRate {
    pub entity_id: String,
    pub rate: CompletionRate,
}

/// Share of active entities completed on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub completed: u32,
    pub active: u32,
    pub percentage: f64,
}

/// Mean of series B over dates where a predicate on series A held.
///
/// `mean` is `None` when no date qualified; callers treat that as
/// "insufficient data", never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionalAverage {
    pub mean: Option<f64>,
    pub count: u32,
}

/// Any value an insight can point back to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricResult {
    CompletionRate(CompletionRate),
    Streak(Streak),
    BucketAverage(BucketAverage),
    RankedEntity(RankedEntity),
    ConditionalAverage(ConditionalAverage),
    DayCount { count: u32, window_length: u32 },
    MoodAverage { average_rating: f64, rated_days: u32 },
    EmotionFrequency { emotion_id: String, count: u32 },
}

/// Direction of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Highest percentage first
    Top,
    /// Lowest percentage first
    Bottom,
}

fn percentage(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        (numerator as f64 / denominator as f64) * 100.0
    }
}

// ============================================
// Completion rates
// ============================================

/// Completed days over window length for one entity.
pub fn completion_rate(
    index: &CompletionIndex,
    entity_id: &str,
    window: &Window,
) -> CompletionRate {
    let completed = window
        .ordered_dates
        .iter()
        .filter(|&&date| index.lookup(entity_id, date))
        .count() as u32;
    CompletionRate::new(completed, window.len() as u32)
}

/// Per-entity rates for the active entities, in insertion order.
pub fn entity_rates(
    index: &CompletionIndex,
    entities: &[TrackedEntity],
    window: &Window,
) -> Vec<EntityRate> {
    active_entities(entities)
        .into_iter()
        .map(|entity| EntityRate {
            entity_id: entity.id.clone(),
            rate: completion_rate(index, &entity.id, window),
        })
        .collect()
}

/// Pooled rate over every (active entity, date) slot in the window.
pub fn entity_set_rate(
    index: &CompletionIndex,
    entities: &[TrackedEntity],
    window: &Window,
) -> CompletionRate {
    let active = active_entities(entities);
    let mut completed = 0u32;
    for entity in &active {
        for &date in &window.ordered_dates {
            if index.lookup(&entity.id, date) {
                completed += 1;
            }
        }
    }
    CompletionRate::new(completed, (active.len() * window.len()) as u32)
}

/// Percentage of active entities completed on each window date.
pub fn daily_completion(
    index: &CompletionIndex,
    entities: &[TrackedEntity],
    window: &Window,
) -> Vec<DailyCompletion> {
    let active = active_entities(entities);
    window
        .ordered_dates
        .iter()
        .map(|&date| {
            let completed = active
                .iter()
                .filter(|entity| index.lookup(&entity.id, date))
                .count() as u32;
            let active_count = active.len() as u32;
            DailyCompletion {
                date,
                completed,
                active: active_count,
                percentage: percentage(completed, active_count),
            }
        })
        .collect()
}

/// Dates on which every active entity was completed.
///
/// An empty active set never produces a perfect day.
pub fn perfect_days(index: &CompletionIndex, entities: &[TrackedEntity], window: &Window) -> u32 {
    let active = active_entities(entities);
    if active.is_empty() {
        return 0;
    }
    window
        .ordered_dates
        .iter()
        .filter(|&&date| active.iter().all(|entity| index.lookup(&entity.id, date)))
        .count() as u32
}

// ============================================
// Streaks
// ============================================

/// Scan backward from `reference_date` while the entity was completed.
///
/// Stops at the first missed day and never counts past [`STREAK_CAP`].
pub fn streak(index: &CompletionIndex, entity_id: &str, reference_date: NaiveDate) -> Streak {
    let mut length = 0u32;
    let mut cursor = Some(reference_date);

    while let Some(date) = cursor {
        if length >= STREAK_CAP || !index.lookup(entity_id, date) {
            break;
        }
        length += 1;
        cursor = date.pred_opt();
    }

    Streak {
        entity_id: entity_id.to_string(),
        length_in_days: length,
    }
}

/// Longest run of consecutive completed dates inside the window.
pub fn longest_streak_in_window(index: &CompletionIndex, entity_id: &str, window: &Window) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    for &date in &window.ordered_dates {
        if index.lookup(entity_id, date) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

// ============================================
// Buckets
// ============================================

/// Completion percentage per weekday, Monday through Sunday.
///
/// Each bucket pools every active entity on every window date falling on
/// that weekday. Buckets with no samples report 0%.
pub fn weekday_buckets(
    index: &CompletionIndex,
    entities: &[TrackedEntity],
    window: &Window,
) -> Vec<BucketAverage> {
    let active = active_entities(entities);
    let mut tallies = [(0u32, 0u32); 7];

    for &date in &window.ordered_dates {
        let slot = &mut tallies[date.weekday().num_days_from_monday() as usize];
        for entity in &active {
            slot.1 += 1;
            if index.lookup(&entity.id, date) {
                slot.0 += 1;
            }
        }
    }

    WEEKDAYS
        .iter()
        .zip(tallies)
        .map(|(day, (completed, total))| BucketAverage {
            bucket_key: weekday_name(*day).to_string(),
            average_percentage: percentage(completed, total),
            sample_count: total,
        })
        .collect()
}

/// Completion percentage per declared period of day.
///
/// Entities without a period don't contribute to any bucket.
pub fn period_buckets(
    index: &CompletionIndex,
    entities: &[TrackedEntity],
    window: &Window,
) -> Vec<BucketAverage> {
    let mut tallies = [(0u32, 0u32); 3];

    for entity in active_entities(entities) {
        let Some(period) = entity.period else {
            continue;
        };
        let slot = &mut tallies[period.index()];
        for &date in &window.ordered_dates {
            slot.1 += 1;
            if index.lookup(&entity.id, date) {
                slot.0 += 1;
            }
        }
    }

    DayPeriod::ALL
        .iter()
        .zip(tallies)
        .map(|(period, (completed, total))| BucketAverage {
            bucket_key: period.as_str().to_string(),
            average_percentage: percentage(completed, total),
            sample_count: total,
        })
        .collect()
}

/// Bucket with the highest percentage among those with samples.
///
/// Ties keep the earliest bucket.
pub fn best_bucket(buckets: &[BucketAverage]) -> Option<&BucketAverage> {
    buckets
        .iter()
        .filter(|b| b.sample_count > 0)
        .fold(None, |best: Option<&BucketAverage>, b| match best {
            Some(current) if current.average_percentage >= b.average_percentage => Some(current),
            _ => Some(b),
        })
}

/// Bucket with the lowest percentage among those with samples.
///
/// Ties keep the earliest bucket.
pub fn worst_bucket(buckets: &[BucketAverage]) -> Option<&BucketAverage> {
    buckets
        .iter()
        .filter(|b| b.sample_count > 0)
        .fold(None, |worst: Option<&BucketAverage>, b| match worst {
            Some(current) if current.average_percentage <= b.average_percentage => Some(current),
            _ => Some(b),
        })
}

// ============================================
// Rankings
// ============================================

/// Top-N or bottom-N entities by percentage.
///
/// The sort is stable, so entities with equal percentages keep the order
/// they had in `rates` (the active-entity insertion order). Ties are not
/// broken by name or id.
pub fn rank(rates: &[EntityRate], order: RankOrder, n: usize) -> Vec<RankedEntity> {
    let mut sorted: Vec<&EntityRate> = rates.iter().collect();
    sorted.sort_by(|a, b| {
        let (x, y) = (a.rate.percentage, b.rate.percentage);
        let ord = match order {
            RankOrder::Top => y.partial_cmp(&x),
            RankOrder::Bottom => x.partial_cmp(&y),
        };
        ord.unwrap_or(std::cmp::Ordering::Equal)
    });

    sorted
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, entry)| RankedEntity {
            entity_id: entry.entity_id.clone(),
            percentage: entry.rate.percentage,
            rank: i + 1,
        })
        .collect()
}
