//! Cross-domain correlation
//!
//! Joins two per-date series on their shared dates and averages one of them
//! over the dates where a predicate on the other holds. The canonical use is
//! "average mood on days where at least 70% of habits were completed".

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::index::{CompletionIndex, MoodIndex};
use super::metrics::{daily_completion, ConditionalAverage};
use super::window::Window;
use crate::types::TrackedEntity;

/// A sparse per-date metric series.
pub type DateSeries = BTreeMap<NaiveDate, f64>;

/// Daily completion percentage that counts as a "high completion" day.
pub const HIGH_COMPLETION_THRESHOLD: f64 = 70.0;

/// Predicate: value is at least `threshold`.
pub fn at_least(threshold: f64) -> impl Fn(f64) -> bool {
    move |value| value >= threshold
}

/// Predicate: value is strictly below `threshold`.
pub fn below(threshold: f64) -> impl Fn(f64) -> bool {
    move |value| value < threshold
}

/// Mean of `series_b` over dates present in both series where
/// `predicate(series_a[date])` holds.
///
/// Returns `mean: None` with `count: 0` when no date qualifies.
pub fn conditional_average<P>(
    series_a: &DateSeries,
    series_b: &DateSeries,
    predicate: P,
) -> ConditionalAverage
where
    P: Fn(f64) -> bool,
{
    let mut sum = 0.0;
    let mut count = 0u32;

    for (date, &a) in series_a {
        let Some(&b) = series_b.get(date) else {
            continue;
        };
        if predicate(a) {
            sum += b;
            count += 1;
        }
    }

    ConditionalAverage {
        mean: if count == 0 { None } else { Some(sum / count as f64) },
        count,
    }
}

/// Per-date completion percentage of the active entities over the window.
///
/// Every window date is present, zero-filled when nothing was completed.
pub fn completion_series(
    index: &CompletionIndex,
    entities: &[TrackedEntity],
    window: &Window,
) -> DateSeries {
    daily_completion(index, entities, window)
        .into_iter()
        .map(|day| (day.date, day.percentage))
        .collect()
}

/// Per-date mood rating over the window. Dates without a rating are absent.
pub fn mood_series(moods: &MoodIndex, window: &Window) -> DateSeries {
    window
        .ordered_dates
        .iter()
        .filter_map(|&date| moods.rating(date).map(|r| (date, f64::from(r))))
        .collect()
}
