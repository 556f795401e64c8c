//! Mood calculators
//!
//! Same contract as the completion calculators: pure, total, windowed.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::index::MoodIndex;
use super::metrics::WEEKDAYS;
use super::window::Window;
use crate::format::weekday_name;

/// Highest valid day rating.
pub const MAX_RATING: u8 = 5;

/// Average day rating over the rated days of a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodAverage {
    /// `None` when no day in the window carries a rating
    pub average_rating: Option<f64>,
    pub rated_days: u32,
}

/// Average rating for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodBucket {
    pub bucket_key: String,
    pub average_rating: Option<f64>,
    pub sample_count: u32,
}

/// How often an emotion was tagged in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionCount {
    pub emotion_id: String,
    pub count: u32,
}

/// One window date with its mood entry, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMood {
    pub date: NaiveDate,
    pub day_rating: Option<u8>,
    pub emotion_ids: Vec<String>,
}

fn mean(sum: u32, count: u32) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Days in the window that have a mood record at all.
pub fn days_logged(moods: &MoodIndex, window: &Window) -> u32 {
    window
        .ordered_dates
        .iter()
        .filter(|&&date| moods.get(date).is_some())
        .count() as u32
}

/// Mean rating over the window's rated days.
pub fn average_rating(moods: &MoodIndex, window: &Window) -> MoodAverage {
    let (sum, count) = window
        .ordered_dates
        .iter()
        .filter_map(|&date| moods.rating(date))
        .fold((0u32, 0u32), |(sum, count), r| (sum + u32::from(r), count + 1));
    MoodAverage {
        average_rating: mean(sum, count),
        rated_days: count,
    }
}

/// Count of days per rating 0..=5. Out-of-range ratings are not counted.
pub fn rating_distribution(moods: &MoodIndex, window: &Window) -> [u32; 6] {
    let mut distribution = [0u32; 6];
    for &date in &window.ordered_dates {
        if let Some(rating) = moods.rating(date) {
            if rating <= MAX_RATING {
                distribution[rating as usize] += 1;
            }
        }
    }
    distribution
}

/// Average rating per weekday, Monday through Sunday.
pub fn weekday_mood(moods: &MoodIndex, window: &Window) -> Vec<MoodBucket> {
    let mut tallies = [(0u32, 0u32); 7];
    for &date in &window.ordered_dates {
        if let Some(rating) = moods.rating(date) {
            let slot = &mut tallies[date.weekday().num_days_from_monday() as usize];
            slot.0 += u32::from(rating);
            slot.1 += 1;
        }
    }

    WEEKDAYS
        .iter()
        .zip(tallies)
        .map(|(day, (sum, count))| MoodBucket {
            bucket_key: weekday_name(*day).to_string(),
            average_rating: mean(sum, count),
            sample_count: count,
        })
        .collect()
}

/// Most frequently tagged emotions, highest count first.
///
/// Equal counts keep first-seen order (oldest date first).
pub fn emotion_frequency(moods: &MoodIndex, window: &Window, limit: usize) -> Vec<EmotionCount> {
    let mut counts: Vec<EmotionCount> = Vec::new();
    for &date in &window.ordered_dates {
        let Some(record) = moods.get(date) else {
            continue;
        };
        for emotion in &record.emotion_ids {
            match counts.iter_mut().find(|c| &c.emotion_id == emotion) {
                Some(entry) => entry.count += 1,
                None => counts.push(EmotionCount {
                    emotion_id: emotion.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// One entry per window date, oldest first.
pub fn daily_moods(moods: &MoodIndex, window: &Window) -> Vec<DailyMood> {
    window
        .ordered_dates
        .iter()
        .map(|&date| {
            let record = moods.get(date);
            DailyMood {
                date,
                day_rating: record.and_then(|m| m.day_rating),
                emotion_ids: record
                    .map(|m| m.emotion_ids.iter().cloned().collect())
                    .unwrap_or_default(),
            }
        })
        .collect()
}
