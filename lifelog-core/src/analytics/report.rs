//! Report assembly
//!
//! Builds the plain-data structures behind the habit, routine and mood
//! report views and the combined insights view. Everything is recomputed
//! from the snapshot on every call.

use chrono::NaiveDate;
use serde::Serialize;

use super::correlate::{
    at_least, below, completion_series, conditional_average, mood_series,
    HIGH_COMPLETION_THRESHOLD,
};
use super::index::{CompletionIndex, MoodIndex};
use super::insights::{generate_insights, Insight, InsightInputs};
use super::metrics::{
    completion_rate, daily_completion, entity_rates, entity_set_rate, longest_streak_in_window,
    perfect_days, period_buckets, rank, streak, weekday_buckets, BucketAverage, CompletionRate,
    ConditionalAverage, DailyCompletion, RankOrder, RankedEntity,
};
use super::mood::{
    average_rating, daily_moods, days_logged, emotion_frequency, rating_distribution,
    weekday_mood, DailyMood, EmotionCount, MoodAverage, MoodBucket,
};
use super::window::{ReportPeriod, Window};
use crate::types::{active_entities, Domain, Snapshot};

/// Configuration for report generation.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Number of entries in top/bottom rankings
    pub top_n: usize,
    /// Number of emotions listed in the mood report
    pub top_emotions: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            top_emotions: 5,
        }
    }
}

/// Per-entity line of a completion report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub entity_id: String,
    pub name: String,
    pub rate: CompletionRate,
    /// Consecutive days ending at the window's last date
    pub current_streak: u32,
    pub longest_streak_in_window: u32,
}

/// Habit or routine report.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub domain: Domain,
    pub period: ReportPeriod,
    pub window: Window,
    pub active_count: usize,
    pub overall: CompletionRate,
    pub entities: Vec<EntitySummary>,
    pub by_weekday: Vec<BucketAverage>,
    /// Empty for routines, which have no period of day
    pub by_period: Vec<BucketAverage>,
    pub daily: Vec<DailyCompletion>,
    pub top: Vec<RankedEntity>,
    pub bottom: Vec<RankedEntity>,
    pub perfect_days: u32,
}

/// Mood report.
#[derive(Debug, Clone, Serialize)]
pub struct MoodReport {
    pub period: ReportPeriod,
    pub window: Window,
    pub days_logged: u32,
    pub average: MoodAverage,
    /// Days per rating, index 0..=5
    pub rating_distribution: [u32; 6],
    pub by_weekday: Vec<MoodBucket>,
    pub top_emotions: Vec<EmotionCount>,
    pub daily: Vec<DailyMood>,
}

/// Cross-domain correlations plus the insight list.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedInsights {
    pub period: ReportPeriod,
    pub window: Window,
    pub habit_mood_high: ConditionalAverage,
    pub habit_mood_low: ConditionalAverage,
    pub routine_mood_high: ConditionalAverage,
    pub routine_mood_low: ConditionalAverage,
    pub insights: Vec<Insight>,
}

/// Every report for one period.
#[derive(Debug, Clone, Serialize)]
pub struct LifeReport {
    pub habits: CompletionReport,
    pub routines: CompletionReport,
    pub mood: MoodReport,
    pub combined: CombinedInsights,
}

/// Build the habit or routine report for `period` ending at `reference_date`.
pub fn generate_completion_report(
    snapshot: &Snapshot,
    domain: Domain,
    period: ReportPeriod,
    reference_date: NaiveDate,
    config: &ReportConfig,
) -> CompletionReport {
    let window = Window::resolve(period, reference_date);
    let entities = snapshot.entities(domain);
    let index = CompletionIndex::build(snapshot.completions(domain));
    let active = active_entities(entities);

    tracing::debug!(
        domain = domain.as_str(),
        period = period.as_str(),
        %reference_date,
        active = active.len(),
        records = index.len(),
        "Generating completion report"
    );

    let summaries = active
        .iter()
        .map(|entity| EntitySummary {
            entity_id: entity.id.clone(),
            name: entity.display_name().to_string(),
            rate: completion_rate(&index, &entity.id, &window),
            current_streak: streak(&index, &entity.id, window.end_date).length_in_days,
            longest_streak_in_window: longest_streak_in_window(&index, &entity.id, &window),
        })
        .collect();

    let rates = entity_rates(&index, entities, &window);
    let by_period = match domain {
        Domain::Habits => period_buckets(&index, entities, &window),
        Domain::Routines => Vec::new(),
    };

    CompletionReport {
        domain,
        period,
        active_count: active.len(),
        overall: entity_set_rate(&index, entities, &window),
        entities: summaries,
        by_weekday: weekday_buckets(&index, entities, &window),
        by_period,
        daily: daily_completion(&index, entities, &window),
        top: rank(&rates, RankOrder::Top, config.top_n),
        bottom: rank(&rates, RankOrder::Bottom, config.top_n),
        perfect_days: perfect_days(&index, entities, &window),
        window,
    }
}

/// Build the mood report for `period` ending at `reference_date`.
pub fn generate_mood_report(
    snapshot: &Snapshot,
    period: ReportPeriod,
    reference_date: NaiveDate,
    config: &ReportConfig,
) -> MoodReport {
    let window = Window::resolve(period, reference_date);
    let moods = MoodIndex::build(&snapshot.moods);

    tracing::debug!(
        period = period.as_str(),
        %reference_date,
        records = moods.len(),
        "Generating mood report"
    );

    MoodReport {
        period,
        days_logged: days_logged(&moods, &window),
        average: average_rating(&moods, &window),
        rating_distribution: rating_distribution(&moods, &window),
        by_weekday: weekday_mood(&moods, &window),
        top_emotions: emotion_frequency(&moods, &window, config.top_emotions),
        daily: daily_moods(&moods, &window),
        window,
    }
}

/// Build the combined insights for `period` ending at `reference_date`.
pub fn generate_combined_insights(
    snapshot: &Snapshot,
    period: ReportPeriod,
    reference_date: NaiveDate,
) -> CombinedInsights {
    let window = Window::resolve(period, reference_date);
    let inputs = InsightInputs::compute(snapshot, &window);
    let insights = generate_insights(&inputs);

    tracing::info!(
        period = period.as_str(),
        %reference_date,
        insights = insights.len(),
        "Generated combined insights"
    );

    CombinedInsights {
        period,
        habit_mood_high: inputs.habit_mood,
        habit_mood_low: inputs.habit_mood_low,
        routine_mood_high: inputs.routine_mood,
        routine_mood_low: inputs.routine_mood_low,
        insights,
        window,
    }
}

/// Build every report for `period` ending at `reference_date`.
pub fn generate_all(
    snapshot: &Snapshot,
    period: ReportPeriod,
    reference_date: NaiveDate,
    config: &ReportConfig,
) -> LifeReport {
    LifeReport {
        habits: generate_completion_report(
            snapshot,
            Domain::Habits,
            period,
            reference_date,
            config,
        ),
        routines: generate_completion_report(
            snapshot,
            Domain::Routines,
            period,
            reference_date,
            config,
        ),
        mood: generate_mood_report(snapshot, period, reference_date, config),
        combined: generate_combined_insights(snapshot, period, reference_date),
    }
}

/// Average mood on high- and low-completion days for one domain.
///
/// Convenience for callers that only need the correlation pair.
pub fn mood_by_completion(
    snapshot: &Snapshot,
    domain: Domain,
    window: &Window,
) -> (ConditionalAverage, ConditionalAverage) {
    let index = CompletionIndex::build(snapshot.completions(domain));
    let moods = MoodIndex::build(&snapshot.moods);
    let completion = completion_series(&index, snapshot.entities(domain), window);
    let ratings = mood_series(&moods, window);
    (
        conditional_average(&completion, &ratings, at_least(HIGH_COMPLETION_THRESHOLD)),
        conditional_average(&completion, &ratings, below(HIGH_COMPLETION_THRESHOLD)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompletionRecord, DayPeriod, MoodRecord, TrackedEntity};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_routine_report_has_no_period_buckets() {
        let snapshot = Snapshot {
            routines: vec![TrackedEntity::new("r", "Tidy").with_period(DayPeriod::Morning)],
            routine_completions: vec![CompletionRecord::new("r", date(10), true)],
            ..Default::default()
        };
        let report = generate_completion_report(
            &snapshot,
            Domain::Routines,
            ReportPeriod::Week,
            date(10),
            &ReportConfig::default(),
        );
        assert!(report.by_period.is_empty());
        assert_eq!(report.entities[0].current_streak, 1);
        assert_eq!(report.overall.numerator, 1);
        assert_eq!(report.window.len(), 7);
    }

    #[test]
    fn test_month_report_window() {
        let report = generate_completion_report(
            &Snapshot::default(),
            Domain::Habits,
            ReportPeriod::Month,
            date(10),
            &ReportConfig::default(),
        );
        assert_eq!(report.window.len(), 30);
        assert_eq!(report.daily.len(), 30);
        assert_eq!(report.overall.percentage, 0.0);
        assert_eq!(report.perfect_days, 0);
        assert!(report.top.is_empty());
        assert_eq!(report.by_period.len(), 3);
    }

    #[test]
    fn test_mood_report() {
        let snapshot = Snapshot {
            moods: vec![
                MoodRecord::new(date(9), Some(4)).with_emotions(["calm"]),
                MoodRecord::new(date(10), Some(2)).with_emotions(["calm", "tired"]),
            ],
            ..Default::default()
        };
        let report = generate_mood_report(
            &snapshot,
            ReportPeriod::Week,
            date(10),
            &ReportConfig::default(),
        );
        assert_eq!(report.days_logged, 2);
        assert_eq!(report.average.average_rating, Some(3.0));
        assert_eq!(report.rating_distribution, [0, 0, 1, 0, 1, 0]);
        assert_eq!(report.top_emotions[0].emotion_id, "calm");
        assert_eq!(report.top_emotions[0].count, 2);
        assert_eq!(report.daily.len(), 7);
    }

    #[test]
    fn test_mood_by_completion_matches_combined() {
        let snapshot = Snapshot {
            habits: vec![TrackedEntity::new("h", "Stretch")],
            habit_completions: vec![CompletionRecord::new("h", date(10), true)],
            moods: vec![MoodRecord::new(date(10), Some(5)), MoodRecord::new(date(9), Some(3))],
            ..Default::default()
        };
        let window = Window::resolve(ReportPeriod::Week, date(10));
        let (high, low) = mood_by_completion(&snapshot, Domain::Habits, &window);
        let combined = generate_combined_insights(&snapshot, ReportPeriod::Week, date(10));
        assert_eq!(high, combined.habit_mood_high);
        assert_eq!(low, combined.habit_mood_low);
        assert_eq!(high.mean, Some(5.0));
        assert_eq!(low.mean, Some(3.0));
    }
}
