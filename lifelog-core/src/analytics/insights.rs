//! Insight generation
//!
//! Insights are produced by a fixed, ordered battery of rules. Each rule
//! looks at precomputed [`InsightInputs`] and either yields one [`Insight`]
//! or nothing. Rules never look at each other's output.
//!
//! ## Rule battery
//!
//! | Rule | Fires when |
//! |------|------------|
//! | `habit.most_consistent` | top habit is at or above 80% |
//! | `habit.needs_attention` | 2+ habits and the bottom one is under 30% |
//! | `habit.best_weekday` | overall habit rate is under 60% and some weekday has completions |
//! | `habit.period_of_day` | best and worst period of day differ by 20+ points |
//! | `habit.perfect_days` | at least one day with every habit done |
//! | `habit.streak` | some habit has a current streak of 3+ days |
//! | `routine.most_consistent` | top routine is at or above 80% |
//! | `correlation.habits_mood` | at least one rated day with 70%+ habit completion |
//! | `correlation.routines_mood` | at least one rated day with 70%+ routine completion |
//! | `mood.average` | 3+ rated days averaging 4+ or 2 and below |
//! | `mood.top_emotion` | the most frequent emotion was tagged 3+ times |
//!
//! Output keeps battery order. If nothing fires, a single placeholder
//! insight is returned instead.

use serde::Serialize;

use super::correlate::{
    at_least, below, completion_series, conditional_average, mood_series,
    HIGH_COMPLETION_THRESHOLD,
};
use super::index::{CompletionIndex, MoodIndex};
use super::metrics::{
    best_bucket, entity_rates, entity_set_rate, perfect_days, period_buckets, rank, streak,
    weekday_buckets, worst_bucket, BucketAverage, CompletionRate, ConditionalAverage, EntityRate,
    MetricResult, RankOrder, Streak,
};
use super::mood::{average_rating, emotion_frequency, EmotionCount, MoodAverage};
use super::window::Window;
use crate::format::{capitalize, format_percentage, format_rating, plural};
use crate::types::{active_entities, Domain, Snapshot, TrackedEntity};

/// Top entity must reach this percentage to be called out.
pub const CONSISTENT_THRESHOLD: f64 = 80.0;
/// Bottom entity below this percentage is flagged.
pub const NEEDS_ATTENTION_THRESHOLD: f64 = 30.0;
/// Best-weekday insight only fires while overall completion is below this.
pub const BEST_WEEKDAY_CEILING: f64 = 60.0;
/// Minimum spread between best and worst period of day, in points.
pub const PERIOD_SPREAD_THRESHOLD: f64 = 20.0;
/// Minimum current streak worth mentioning.
pub const STREAK_THRESHOLD: u32 = 3;
/// Minimum rated days before commenting on the average mood.
pub const MIN_RATED_DAYS: u32 = 3;
/// Average rating at or above this is a good stretch.
pub const GOOD_MOOD_RATING: f64 = 4.0;
/// Average rating at or below this is a tough stretch.
pub const LOW_MOOD_RATING: f64 = 2.0;
/// Minimum occurrences before an emotion is reported.
pub const MIN_EMOTION_COUNT: u32 = 3;

/// Rule name used for the placeholder insight.
pub const FALLBACK_RULE: &str = "fallback";

/// A short natural-language finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    /// Name of the rule that produced this insight
    pub rule: &'static str,
    pub title: String,
    pub description: String,
    /// The metric the insight is based on
    pub metric: Option<MetricResult>,
}

impl Insight {
    fn new(
        rule: &'static str,
        title: impl Into<String>,
        description: impl Into<String>,
        metric: MetricResult,
    ) -> Self {
        Self {
            rule,
            title: title.into(),
            description: description.into(),
            metric: Some(metric),
        }
    }

    /// Placeholder shown when no rule has enough data to fire.
    pub fn fallback() -> Self {
        Self {
            rule: FALLBACK_RULE,
            title: "Keep tracking".to_string(),
            description: "Keep tracking to unlock insights. A few more days of habits, \
                          routines and moods will reveal your patterns."
                .to_string(),
            metric: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.rule == FALLBACK_RULE
    }
}

/// Everything the rule battery reads, computed once per invocation.
#[derive(Debug, Clone)]
pub struct InsightInputs<'a> {
    pub snapshot: &'a Snapshot,
    pub window_length: u32,
    pub habit_rates: Vec<EntityRate>,
    pub routine_rates: Vec<EntityRate>,
    pub habit_overall: CompletionRate,
    pub habit_weekdays: Vec<BucketAverage>,
    pub habit_periods: Vec<BucketAverage>,
    pub habit_perfect_days: u32,
    /// Current streaks of active habits, insertion order
    pub habit_streaks: Vec<Streak>,
    /// Mood on days with high habit completion
    pub habit_mood: ConditionalAverage,
    /// Mood on the remaining rated days
    pub habit_mood_low: ConditionalAverage,
    pub routine_mood: ConditionalAverage,
    pub routine_mood_low: ConditionalAverage,
    pub mood: MoodAverage,
    pub top_emotions: Vec<EmotionCount>,
}

impl<'a> InsightInputs<'a> {
    /// Run every calculator the battery needs over `window`.
    pub fn compute(snapshot: &'a Snapshot, window: &Window) -> Self {
        let habit_index = CompletionIndex::build(&snapshot.habit_completions);
        let routine_index = CompletionIndex::build(&snapshot.routine_completions);
        let mood_index = MoodIndex::build(&snapshot.moods);

        let habits = &snapshot.habits;
        let routines = &snapshot.routines;

        let habit_series = completion_series(&habit_index, habits, window);
        let routine_series = completion_series(&routine_index, routines, window);
        let moods = mood_series(&mood_index, window);

        let habit_streaks = active_entities(habits)
            .into_iter()
            .map(|h| streak(&habit_index, &h.id, window.end_date))
            .collect();

        Self {
            snapshot,
            window_length: window.len() as u32,
            habit_rates: entity_rates(&habit_index, habits, window),
            routine_rates: entity_rates(&routine_index, routines, window),
            habit_overall: entity_set_rate(&habit_index, habits, window),
            habit_weekdays: weekday_buckets(&habit_index, habits, window),
            habit_periods: period_buckets(&habit_index, habits, window),
            habit_perfect_days: perfect_days(&habit_index, habits, window),
            habit_streaks,
            habit_mood: conditional_average(
                &habit_series,
                &moods,
                at_least(HIGH_COMPLETION_THRESHOLD),
            ),
            habit_mood_low: conditional_average(
                &habit_series,
                &moods,
                below(HIGH_COMPLETION_THRESHOLD),
            ),
            routine_mood: conditional_average(
                &routine_series,
                &moods,
                at_least(HIGH_COMPLETION_THRESHOLD),
            ),
            routine_mood_low: conditional_average(
                &routine_series,
                &moods,
                below(HIGH_COMPLETION_THRESHOLD),
            ),
            mood: average_rating(&mood_index, window),
            top_emotions: emotion_frequency(&mood_index, window, 1),
        }
    }

    /// Display name for an entity id in a domain.
    fn name(&self, domain: Domain, id: &str) -> String {
        self.snapshot
            .entities(domain)
            .iter()
            .find(|e| e.id == id)
            .map(TrackedEntity::display_name)
            .unwrap_or(id)
            .to_string()
    }

    fn rate_of(&self, domain: Domain, id: &str) -> Option<&CompletionRate> {
        let rates = match domain {
            Domain::Habits => &self.habit_rates,
            Domain::Routines => &self.routine_rates,
        };
        rates.iter().find(|r| r.entity_id == id).map(|r| &r.rate)
    }
}

/// One entry of the rule battery.
#[derive(Clone, Copy)]
pub struct InsightRule {
    pub name: &'static str,
    pub evaluate: fn(&InsightInputs<'_>) -> Option<Insight>,
}

impl std::fmt::Debug for InsightRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightRule").field("name", &self.name).finish()
    }
}

/// The battery, in output order.
pub const RULES: &[InsightRule] = &[
    InsightRule {
        name: "habit.most_consistent",
        evaluate: habit_most_consistent,
    },
    InsightRule {
        name: "habit.needs_attention",
        evaluate: habit_needs_attention,
    },
    InsightRule {
        name: "habit.best_weekday",
        evaluate: habit_best_weekday,
    },
    InsightRule {
        name: "habit.period_of_day",
        evaluate: habit_period_of_day,
    },
    InsightRule {
        name: "habit.perfect_days",
        evaluate: habit_perfect_days,
    },
    InsightRule {
        name: "habit.streak",
        evaluate: habit_streak,
    },
    InsightRule {
        name: "routine.most_consistent",
        evaluate: routine_most_consistent,
    },
    InsightRule {
        name: "correlation.habits_mood",
        evaluate: correlation_habits_mood,
    },
    InsightRule {
        name: "correlation.routines_mood",
        evaluate: correlation_routines_mood,
    },
    InsightRule {
        name: "mood.average",
        evaluate: mood_average,
    },
    InsightRule {
        name: "mood.top_emotion",
        evaluate: mood_top_emotion,
    },
];

/// Names of the rules in battery order.
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|r| r.name).collect()
}

/// Run the battery. Never returns an empty list.
pub fn generate_insights(inputs: &InsightInputs<'_>) -> Vec<Insight> {
    let mut insights: Vec<Insight> = RULES
        .iter()
        .filter_map(|rule| {
            let insight = (rule.evaluate)(inputs);
            if insight.is_some() {
                tracing::debug!(rule = rule.name, "Insight rule fired");
            }
            insight
        })
        .collect();

    if insights.is_empty() {
        tracing::debug!("No insight rule fired, using fallback");
        insights.push(Insight::fallback());
    }

    insights
}

// ============================================
// Rules
// ============================================

fn most_consistent(
    inputs: &InsightInputs<'_>,
    domain: Domain,
    rule: &'static str,
) -> Option<Insight> {
    let rates = match domain {
        Domain::Habits => &inputs.habit_rates,
        Domain::Routines => &inputs.routine_rates,
    };
    let top = rank(rates, RankOrder::Top, 1).into_iter().next()?;
    if top.percentage < CONSISTENT_THRESHOLD {
        return None;
    }
    let rate = inputs.rate_of(domain, &top.entity_id)?;
    let description = format!(
        "{} was completed on {} of {} days ({}).",
        inputs.name(domain, &top.entity_id),
        rate.numerator,
        rate.denominator,
        format_percentage(top.percentage)
    );
    Some(Insight::new(
        rule,
        format!("Most consistent {}", domain.noun()),
        description,
        MetricResult::RankedEntity(top),
    ))
}

fn habit_most_consistent(inputs: &InsightInputs<'_>) -> Option<Insight> {
    most_consistent(inputs, Domain::Habits, "habit.most_consistent")
}

fn routine_most_consistent(inputs: &InsightInputs<'_>) -> Option<Insight> {
    most_consistent(inputs, Domain::Routines, "routine.most_consistent")
}

fn habit_needs_attention(inputs: &InsightInputs<'_>) -> Option<Insight> {
    if inputs.habit_rates.len() < 2 {
        return None;
    }
    let bottom = rank(&inputs.habit_rates, RankOrder::Bottom, 1)
        .into_iter()
        .next()?;
    if bottom.percentage >= NEEDS_ATTENTION_THRESHOLD {
        return None;
    }
    let rate = inputs.rate_of(Domain::Habits, &bottom.entity_id)?;
    let description = format!(
        "{} was completed on only {} of {} days ({}). A smaller version of it might stick.",
        inputs.name(Domain::Habits, &bottom.entity_id),
        rate.numerator,
        rate.denominator,
        format_percentage(bottom.percentage)
    );
    Some(Insight::new(
        "habit.needs_attention",
        "Needs attention",
        description,
        MetricResult::RankedEntity(bottom),
    ))
}

fn habit_best_weekday(inputs: &InsightInputs<'_>) -> Option<Insight> {
    let overall = &inputs.habit_overall;
    if overall.denominator == 0 || overall.percentage >= BEST_WEEKDAY_CEILING {
        return None;
    }
    let best = best_bucket(&inputs.habit_weekdays)?;
    if best.average_percentage <= 0.0 {
        return None;
    }
    let description = format!(
        "You complete the most habits on {}s ({}), compared with {} overall.",
        best.bucket_key,
        format_percentage(best.average_percentage),
        format_percentage(overall.percentage)
    );
    Some(Insight::new(
        "habit.best_weekday",
        format!("{} is your best day", best.bucket_key),
        description,
        MetricResult::BucketAverage(best.clone()),
    ))
}

fn habit_period_of_day(inputs: &InsightInputs<'_>) -> Option<Insight> {
    let best = best_bucket(&inputs.habit_periods)?;
    let worst = worst_bucket(&inputs.habit_periods)?;
    if best.bucket_key == worst.bucket_key
        || best.average_percentage - worst.average_percentage < PERIOD_SPREAD_THRESHOLD
    {
        return None;
    }
    let description = format!(
        "{} habits are completed {} of the time, versus {} for {} habits.",
        capitalize(&best.bucket_key),
        format_percentage(best.average_percentage),
        format_percentage(worst.average_percentage),
        worst.bucket_key
    );
    Some(Insight::new(
        "habit.period_of_day",
        format!("{} is your strongest time", capitalize(&best.bucket_key)),
        description,
        MetricResult::BucketAverage(best.clone()),
    ))
}

fn habit_perfect_days(inputs: &InsightInputs<'_>) -> Option<Insight> {
    let count = inputs.habit_perfect_days;
    if count == 0 {
        return None;
    }
    let description = format!(
        "You completed every habit on {} of the last {} days.",
        count, inputs.window_length
    );
    Some(Insight::new(
        "habit.perfect_days",
        "Perfect days",
        description,
        MetricResult::DayCount {
            count,
            window_length: inputs.window_length,
        },
    ))
}

fn habit_streak(inputs: &InsightInputs<'_>) -> Option<Insight> {
    // First of the longest streaks in insertion order.
    let best = inputs
        .habit_streaks
        .iter()
        .fold(None, |best: Option<&Streak>, s| match best {
            Some(current) if current.length_in_days >= s.length_in_days => Some(current),
            _ => Some(s),
        })?;
    if best.length_in_days < STREAK_THRESHOLD {
        return None;
    }
    let description = format!(
        "{} is on a {}-day streak. Keep it going!",
        inputs.name(Domain::Habits, &best.entity_id),
        best.length_in_days
    );
    Some(Insight::new(
        "habit.streak",
        "On a roll",
        description,
        MetricResult::Streak(best.clone()),
    ))
}

fn mood_correlation(
    high: &ConditionalAverage,
    low: &ConditionalAverage,
    domain: Domain,
    rule: &'static str,
) -> Option<Insight> {
    let mean = high.mean?;
    let mut description = format!(
        "On days you complete at least {} of your {}, your mood averages {} ({}).",
        format_percentage(HIGH_COMPLETION_THRESHOLD),
        domain.as_str(),
        format_rating(mean),
        plural(high.count, "day")
    );
    if let Some(other) = low.mean {
        description.push_str(&format!(" On other days it averages {}.", format_rating(other)));
    }
    Some(Insight::new(
        rule,
        format!("{} and mood", capitalize(domain.as_str())),
        description,
        MetricResult::ConditionalAverage(*high),
    ))
}

fn correlation_habits_mood(inputs: &InsightInputs<'_>) -> Option<Insight> {
    mood_correlation(
        &inputs.habit_mood,
        &inputs.habit_mood_low,
        Domain::Habits,
        "correlation.habits_mood",
    )
}

fn correlation_routines_mood(inputs: &InsightInputs<'_>) -> Option<Insight> {
    mood_correlation(
        &inputs.routine_mood,
        &inputs.routine_mood_low,
        Domain::Routines,
        "correlation.routines_mood",
    )
}

fn mood_average(inputs: &InsightInputs<'_>) -> Option<Insight> {
    let rated_days = inputs.mood.rated_days;
    let average = inputs.mood.average_rating?;
    if rated_days < MIN_RATED_DAYS {
        return None;
    }
    let (title, tail) = if average >= GOOD_MOOD_RATING {
        ("A good stretch", "Whatever you're doing, it's working.")
    } else if average <= LOW_MOOD_RATING {
        ("A tough stretch", "Be gentle with yourself.")
    } else {
        return None;
    };
    let description = format!(
        "Your mood averaged {} over {}. {}",
        format_rating(average),
        plural(rated_days, "rated day"),
        tail
    );
    Some(Insight::new(
        "mood.average",
        title,
        description,
        MetricResult::MoodAverage {
            average_rating: average,
            rated_days,
        },
    ))
}

fn mood_top_emotion(inputs: &InsightInputs<'_>) -> Option<Insight> {
    let top = inputs.top_emotions.first()?;
    if top.count < MIN_EMOTION_COUNT {
        return None;
    }
    let description = format!(
        "You felt {} on {} in this period.",
        top.emotion_id,
        plural(top.count, "day")
    );
    Some(Insight::new(
        "mood.top_emotion",
        "Most frequent feeling",
        description,
        MetricResult::EmotionFrequency {
            emotion_id: top.emotion_id.clone(),
            count: top.count,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::window::ReportPeriod;
    use crate::types::{CompletionRecord, DayPeriod, MoodRecord};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn week() -> Window {
        Window::resolve(ReportPeriod::Week, date(10))
    }

    fn done(id: &str, days: &[u32]) -> Vec<CompletionRecord> {
        days.iter()
            .map(|&d| CompletionRecord::new(id, date(d), true))
            .collect()
    }

    fn rules_fired(insights: &[Insight]) -> Vec<&'static str> {
        insights.iter().map(|i| i.rule).collect()
    }

    #[test]
    fn test_empty_input_yields_only_fallback() {
        let snapshot = Snapshot::default();
        let inputs = InsightInputs::compute(&snapshot, &week());
        let insights = generate_insights(&inputs);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].is_fallback());
        assert!(insights[0].description.contains("Keep tracking to unlock insights"));
    }

    #[test]
    fn test_empty_window_yields_only_fallback() {
        let snapshot = Snapshot {
            habits: vec![TrackedEntity::new("a", "Read")],
            habit_completions: done("a", &[10]),
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&snapshot, &Window::empty(date(10)));
        let insights = generate_insights(&inputs);
        assert_eq!(rules_fired(&insights), vec![FALLBACK_RULE]);
    }

    #[test]
    fn test_rule_names_match_battery() {
        let names = rule_names();
        assert_eq!(names.len(), RULES.len());
        assert_eq!(names[0], "habit.most_consistent");
        assert_eq!(names.last(), Some(&"mood.top_emotion"));
    }

    #[test]
    fn test_output_follows_battery_order() {
        let snapshot = Snapshot {
            habits: vec![
                TrackedEntity::new("a", "Read").with_period(DayPeriod::Morning),
                TrackedEntity::new("b", "Floss").with_period(DayPeriod::Night),
            ],
            habit_completions: done("a", &[4, 5, 6, 7, 8, 9, 10]),
            moods: (4..=10)
                .map(|d| MoodRecord::new(date(d), Some(5)).with_emotions(["calm"]))
                .collect(),
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&snapshot, &week());
        let insights = generate_insights(&inputs);

        assert_eq!(
            rules_fired(&insights),
            vec![
                "habit.most_consistent",
                "habit.needs_attention",
                "habit.best_weekday",
                "habit.period_of_day",
                "habit.streak",
                "mood.average",
                "mood.top_emotion",
            ]
        );
        assert!(insights[0].description.starts_with("Read was completed on 7 of 7 days"));
        assert!(insights[1].description.starts_with("Floss"));
        assert_eq!(insights[3].title, "Morning is your strongest time");
    }

    #[test]
    fn test_correlation_rule_suppressed_without_qualifying_days() {
        let snapshot = Snapshot {
            habits: vec![TrackedEntity::new("a", "Read")],
            habit_completions: done("a", &[4]),
            moods: vec![MoodRecord::new(date(5), Some(4))],
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&snapshot, &week());
        assert_eq!(inputs.habit_mood.mean, None);
        assert_eq!(inputs.habit_mood.count, 0);
        let insights = generate_insights(&inputs);
        assert!(!rules_fired(&insights).contains(&"correlation.habits_mood"));
    }

    #[test]
    fn test_correlation_rule_fires_with_comparison() {
        let snapshot = Snapshot {
            routines: vec![TrackedEntity::new("r", "Tidy desk")],
            routine_completions: done("r", &[4, 5]),
            moods: vec![
                MoodRecord::new(date(4), Some(5)),
                MoodRecord::new(date(5), Some(4)),
                MoodRecord::new(date(6), Some(2)),
            ],
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&snapshot, &week());
        let insights = generate_insights(&inputs);
        let insight = insights
            .iter()
            .find(|i| i.rule == "correlation.routines_mood")
            .expect("routine correlation should fire");
        assert_eq!(insight.title, "Routines and mood");
        assert!(insight.description.contains("4.5/5"));
        assert!(insight.description.contains("2 days"));
        assert!(insight.description.contains("On other days it averages 2.0/5"));
        assert_eq!(
            insight.metric,
            Some(MetricResult::ConditionalAverage(ConditionalAverage {
                mean: Some(4.5),
                count: 2
            }))
        );
    }

    #[test]
    fn test_best_weekday_needs_low_overall_rate() {
        let habits = vec![TrackedEntity::new("a", "Read")];
        let high = Snapshot {
            habits: habits.clone(),
            habit_completions: done("a", &[4, 5, 6, 7, 8]),
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&high, &week());
        assert!(!rules_fired(&generate_insights(&inputs)).contains(&"habit.best_weekday"));

        let low = Snapshot {
            habits,
            habit_completions: done("a", &[6]),
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&low, &week());
        let insights = generate_insights(&inputs);
        let insight = insights
            .iter()
            .find(|i| i.rule == "habit.best_weekday")
            .expect("best weekday should fire");
        assert_eq!(insight.title, "Wednesday is your best day");
    }

    #[test]
    fn test_perfect_days_rule() {
        let snapshot = Snapshot {
            habits: vec![TrackedEntity::new("a", "Read"), TrackedEntity::new("b", "Walk")],
            habit_completions: [done("a", &[9, 10]), done("b", &[10])].concat(),
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&snapshot, &week());
        let insights = generate_insights(&inputs);
        let perfect = insights
            .iter()
            .find(|i| i.rule == "habit.perfect_days")
            .expect("perfect days should fire");
        assert_eq!(
            perfect.description,
            "You completed every habit on 1 of the last 7 days."
        );
    }

    #[test]
    fn test_streak_rule_picks_first_longest() {
        let snapshot = Snapshot {
            habits: vec![
                TrackedEntity::new("a", "Read"),
                TrackedEntity::new("b", "Walk"),
                TrackedEntity::new("c", "Journal"),
            ],
            habit_completions: [done("a", &[9, 10]), done("b", &[8, 9, 10]), done("c", &[8, 9, 10])]
                .concat(),
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&snapshot, &week());
        let insight = generate_insights(&inputs)
            .into_iter()
            .find(|i| i.rule == "habit.streak")
            .expect("streak should fire");
        assert!(insight.description.starts_with("Walk is on a 3-day streak"));
    }

    #[test]
    fn test_mood_average_middle_is_silent() {
        let snapshot = Snapshot {
            moods: vec![
                MoodRecord::new(date(4), Some(3)),
                MoodRecord::new(date(5), Some(3)),
                MoodRecord::new(date(6), Some(3)),
            ],
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&snapshot, &week());
        assert_eq!(rules_fired(&generate_insights(&inputs)), vec![FALLBACK_RULE]);

        let tough = Snapshot {
            moods: vec![
                MoodRecord::new(date(4), Some(1)),
                MoodRecord::new(date(5), Some(2)),
                MoodRecord::new(date(6), Some(2)),
            ],
            ..Default::default()
        };
        let inputs = InsightInputs::compute(&tough, &week());
        let insights = generate_insights(&inputs);
        assert_eq!(insights[0].title, "A tough stretch");
    }

    #[test]
    fn test_insight_serializes_metric_kind() {
        let insight = Insight::new(
            "habit.perfect_days",
            "Perfect days",
            "x",
            MetricResult::DayCount {
                count: 2,
                window_length: 7,
            },
        );
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["metric"]["kind"], "day_count");
        assert_eq!(json["metric"]["count"], 2);
        assert_eq!(json["rule"], "habit.perfect_days");
    }
}
