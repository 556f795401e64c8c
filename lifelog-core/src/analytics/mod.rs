//! Analytics module for lifelog
//!
//! Turns habit completions, routine completions and mood entries into
//! descriptive metrics and short insights:
//! - Window resolution (last 7 or 30 days)
//! - Keyed completion and mood indexes
//! - Completion rates, streaks, weekday and period-of-day buckets, rankings
//! - Mood averages, distributions and emotion frequency
//! - Cross-domain conditional averages (habits vs. mood, routines vs. mood)
//! - A fixed rule battery producing insights
//!
//! ## Pipeline
//!
//! ```text
//! Snapshot ──► Window + CompletionIndex/MoodIndex ──► metrics / mood
//!                                                       │
//!                                                       ▼
//!                                                   correlate ──► insights
//! ```
//!
//! Everything here is a pure function of its inputs. Nothing is cached
//! between calls, so reports can be computed on separate threads freely.

pub mod correlate;
pub mod index;
pub mod insights;
pub mod metrics;
pub mod mood;
pub mod report;
pub mod window;

pub use correlate::{conditional_average, DateSeries, HIGH_COMPLETION_THRESHOLD};
pub use index::{CompletionIndex, MoodIndex};
pub use insights::{generate_insights, rule_names, Insight, InsightInputs, InsightRule, RULES};
pub use metrics::{
    BucketAverage, CompletionRate, ConditionalAverage, MetricResult, RankOrder, RankedEntity,
    Streak, STREAK_CAP,
};
pub use report::{
    generate_all, generate_combined_insights, generate_completion_report, generate_mood_report,
    CombinedInsights, CompletionReport, EntitySummary, LifeReport, MoodReport, ReportConfig,
};
pub use window::{ReportPeriod, Window};
