//! lifelog-report - habit, routine and mood reports from the command line
//!
//! Loads a snapshot (JSON file or the local SQLite database), runs the
//! analytics engine for a week or month window and prints the result.

use lifelog_core::analytics::{
    generate_all, generate_combined_insights, generate_completion_report, generate_mood_report,
    CombinedInsights, CompletionReport, LifeReport, MoodReport, ReportConfig, ReportPeriod,
};
use lifelog_core::format::{capitalize, format_percentage, format_rating_opt, plural};
use lifelog_core::{Config, Database, Domain, EventStore, JsonSnapshotStore, Snapshot};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "lifelog-report")]
#[command(about = "Behavioral reports for habits, routines and mood")]
#[command(version)]
struct Args {
    /// Report period: week or month (default: from config)
    #[arg(long, global = true)]
    period: Option<String>,

    /// Reference date, the last day of the window (format: YYYY-MM-DD, default: today)
    #[arg(long, global = true)]
    date: Option<String>,

    /// Read a JSON snapshot instead of the database
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long, global = true)]
    export: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Habit completion report
    Habits,
    /// Routine completion report
    Routines,
    /// Mood report
    Mood,
    /// Cross-domain correlations and insights
    Insights,
    /// Every report
    All,
    /// Import a JSON snapshot into the database
    Import {
        /// Snapshot file to import
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Terminal,
    Markdown,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = lifelog_core::logging::init(&config.logging).ok();

    let format = match args.export.as_deref() {
        None => ExportFormat::Terminal,
        Some("md") => ExportFormat::Markdown,
        Some("json") => ExportFormat::Json,
        Some(other) => bail!("Unknown export format: {}. Use 'md' or 'json'", other),
    };

    match &args.command {
        Command::Import { file } => import(file),
        Command::Habits => {
            print_completion(&ReportContext::resolve(&args, &config)?, Domain::Habits, format)
        }
        Command::Routines => {
            print_completion(&ReportContext::resolve(&args, &config)?, Domain::Routines, format)
        }
        Command::Mood => print_mood(&ReportContext::resolve(&args, &config)?, format),
        Command::Insights => print_insights(&ReportContext::resolve(&args, &config)?, format),
        Command::All => print_all(&ReportContext::resolve(&args, &config)?, format),
    }
}

/// Everything a report needs, resolved from flags and config.
struct ReportContext {
    period: ReportPeriod,
    reference_date: NaiveDate,
    snapshot: Snapshot,
    config: ReportConfig,
}

impl ReportContext {
    fn resolve(args: &Args, config: &Config) -> Result<Self> {
        let period = match &args.period {
            Some(value) => value.parse::<ReportPeriod>()?,
            None => config
                .reports
                .period()
                .context("invalid default_period in config")?,
        };

        let reference_date = match &args.date {
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", value))?,
            None => Local::now().date_naive(),
        };

        let snapshot = load_snapshot(args.snapshot.as_deref())?;
        if snapshot.is_empty() {
            tracing::warn!("Snapshot has no habits, routines or moods");
        }

        tracing::info!(
            command = ?args.command,
            period = %period,
            %reference_date,
            "Generating report"
        );

        Ok(Self {
            period,
            reference_date,
            snapshot,
            config: config.reports.report_config(),
        })
    }
}

fn print_completion(ctx: &ReportContext, domain: Domain, format: ExportFormat) -> Result<()> {
    let report = generate_completion_report(
        &ctx.snapshot,
        domain,
        ctx.period,
        ctx.reference_date,
        &ctx.config,
    );
    match format {
        ExportFormat::Json => print_json(&report)?,
        ExportFormat::Markdown => print_completion_markdown(&report),
        ExportFormat::Terminal => {
            let title = format!("{} - {}", capitalize(domain.as_str()), ctx.period.display_name());
            print_header(&title);
            print_completion_terminal(&report);
        }
    }
    Ok(())
}

fn print_mood(ctx: &ReportContext, format: ExportFormat) -> Result<()> {
    let report = generate_mood_report(&ctx.snapshot, ctx.period, ctx.reference_date, &ctx.config);
    match format {
        ExportFormat::Json => print_json(&report)?,
        ExportFormat::Markdown => print_mood_markdown(&report),
        ExportFormat::Terminal => {
            print_header(&format!("Mood - {}", ctx.period.display_name()));
            print_mood_terminal(&report);
        }
    }
    Ok(())
}

fn print_insights(ctx: &ReportContext, format: ExportFormat) -> Result<()> {
    let combined = generate_combined_insights(&ctx.snapshot, ctx.period, ctx.reference_date);
    match format {
        ExportFormat::Json => print_json(&combined)?,
        ExportFormat::Markdown => print_insights_markdown(&combined),
        ExportFormat::Terminal => {
            print_header(&format!("Insights - {}", ctx.period.display_name()));
            print_insights_terminal(&combined);
        }
    }
    Ok(())
}

fn print_all(ctx: &ReportContext, format: ExportFormat) -> Result<()> {
    let report = generate_all(&ctx.snapshot, ctx.period, ctx.reference_date, &ctx.config);
    match format {
        ExportFormat::Json => print_json(&report)?,
        ExportFormat::Markdown => print_all_markdown(&report),
        ExportFormat::Terminal => print_all_terminal(&report),
    }
    Ok(())
}

fn open_database() -> Result<Database> {
    let db_path = Config::database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    db.migrate().context("failed to run database migrations")?;
    Ok(db)
}

fn load_snapshot(snapshot: Option<&Path>) -> Result<Snapshot> {
    let store: Box<dyn EventStore> = match snapshot {
        Some(path) => Box::new(JsonSnapshotStore::new(path)),
        None => Box::new(open_database()?),
    };
    let snapshot = store
        .load_snapshot()
        .with_context(|| format!("failed to load snapshot from {} store", store.name()))?;
    Ok(snapshot)
}

fn import(file: &Path) -> Result<()> {
    let snapshot = JsonSnapshotStore::new(file)
        .load_snapshot()
        .with_context(|| format!("failed to read snapshot {}", file.display()))?;

    let db = open_database()?;
    let result = db
        .import_snapshot(&snapshot)
        .context("failed to import snapshot")?;
    let counts = db.counts().context("failed to count records")?;

    println!(
        "Imported {} habits/routines, {} completions and {} mood entries.",
        result.entities, result.completions, result.moods
    );
    println!(
        "Database now holds {} habits, {} routines, {} habit completions, \
         {} routine completions and {} mood entries.",
        counts.habits,
        counts.routines,
        counts.habit_completions,
        counts.routine_completions,
        counts.moods
    );
    Ok(())
}

// ============================================
// Terminal output
// ============================================

fn print_header(title: &str) {
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();
}

fn entity_name<'a>(report: &'a CompletionReport, entity_id: &'a str) -> &'a str {
    report
        .entities
        .iter()
        .find(|e| e.entity_id == entity_id)
        .map(|e| e.name.as_str())
        .unwrap_or(entity_id)
}

fn print_completion_terminal(report: &CompletionReport) {
    let noun = report.domain.noun();
    println!(
        "   {} to {}  ({})",
        report.window.start_date,
        report.window.end_date,
        plural(report.active_count as u32, &format!("active {}", noun))
    );
    println!();

    if report.active_count == 0 {
        println!("  No active {} to report on.", report.domain.as_str());
        println!();
        return;
    }

    println!(
        "SUMMARY\n   Completion: {} ({} of {})   Perfect days: {}",
        format_percentage(report.overall.percentage),
        report.overall.numerator,
        report.overall.denominator,
        report.perfect_days
    );
    println!();

    println!("{}", report.domain.as_str().to_uppercase());
    for entity in &report.entities {
        println!(
            "   {:<24} {:>5}   streak {:>3}   best run {:>3}",
            entity.name,
            format_percentage(entity.rate.percentage),
            entity.current_streak,
            entity.longest_streak_in_window
        );
    }
    println!();

    println!("TOP");
    for ranked in &report.top {
        println!(
            "   {}. {} ({})",
            ranked.rank,
            entity_name(report, &ranked.entity_id),
            format_percentage(ranked.percentage)
        );
    }
    println!("BOTTOM");
    for ranked in &report.bottom {
        println!(
            "   {}. {} ({})",
            ranked.rank,
            entity_name(report, &ranked.entity_id),
            format_percentage(ranked.percentage)
        );
    }
    println!();

    println!("BY WEEKDAY");
    for bucket in report.by_weekday.iter().filter(|b| b.sample_count > 0) {
        println!(
            "   {:<10} {:>5}",
            bucket.bucket_key,
            format_percentage(bucket.average_percentage)
        );
    }
    if !report.by_period.is_empty() {
        println!("BY TIME OF DAY");
        for bucket in report.by_period.iter().filter(|b| b.sample_count > 0) {
            println!(
                "   {:<10} {:>5}",
                capitalize(&bucket.bucket_key),
                format_percentage(bucket.average_percentage)
            );
        }
    }
    println!();
}

fn print_mood_terminal(report: &MoodReport) {
    println!(
        "   {} to {}  ({} logged)",
        report.window.start_date,
        report.window.end_date,
        plural(report.days_logged, "day")
    );
    println!();

    if report.days_logged == 0 {
        println!("  No mood entries found for this period.");
        println!();
        return;
    }

    println!(
        "SUMMARY\n   Average rating: {}   Rated days: {}",
        format_rating_opt(report.average.average_rating),
        report.average.rated_days
    );
    println!();

    println!("RATINGS");
    for (rating, count) in report.rating_distribution.iter().enumerate() {
        println!("   {} {:<30} {}", rating, "#".repeat(*count as usize), count);
    }
    println!();

    if !report.top_emotions.is_empty() {
        println!("TOP EMOTIONS");
        for (i, emotion) in report.top_emotions.iter().enumerate() {
            println!("   {}. {} ({})", i + 1, emotion.emotion_id, emotion.count);
        }
        println!();
    }

    println!("BY WEEKDAY");
    for bucket in report.by_weekday.iter().filter(|b| b.sample_count > 0) {
        println!(
            "   {:<10} {}",
            bucket.bucket_key,
            format_rating_opt(bucket.average_rating)
        );
    }
    println!();
}

fn print_insights_terminal(combined: &CombinedInsights) {
    println!("MOOD VS COMPLETION");
    println!(
        "   Habits   high: {}  low: {}",
        format_rating_opt(combined.habit_mood_high.mean),
        format_rating_opt(combined.habit_mood_low.mean)
    );
    println!(
        "   Routines high: {}  low: {}",
        format_rating_opt(combined.routine_mood_high.mean),
        format_rating_opt(combined.routine_mood_low.mean)
    );
    println!();

    println!("INSIGHTS");
    for insight in &combined.insights {
        println!("   * {}", insight.title);
        println!("     {}", insight.description);
    }
    println!();
}

fn print_all_terminal(report: &LifeReport) {
    let period = report.combined.period.display_name();
    print_header(&format!("Habits - {}", period));
    print_completion_terminal(&report.habits);
    print_header(&format!("Routines - {}", period));
    print_completion_terminal(&report.routines);
    print_header(&format!("Mood - {}", period));
    print_mood_terminal(&report.mood);
    print_header(&format!("Insights - {}", period));
    print_insights_terminal(&report.combined);
}

// ============================================
// Markdown output
// ============================================

fn print_completion_markdown(report: &CompletionReport) {
    println!(
        "# {} Report: {}",
        capitalize(report.domain.as_str()),
        report.period.display_name()
    );
    println!();
    println!("*{} to {}*", report.window.start_date, report.window.end_date);
    println!();

    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Active {} | {} |", report.domain.as_str(), report.active_count);
    println!("| Completion | {} |", format_percentage(report.overall.percentage));
    println!("| Perfect days | {} |", report.perfect_days);
    println!();

    if !report.entities.is_empty() {
        println!("## {}", capitalize(report.domain.as_str()));
        println!();
        println!("| Name | Completion | Current streak | Best run |");
        println!("|------|------------|----------------|----------|");
        for entity in &report.entities {
            println!(
                "| {} | {} | {} | {} |",
                entity.name,
                format_percentage(entity.rate.percentage),
                entity.current_streak,
                entity.longest_streak_in_window
            );
        }
        println!();
    }

    if !report.top.is_empty() {
        println!("## Top and Bottom");
        println!();
        for ranked in &report.top {
            println!(
                "- **{}** {} ({})",
                ranked.rank,
                entity_name(report, &ranked.entity_id),
                format_percentage(ranked.percentage)
            );
        }
        println!();
        for ranked in &report.bottom {
            println!(
                "- *{}* {} ({})",
                ranked.rank,
                entity_name(report, &ranked.entity_id),
                format_percentage(ranked.percentage)
            );
        }
        println!();
    }

    println!("## By Weekday");
    println!();
    for bucket in report.by_weekday.iter().filter(|b| b.sample_count > 0) {
        println!(
            "- **{}:** {}",
            bucket.bucket_key,
            format_percentage(bucket.average_percentage)
        );
    }
    println!();
}

fn print_mood_markdown(report: &MoodReport) {
    println!("# Mood Report: {}", report.period.display_name());
    println!();
    println!("*{} to {}*", report.window.start_date, report.window.end_date);
    println!();

    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Days logged | {} |", report.days_logged);
    println!(
        "| Average rating | {} |",
        format_rating_opt(report.average.average_rating)
    );
    println!();

    println!("## Ratings");
    println!();
    println!("| Rating | Days |");
    println!("|--------|------|");
    for (rating, count) in report.rating_distribution.iter().enumerate() {
        println!("| {} | {} |", rating, count);
    }
    println!();

    if !report.top_emotions.is_empty() {
        println!("## Top Emotions");
        println!();
        for (i, emotion) in report.top_emotions.iter().enumerate() {
            println!("{}. **{}** - {}", i + 1, emotion.emotion_id, emotion.count);
        }
        println!();
    }
}

fn print_insights_markdown(combined: &CombinedInsights) {
    println!("# Insights: {}", combined.period.display_name());
    println!();
    println!("| Completion | Habits | Routines |");
    println!("|------------|--------|----------|");
    println!(
        "| High | {} | {} |",
        format_rating_opt(combined.habit_mood_high.mean),
        format_rating_opt(combined.routine_mood_high.mean)
    );
    println!(
        "| Low | {} | {} |",
        format_rating_opt(combined.habit_mood_low.mean),
        format_rating_opt(combined.routine_mood_low.mean)
    );
    println!();

    for insight in &combined.insights {
        println!("- **{}** {}", insight.title, insight.description);
    }
    println!();
}

fn print_all_markdown(report: &LifeReport) {
    print_completion_markdown(&report.habits);
    print_completion_markdown(&report.routines);
    print_mood_markdown(&report.mood);
    print_insights_markdown(&report.combined);
    println!("---");
    println!("*Generated by lifelog-report*");
}

// ============================================
// JSON output
// ============================================

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
