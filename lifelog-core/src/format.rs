//! Formatting helpers shared by insights and report output.

use chrono::Weekday;

/// Full English weekday name (e.g., "Monday").
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Format a 0-100 percentage for display (e.g., "71%").
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.0}%", percentage)
}

/// Format a mood rating for display (e.g., "4.7/5").
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}/5", rating)
}

/// Format an optional rating, or "-" if missing.
pub fn format_rating_opt(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format_rating(r),
        None => "-".to_string(),
    }
}

/// "1 day", "3 days".
pub fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Uppercase the first character ("morning" -> "Morning").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_percentage(71.428), "71%");
        assert_eq!(format_percentage(0.0), "0%");
        assert_eq!(format_rating(4.666), "4.7/5");
        assert_eq!(format_rating_opt(None), "-");
        assert_eq!(plural(1, "day"), "1 day");
        assert_eq!(plural(0, "day"), "0 days");
        assert_eq!(capitalize("night"), "Night");
        assert_eq!(capitalize(""), "");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }
}
