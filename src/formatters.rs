use chrono::NaiveDate;

use crate::models::{AdvisoryItem, AdvisorySummary, Category, WindowStats};

/// Formats window statistics into a human-readable string
pub fn format_window_stats(stats: &WindowStats, window_hours: usize) -> String {
    format!(
        "Next {} hours:\n  Feels like: {}\u{00b0}C to {}\u{00b0}C (avg {}\u{00b0}C)\n  Precipitation: up to {}% chance, {:.1} mm total\n  Max UV index: {}\n  Max wind: {} km/h\n",
        window_hours,
        stats.min_apparent,
        stats.max_apparent,
        stats.avg_apparent,
        stats.max_precipitation_probability,
        stats.total_precipitation,
        stats.max_uv,
        stats.max_wind
    )
}

/// Formats advisory items grouped by category, in display order
pub fn format_advisory_items(items: &[AdvisoryItem]) -> String {
    if items.is_empty() {
        return "No specific advice for the current conditions.\n".to_string();
    }

    let mut output = String::new();
    for category in Category::DISPLAY_ORDER {
        let group: Vec<&AdvisoryItem> = items
            .iter()
            .filter(|item| item.category == category)
            .collect();
        if group.is_empty() {
            continue;
        }

        output.push_str(&format!("{}:\n", category.label()));
        for item in group {
            output.push_str(&format!(
                "  {} [{}] {}\n",
                item.icon,
                item.severity.display_label(),
                item.message
            ));
        }
    }
    output
}

/// Formats the badge summary
pub fn format_advice_summary(summary: &AdvisorySummary) -> String {
    let mut output = format!("{}\n", summary.text);
    if !summary.badges.is_empty() {
        output.push_str(&format!("Badges: {}\n", summary.badges.join(" | ")));
    }
    output
}

/// Formats the full guidance report
pub fn format_guidance(
    start: Option<NaiveDate>,
    window_hours: usize,
    stats: &WindowStats,
    items: &[AdvisoryItem],
    summary: &AdvisorySummary,
) -> String {
    let mut output = match start {
        Some(date) => format!("Weather Guidance ({})\n\n", date.format("%A, %B %-d %Y")),
        None => String::from("Weather Guidance\n\n"),
    };

    output.push_str(&format_window_stats(stats, window_hours));
    output.push_str("\nAdvice:\n");
    output.push_str(&format_advisory_items(items));
    output.push_str("\nSummary:\n");
    output.push_str(&format_advice_summary(summary));
    output
}
