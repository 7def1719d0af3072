use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::history::FibboScoreRecord;
use crate::scoring::{
    classify_score, AggregateResult, FibboScoreConfig, ScoreLabel, SensitivityLevel, ALL_CHANNELS,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal, dropping a trailing ".0" (72.5, 80).
/// A score whose rounding would land in another band is printed in full.
pub fn format_score(score: f64) -> String {
    let rounded = (score * 10.0).round() / 10.0;
    if classify_score(rounded) != classify_score(score) {
        return score.to_string();
    }
    let formatted = format!("{:.1}", score);
    match formatted.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => formatted,
    }
}

fn paint_label(label: ScoreLabel, use_colors: bool) -> String {
    paint(label.as_str(), label, use_colors)
}

/// Color `text` the way `label` is colored everywhere else
fn paint(text: &str, label: ScoreLabel, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match label {
        ScoreLabel::Excellent => text.green().bold().to_string(),
        ScoreLabel::Strong => text.cyan().to_string(),
        ScoreLabel::Average => text.yellow().to_string(),
        ScoreLabel::Developing => text.magenta().to_string(),
        ScoreLabel::Critical => text.red().bold().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// One line per channel: key, label, icon
pub fn format_channel_list(use_colors: bool) -> String {
    ALL_CHANNELS
        .iter()
        .map(|c| {
            if use_colors {
                format!("{:<10} {:<12} {}", c.key().bold(), c.label(), c.icon().dimmed())
            } else {
                format!("{:<10} {:<12} {}", c.key(), c.label(), c.icon())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per sensitivity level: value, multiplier, label
pub fn format_levels(levels: &[SensitivityLevel], use_colors: bool) -> String {
    levels
        .iter()
        .map(|l| {
            let multiplier = format!("x{}", l.multiplier);
            if use_colors {
                format!("{}  {:<5} {}", l.value.bold(), multiplier, l.label)
            } else {
                format!("{}  {:<5} {}", l.value, multiplier, l.label)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "72.5  Forte", echoing the score exactly as given
pub fn format_classification(score: f64, use_colors: bool) -> String {
    let label = classify_score(score);
    format!("{:>6}  {}", score, paint_label(label, use_colors))
}

/// Weight and headline thresholds per channel
pub fn format_config_summary(config: &FibboScoreConfig, use_colors: bool) -> String {
    let header = format!(
        "{:<12} {:>7} {:>9} {:>10} {:>9}",
        "channel", "weight", "eng.max%", "posts/wk", "reach%"
    );
    let mut lines = vec![if use_colors {
        header.dimmed().to_string()
    } else {
        header
    }];

    for channel in ALL_CHANNELS {
        let t = config.thresholds_for(channel);
        let weight = format!("{}%", format_score(config.weight_for(channel) * 100.0));
        let marker = if config.channels.contains_key(&channel) { "" } else { " *" };
        lines.push(format!(
            "{:<12} {:>7} {:>9} {:>10} {:>9}{}",
            channel.label(),
            weight,
            format_score(t.engagement.engagement_rate_max_pct),
            format_score(t.presence.posts_per_week_max),
            format_score(t.presence.reach_rate_max_pct),
            marker
        ));
    }
    lines.join("\n")
}

/// Latest rows as a table: date, channel, score, label, entity
pub fn format_latest_table(rows: &[FibboScoreRecord], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No scores found.".to_string();
    }

    let term_width = get_terminal_width();
    // date(10) + channel(10) + score(6) + label(18) + separators
    let fixed_width = 10 + 10 + 6 + 18 + 8;

    rows.iter()
        .map(|row| {
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(row.display_name(), width - fixed_width)
                }
                Some(_) => truncate_name(row.display_name(), 20),
                None => row.display_name().to_string(),
            };
            let padded = format!("{:<18}", row.label().as_str());
            let label = paint(&padded, row.label(), use_colors);
            format!(
                "{}  {:<10}{:>6}  {}  {}",
                row.score_date,
                row.channel.key(),
                format_score(row.total_score),
                label,
                name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overall score for an entity with each channel's weighted share
pub fn format_aggregate(entity: &str, result: &AggregateResult, use_colors: bool) -> String {
    let headline = format!(
        "{}: {} ({})",
        entity,
        format_score(result.score),
        paint_label(result.label, use_colors)
    );
    let mut lines = vec![if use_colors {
        headline.bold().to_string()
    } else {
        headline
    }];
    for c in &result.breakdown {
        lines.push(format!(
            "  {:<12} {:>6} x{:<4} -> {}",
            c.channel.label(),
            format_score(c.total),
            c.weight,
            format_score(c.share)
        ));
    }
    lines.join("\n")
}
