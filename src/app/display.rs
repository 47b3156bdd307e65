//! Terminal display helpers
//!
//! Color and formatting glue shared by the dashboard, play loop, and
//! report views. No decision logic lives here.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

/// Mastery percent with the traffic-light coloring
pub fn mastery_value(value: u8) -> ColoredString {
    let label = format!("{value:>3}%");
    if value >= 80 {
        label.green()
    } else if value >= 50 {
        label.yellow()
    } else {
        label.red()
    }
}

/// Score percent coloring (pass bar at 60 instead of 50)
pub fn score_value(percent: u8) -> ColoredString {
    let label = format!("{percent}%");
    if percent >= 80 {
        label.green()
    } else if percent >= 60 {
        label.yellow()
    } else {
        label.red()
    }
}

/// Fixed-width progress bar, filled proportionally to `value` of 100
pub fn bar(value: u8, width: usize) -> String {
    let filled = (usize::from(value.min(100)) * width) / 100;
    let mut out = String::with_capacity(width);
    for i in 0..width {
        out.push(if i < filled { '█' } else { '░' });
    }
    out
}

/// Answer option letter for a zero-based index
pub fn option_letter(index: usize) -> char {
    (b'A' + (index as u8).min(25)) as char
}

/// Short date for record displays
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Section header line
pub fn heading(text: &str) -> ColoredString {
    text.bold().cyan()
}
