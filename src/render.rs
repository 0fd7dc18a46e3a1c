//! Terminal rendering for roomcal types.
//!
//! Month strips are drawn two characters per day so that streak edges can
//! show as half blocks and a run of booked nights reads as one bar.

use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use roomcal_core::{Availability, Stay};

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Stay {
    fn render(&self) -> String {
        let nights = (self.end - self.start).num_days();
        let range = format!(
            "{} → {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        );
        let guest = if self.guest.is_empty() {
            "(no guest name)".dimmed().to_string()
        } else {
            self.guest.bold().to_string()
        };
        let mut line = format!(
            "{range}  {guest}  {}",
            format!("{nights} night{}", if nights == 1 { "" } else { "s" }).dimmed()
        );
        if !self.note.is_empty() {
            line.push_str(&format!("  {}", self.note.italic()));
        }
        line
    }
}

/// All days of the month containing `first`.
pub fn month_days(first: NaiveDate) -> Vec<NaiveDate> {
    let month = first.month();
    first
        .with_day(1)
        .unwrap_or(first)
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect()
}

/// Header row of day-of-month numbers, aligned with the strips below.
pub fn month_header(days: &[NaiveDate]) -> String {
    let cells: Vec<String> = days.iter().map(|d| format!("{:>2}", d.day())).collect();
    cells.join("").dimmed().to_string()
}

/// One month strip for one room. Occupied streaks render as red bars with
/// half-block edges, free days as dim dots; `preview` days (an in-progress
/// selection) are highlighted. The month window clamps streaks: its first
/// and last day always count as edges.
pub fn month_strip(
    avail: &Availability<'_>,
    room: &str,
    days: &[NaiveDate],
    preview: impl Fn(NaiveDate) -> bool,
) -> String {
    let mut out = String::new();
    for (i, day) in days.iter().enumerate() {
        let cell = if avail.is_booked(room, *day) {
            let span = avail.occupied_span(room, *day);
            let left = span.is_left_edge || i == 0;
            let right = span.is_right_edge || i == days.len() - 1;
            let glyph = match (left, right) {
                (true, true) => "▐▌",
                (true, false) => "▐█",
                (false, true) => "█▌",
                (false, false) => "██",
            };
            glyph.red().to_string()
        } else if preview(*day) {
            "▒▒".yellow().to_string()
        } else {
            " ·".dimmed().to_string()
        };
        out.push_str(&cell);
    }
    out
}
