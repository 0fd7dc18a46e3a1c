//! Month availability view: one strip per room, booked stays below.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use roomcal_core::{Frontdesk, LocalStore, RoomCalConfig};

use crate::render::{Render, month_days, month_header, month_strip};

pub async fn run(
    desk: &mut Frontdesk<LocalStore>,
    config: &RoomCalConfig,
    month: Option<String>,
    room: Option<String>,
) -> Result<()> {
    desk.refresh().await?;

    let first = parse_month(month.as_deref())?;
    let days = month_days(first);

    let rooms = match room {
        Some(name) => vec![config.resolve_room(&name)?],
        None => config.rooms.clone(),
    };

    let width = rooms.iter().map(|r| r.len()).max().unwrap_or(0);

    println!("{}", first.format("%B %Y").bold());
    println!("{:width$} {}", "", month_header(&days));
    let avail = desk.availability();
    for room in &rooms {
        let strip = month_strip(&avail, room, &days, |_| false);
        println!("{room:width$} {strip}");
    }
    println!(
        "{:width$} {}  {}",
        "",
        "██ booked".red(),
        " · free".dimmed()
    );

    // Stays touching the month, per room.
    let month_end = *days.last().expect("month has days");
    let mut printed_heading = false;
    for room in &rooms {
        let stays: Vec<_> = desk
            .store()
            .stays(room)
            .iter()
            .filter(|s| s.start <= month_end && first < s.end)
            .collect();
        if stays.is_empty() {
            continue;
        }
        if !printed_heading {
            println!();
            printed_heading = true;
        }
        println!("{}", room.bold());
        for stay in stays {
            println!("   {}", stay.render());
        }
    }

    Ok(())
}

/// Parse YYYY-MM, defaulting to the current month.
fn parse_month(month: Option<&str>) -> Result<NaiveDate> {
    let first = match month {
        Some(s) => format!("{s}-01")
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid month '{s}'. Expected YYYY-MM"))?,
        None => {
            let today = chrono::Local::now().date_naive();
            today.with_day(1).expect("day 1 exists in every month")
        }
    };
    Ok(first)
}
