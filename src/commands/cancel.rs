//! Cancel one booked night.

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use roomcal_core::{Frontdesk, LocalStore, RoomCalConfig};

pub async fn run(
    desk: &mut Frontdesk<LocalStore>,
    config: &RoomCalConfig,
    identity: Option<String>,
    room: String,
    date: NaiveDate,
) -> Result<()> {
    desk.refresh().await?;
    let room = config.resolve_room(&room)?;

    let removed = desk.cancel_day(identity.as_deref(), &room, date).await?;
    if removed {
        println!("{} {date} — {}", room.bold(), "canceled".yellow());
    } else {
        // Canceling a free night is a no-op, not an error.
        println!("{} was not booked on {date}", room.bold());
    }
    Ok(())
}
