//! Edit guest/note of one booked night.

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
    guest: Option<String>,
    note: Option<String>,
) -> Result<()> {
    desk.refresh().await?;
    let room = config.resolve_room(&room)?;

    // Unspecified fields keep their current value; the (room, date) key
    // itself never changes.
    let Some(existing) = desk.availability().booking_at(&room, date) else {
        println!("{} is not booked on {date}; nothing to edit", room.bold());
        return Ok(());
    };
    let guest = guest.unwrap_or(existing.guest);
    let note = note.unwrap_or(existing.note);

    let changed = desk
        .edit_day(identity.as_deref(), &room, date, &guest, &note)
        .await?;
    if changed {
        println!("{} {date} — {}", room.bold(), "updated".green());
    } else {
        println!("{} is not booked on {date}; nothing to edit", room.bold());
    }
    Ok(())
}
