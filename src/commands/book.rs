//! Book a range of nights.
//!
//! With dates on the command line this resolves conflicts and commits in
//! one step. Without them it walks the same two-tap selection flow the
//! calendar grid uses: anchor a free night, pick the other endpoint,
//! then fill in guest details.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use owo_colors::OwoColorize;
use roomcal_core::{Frontdesk, LocalStore, RoomCalConfig, TapOutcome};

use crate::render::{Render, month_days, month_header, month_strip};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    desk: &mut Frontdesk<LocalStore>,
    config: &RoomCalConfig,
    identity: Option<String>,
    room: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    guest: Option<String>,
    note: Option<String>,
) -> Result<()> {
    desk.refresh().await?;
    let identity = identity.as_deref();

    let (room, from, to, guest, note) = match (room, from) {
        (Some(room), Some(from)) => {
            let room = config.resolve_room(&room)?;
            (
                room,
                from,
                to.unwrap_or(from),
                guest.unwrap_or_default(),
                note.unwrap_or_default(),
            )
        }
        _ => return interactive(desk, config, identity).await,
    };

    let added = desk
        .commit_range(identity, &room, from, to, &guest, &note)
        .await?;
    report(desk, &room, from, to, added);
    Ok(())
}

/// The two-tap flow, driven by prompts instead of pointer events.
async fn interactive(
    desk: &mut Frontdesk<LocalStore>,
    config: &RoomCalConfig,
    identity: Option<&str>,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    let room_idx = Select::with_theme(&theme)
        .with_prompt("Room")
        .items(&config.rooms)
        .default(0)
        .interact()?;
    let room = config.rooms[room_idx].clone();

    let anchor: NaiveDate = Input::with_theme(&theme)
        .with_prompt("First night (YYYY-MM-DD)")
        .interact_text()?;

    match desk.tap(identity, &room, anchor)? {
        TapOutcome::Anchored => {}
        TapOutcome::EditExisting(existing) => {
            println!(
                "{} already booked on {}: {} — use `roomcal edit` to change it",
                room,
                existing.date,
                if existing.guest.is_empty() {
                    "(no guest name)".to_string()
                } else {
                    existing.guest
                }
            );
            return Ok(());
        }
        TapOutcome::Committed(_) => unreachable!("first tap cannot commit"),
    }

    let last: NaiveDate = Input::with_theme(&theme)
        .with_prompt("Last night (YYYY-MM-DD)")
        .default(anchor)
        .interact_text()?;

    desk.hover(last);
    if let Some((_, start, end)) = desk.selector().preview_range() {
        println!("Selecting {start} → {end}");
        let days = month_days(start);
        let sel = desk.selector();
        let strip = month_strip(&desk.availability(), &room, &days, |day| {
            sel.in_preview(&room, day)
        });
        println!("{}", month_header(&days));
        println!("{strip}");
    }

    let TapOutcome::Committed(commit) = desk.tap(identity, &room, last)? else {
        // A second tap on the anchored room always commits.
        desk.cancel_selection();
        bail!("selection did not commit; nothing was booked");
    };

    if commit.free_dates.is_empty() {
        println!("All nights in that range are already booked; nothing to do.");
        return Ok(());
    }

    let guest: String = Input::with_theme(&theme)
        .with_prompt("Guest name")
        .allow_empty(true)
        .interact_text()?;
    let note: String = Input::with_theme(&theme)
        .with_prompt("Notes (phone, details…)")
        .allow_empty(true)
        .interact_text()?;

    let added = desk.finalize(identity, &commit, &guest, &note).await?;
    report(desk, &room, commit.start, commit.end, added);
    Ok(())
}

fn report(
    desk: &Frontdesk<LocalStore>,
    room: &str,
    from: NaiveDate,
    to: NaiveDate,
    added: usize,
) {
    let span_nights = (to - from).num_days() as usize + 1;
    if added == 0 {
        println!(
            "{} — every night in {from} → {to} was already booked, nothing added",
            room.bold()
        );
        return;
    }
    if added < span_nights {
        println!(
            "{} — added {} of {} nights ({} already booked, left untouched)",
            room.bold(),
            added.to_string().green(),
            span_nights,
            span_nights - added
        );
    } else {
        println!("{} — booked {} night(s)", room.bold(), added.to_string().green());
    }
    for stay in desk.store().stays(room) {
        if stay.start <= to && from < stay.end {
            println!("   {}", stay.render());
        }
    }
}
