//! Booking data model.
//!
//! Two representations of the same occupancy data:
//! - `Booking`: one room-night, keyed by `(room, date)`. This is the wire
//!   form exchanged with sync adapters, the legacy storage form, and the
//!   export form.
//! - `Stay`: a half-open date range `[start, end)` of consecutive nights
//!   with the same guest/note. This is the internal store form, since a
//!   range can express everything a day row can and more.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RoomCalError, RoomCalResult};

/// A single booked room-night (day-keyed form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub room: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub guest: String,
    #[serde(default)]
    pub note: String,
}

impl Booking {
    pub fn new(room: impl Into<String>, date: NaiveDate) -> Self {
        Booking {
            room: room.into(),
            date,
            guest: String::new(),
            note: String::new(),
        }
    }

    /// Identity key: at most one booking per room per calendar day.
    pub fn key(&self) -> (&str, NaiveDate) {
        (&self.room, self.date)
    }
}

/// A contiguous run of booked nights for one room.
///
/// `end` is exclusive: the checkout day itself is free and can be the next
/// guest's check-in day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stay {
    pub room: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub guest: String,
    #[serde(default)]
    pub note: String,
}

impl Stay {
    /// Build a stay covering `[start, end)`. Zero or negative length is
    /// rejected.
    pub fn new(
        room: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        guest: impl Into<String>,
        note: impl Into<String>,
    ) -> RoomCalResult<Self> {
        if end <= start {
            return Err(RoomCalError::InvalidRange { start, end });
        }
        Ok(Stay {
            room: room.into(),
            start,
            end,
            guest: guest.into(),
            note: note.into(),
        })
    }

    /// Single night `[date, date + 1)`.
    pub fn one_night(
        room: impl Into<String>,
        date: NaiveDate,
        guest: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Stay {
            room: room.into(),
            start: date,
            end: date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX),
            guest: guest.into(),
            note: note.into(),
        }
    }

    /// Half-open interval test: the checkout day is not occupied.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|d| *d < self.end)
    }

    /// Expand to day rows, one per night.
    pub fn day_rows(&self) -> Vec<Booking> {
        self.nights()
            .map(|date| Booking {
                room: self.room.clone(),
                date,
                guest: self.guest.clone(),
                note: self.note.clone(),
            })
            .collect()
    }

    /// Whether `other` starts the night this stay ends with matching
    /// guest/note, i.e. the two can fold into one stay.
    pub fn abuts(&self, other: &Stay) -> bool {
        self.room == other.room
            && self.end == other.start
            && self.guest == other.guest
            && self.note == other.note
    }
}

/// Fold day rows for a single room into stays.
///
/// Rows must already be sorted by date and belong to the same room.
/// Consecutive dates with identical guest/note merge into one stay.
pub(crate) fn coalesce_room_rows(rows: &[Booking]) -> Vec<Stay> {
    let mut stays: Vec<Stay> = Vec::new();
    for row in rows {
        match stays.last_mut() {
            Some(last)
                if last.end == row.date && last.guest == row.guest && last.note == row.note =>
            {
                last.end = next_day(row.date);
            }
            _ => stays.push(Stay::one_night(
                row.room.clone(),
                row.date,
                row.guest.clone(),
                row.note.clone(),
            )),
        }
    }
    stays
}

pub(crate) fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

pub(crate) fn prev_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(1))
}
