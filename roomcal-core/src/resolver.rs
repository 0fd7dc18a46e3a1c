//! Conflict-free expansion of a selected date range.
//!
//! Given an inclusive range of days for a room, produce exactly the day
//! rows for the dates that are still free. Already-booked days inside the
//! range are skipped silently, never overwritten: re-dragging across a
//! mixed free/booked stretch only fills the gaps, and repeating the same
//! commit a second time produces nothing at all.

use chrono::NaiveDate;

use crate::availability::Availability;
use crate::booking::Booking;
use crate::error::{RoomCalError, RoomCalResult};
use crate::store::BookingStore;

/// Day rows to insert for booking `room` on `[start, end]` (inclusive).
///
/// The rows come back in date order, each carrying the same guest/note.
/// An inverted range is rejected before any state is touched; `start ==
/// end` is a valid one-night booking.
pub fn resolve(
    store: &BookingStore,
    room: &str,
    start: NaiveDate,
    end: NaiveDate,
    guest: &str,
    note: &str,
) -> RoomCalResult<Vec<Booking>> {
    if end < start {
        return Err(RoomCalError::InvalidRange { start, end });
    }

    let avail = Availability::new(store);
    Ok(start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !avail.is_booked(room, *d))
        .map(|date| Booking {
            room: room.to_string(),
            date,
            guest: guest.to_string(),
            note: note.to_string(),
        })
        .collect())
}

/// Free dates in `[start, end]` without building rows. Used by the range
/// selector when the guest details are not known yet.
pub fn free_dates(
    store: &BookingStore,
    room: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> RoomCalResult<Vec<NaiveDate>> {
    if end < start {
        return Err(RoomCalError::InvalidRange { start, end });
    }
    let avail = Availability::new(store);
    Ok(start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !avail.is_booked(room, *d))
        .collect())
}
