//! Read-model queries over the booking store.
//!
//! These are the queries the calendar grid is drawn from: per-day
//! occupancy, the booking applying to a day, and streak edges so that
//! contiguous occupied (or free) runs render as one visual block.

use chrono::NaiveDate;

use crate::booking::{Booking, next_day, prev_day};
use crate::store::BookingStore;

/// Edge flags for the streak (occupied or free) that `date` belongs to.
/// An edge is where the neighboring calendar day has the other occupancy
/// state. Clamping to a visible month window is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedSpan {
    pub is_left_edge: bool,
    pub is_right_edge: bool,
}

/// Read-only availability view. Reads are never gated by authorization.
#[derive(Clone, Copy)]
pub struct Availability<'a> {
    store: &'a BookingStore,
}

impl<'a> Availability<'a> {
    pub fn new(store: &'a BookingStore) -> Self {
        Availability { store }
    }

    /// Whether `room` is occupied on `date` under the half-open stay test:
    /// a stay `[start, end)` covers `date` iff `start <= date < end`.
    pub fn is_booked(&self, room: &str, date: NaiveDate) -> bool {
        self.store.stay_at(room, date).is_some()
    }

    /// The booking applying to `(room, date)` as a day row, if occupied.
    pub fn booking_at(&self, room: &str, date: NaiveDate) -> Option<Booking> {
        self.store.stay_at(room, date).map(|stay| Booking {
            room: stay.room.clone(),
            date,
            guest: stay.guest.clone(),
            note: stay.note.clone(),
        })
    }

    /// Streak edges for `date`, defined symmetrically for occupied and
    /// free days. The calendar's first/last representable day counts as
    /// an edge.
    pub fn occupied_span(&self, room: &str, date: NaiveDate) -> OccupiedSpan {
        let here = self.is_booked(room, date);
        let left = match prev_day(date) {
            Some(prev) => self.is_booked(room, prev) != here,
            None => true,
        };
        let next = next_day(date);
        let right = if next == date {
            true
        } else {
            self.is_booked(room, next) != here
        };
        OccupiedSpan {
            is_left_edge: left,
            is_right_edge: right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Booking;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn store_with(rows: Vec<(&str, &str, &str)>) -> BookingStore {
        let mut store = BookingStore::new();
        store.replace_all(
            rows.into_iter()
                .map(|(room, date, guest)| Booking {
                    room: room.into(),
                    date: d(date),
                    guest: guest.into(),
                    note: String::new(),
                })
                .collect(),
        );
        store
    }

    #[test]
    fn is_booked_matches_stored_day_keys() {
        let store = store_with(vec![("Sauna", "2024-06-02", "Ada")]);
        let avail = Availability::new(&store);

        assert!(avail.is_booked("Sauna", d("2024-06-02")));
        assert!(!avail.is_booked("Sauna", d("2024-06-03")));
        assert!(!avail.is_booked("Cottage", d("2024-06-02")));
    }

    #[test]
    fn booking_at_carries_guest_and_note() {
        let mut store = BookingStore::new();
        store.replace_all(vec![Booking {
            room: "Cottage".into(),
            date: d("2024-06-02"),
            guest: "Ada".into(),
            note: "late arrival".into(),
        }]);
        let avail = Availability::new(&store);

        let booking = avail.booking_at("Cottage", d("2024-06-02")).unwrap();
        assert_eq!(booking.guest, "Ada");
        assert_eq!(booking.note, "late arrival");
        assert!(avail.booking_at("Cottage", d("2024-06-03")).is_none());
    }

    #[test]
    fn occupied_streak_reports_edges() {
        let store = store_with(vec![
            ("Sauna", "2024-06-01", "Ada"),
            ("Sauna", "2024-06-02", "Ada"),
            ("Sauna", "2024-06-03", "Ada"),
        ]);
        let avail = Availability::new(&store);

        let first = avail.occupied_span("Sauna", d("2024-06-01"));
        assert!(first.is_left_edge && !first.is_right_edge);

        let middle = avail.occupied_span("Sauna", d("2024-06-02"));
        assert!(!middle.is_left_edge && !middle.is_right_edge);

        let last = avail.occupied_span("Sauna", d("2024-06-03"));
        assert!(!last.is_left_edge && last.is_right_edge);
    }

    #[test]
    fn free_streak_edges_mirror_occupied_neighbors() {
        let store = store_with(vec![
            ("Sauna", "2024-06-01", "Ada"),
            ("Sauna", "2024-06-05", "Bo"),
        ]);
        let avail = Availability::new(&store);

        // Free gap 06-02 .. 06-04 between two bookings.
        let gap_start = avail.occupied_span("Sauna", d("2024-06-02"));
        assert!(gap_start.is_left_edge && !gap_start.is_right_edge);

        let gap_end = avail.occupied_span("Sauna", d("2024-06-04"));
        assert!(!gap_end.is_left_edge && gap_end.is_right_edge);
    }

    #[test]
    fn back_to_back_guests_form_one_occupied_streak() {
        // Different guests on consecutive days are separate stays but one
        // visual occupied block.
        let store = store_with(vec![
            ("Sauna", "2024-06-01", "Ada"),
            ("Sauna", "2024-06-02", "Bo"),
        ]);
        let avail = Availability::new(&store);

        let span = avail.occupied_span("Sauna", d("2024-06-01"));
        assert!(span.is_left_edge && !span.is_right_edge);
        let span = avail.occupied_span("Sauna", d("2024-06-02"));
        assert!(!span.is_left_edge && span.is_right_edge);
    }
}
