//! Two-tap range selection.
//!
//! Mirrors the drag interaction of the calendar grid: the first tap on a
//! free day anchors a selection, moving the cursor previews the range, a
//! second tap on the same room commits it. Tapping a booked day instead
//! hands the existing booking back for the edit path.

use chrono::NaiveDate;

use crate::availability::Availability;
use crate::booking::Booking;
use crate::error::RoomCalResult;
use crate::resolver;
use crate::store::BookingStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// First endpoint chosen; `hover` trails the cursor for previewing.
    Anchored {
        room: String,
        anchor: NaiveDate,
        hover: NaiveDate,
    },
    /// Transient: a second endpoint arrived and the conflict-resolved row
    /// set is being computed. Always settles back to `Idle` within the
    /// same `tap` call.
    Committing,
}

/// What a tap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// A fresh anchor was set (also when switching rooms mid-selection).
    Anchored,
    /// The tapped day is already booked; edit it instead of selecting.
    EditExisting(Booking),
    /// Second tap: a normalized range was committed.
    Committed(RangeCommit),
}

/// A committed selection with its conflict-resolved free dates, computed
/// synchronously at commit time. Guest details arrive later (the original
/// flow opens a form after the drag), so the day rows are materialized by
/// `rows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCommit {
    pub room: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub free_dates: Vec<NaiveDate>,
}

impl RangeCommit {
    /// Materialize the day rows to insert, applying uniform guest/note.
    pub fn rows(&self, guest: &str, note: &str) -> Vec<Booking> {
        self.free_dates
            .iter()
            .map(|date| Booking {
                room: self.room.clone(),
                date: *date,
                guest: guest.to_string(),
                note: note.to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct RangeSelector {
    state: SelectionState,
}

impl RangeSelector {
    pub fn new() -> Self {
        RangeSelector::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Handle a tap on `(room, date)`.
    ///
    /// From `Idle`: a free day anchors, a booked day returns the existing
    /// record. From `Anchored`: same room commits the normalized inclusive
    /// range; another room restarts the anchor there instead of canceling.
    pub fn tap(
        &mut self,
        store: &BookingStore,
        room: &str,
        date: NaiveDate,
    ) -> RoomCalResult<TapOutcome> {
        match std::mem::replace(&mut self.state, SelectionState::Idle) {
            SelectionState::Idle | SelectionState::Committing => self.anchor_or_edit(store, room, date),
            SelectionState::Anchored { room: anchored_room, anchor, .. } => {
                if anchored_room != room {
                    return self.anchor_or_edit(store, room, date);
                }
                self.state = SelectionState::Committing;
                let (start, end) = if anchor <= date { (anchor, date) } else { (date, anchor) };
                let free_dates = resolver::free_dates(store, room, start, end)?;
                self.state = SelectionState::Idle;
                Ok(TapOutcome::Committed(RangeCommit {
                    room: room.to_string(),
                    start,
                    end,
                    free_dates,
                }))
            }
        }
    }

    fn anchor_or_edit(
        &mut self,
        store: &BookingStore,
        room: &str,
        date: NaiveDate,
    ) -> RoomCalResult<TapOutcome> {
        let avail = Availability::new(store);
        if let Some(existing) = avail.booking_at(room, date) {
            self.state = SelectionState::Idle;
            return Ok(TapOutcome::EditExisting(existing));
        }
        self.state = SelectionState::Anchored {
            room: room.to_string(),
            anchor: date,
            hover: date,
        };
        Ok(TapOutcome::Anchored)
    }

    /// Update the hover cursor. Ignored unless a selection is anchored.
    pub fn hover(&mut self, date: NaiveDate) {
        if let SelectionState::Anchored { hover, .. } = &mut self.state {
            *hover = date;
        }
    }

    /// The inclusive preview range `[min(anchor, hover), max(anchor,
    /// hover)]`, if a selection is anchored. Pure derivation, no side
    /// effects.
    pub fn preview_range(&self) -> Option<(&str, NaiveDate, NaiveDate)> {
        match &self.state {
            SelectionState::Anchored { room, anchor, hover } => {
                let (start, end) = if anchor <= hover { (*anchor, *hover) } else { (*hover, *anchor) };
                Some((room.as_str(), start, end))
            }
            _ => None,
        }
    }

    /// Whether `(room, date)` falls inside the current preview range.
    pub fn in_preview(&self, room: &str, date: NaiveDate) -> bool {
        self.preview_range()
            .is_some_and(|(r, start, end)| r == room && start <= date && date <= end)
    }

    /// Discard any in-progress selection. No side effects.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }
}
