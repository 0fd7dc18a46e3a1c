//! The canonical booking collection.
//!
//! The store owns the bookings exclusively: the UI and sync layers never
//! mutate records directly, they go through the operations here (or the
//! conflict resolver) and the store applies the resulting delta. A sync
//! snapshot replaces the whole collection at once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::booking::{Booking, Stay, coalesce_room_rows, next_day};

/// Ordered collection of stays, keyed by room.
///
/// Invariant: per room, stays are sorted by start date and never overlap.
/// Since stays are half-open, "never overlap" still allows back-to-back
/// stays sharing a checkout/check-in day boundary.
#[derive(Debug, Default, Clone)]
pub struct BookingStore {
    rooms: BTreeMap<String, Vec<Stay>>,
}

impl BookingStore {
    pub fn new() -> Self {
        BookingStore::default()
    }

    /// Replace the whole collection with a fresh day-row snapshot.
    ///
    /// Last write wins at the snapshot level: whatever was here before is
    /// gone, there is no field-by-field merge. Duplicate `(room, date)`
    /// keys in the snapshot keep the first occurrence.
    pub fn replace_all(&mut self, rows: Vec<Booking>) {
        let mut by_room: BTreeMap<String, BTreeMap<NaiveDate, Booking>> = BTreeMap::new();
        for row in rows {
            by_room
                .entry(row.room.clone())
                .or_default()
                .entry(row.date)
                .or_insert(row);
        }

        self.rooms = by_room
            .into_iter()
            .map(|(room, days)| {
                let rows: Vec<Booking> = days.into_values().collect();
                (room, coalesce_room_rows(&rows))
            })
            .collect();

        debug!(rooms = self.rooms.len(), "replaced booking snapshot");
    }

    /// Insert conflict-resolved day rows.
    ///
    /// Callers are expected to pass only free dates (the conflict resolver
    /// guarantees this); any row whose date is already covered is dropped
    /// rather than overwriting, so applying the same delta twice is
    /// harmless.
    pub fn apply(&mut self, rows: &[Booking]) {
        for row in rows {
            if self.stay_at(&row.room, row.date).is_some() {
                continue;
            }
            let stays = self.rooms.entry(row.room.clone()).or_default();
            let stay = Stay::one_night(
                row.room.clone(),
                row.date,
                row.guest.clone(),
                row.note.clone(),
            );
            let pos = stays.partition_point(|s| s.start < stay.start);
            stays.insert(pos, stay);
        }
        for stays in self.rooms.values_mut() {
            merge_adjacent(stays);
        }
    }

    /// Update guest/note of one booked night. The `(room, date)` key never
    /// changes; if the night sits inside a longer stay, the stay is split
    /// around it. Returns false (no-op) when the night is not booked.
    pub fn edit_day(&mut self, room: &str, date: NaiveDate, guest: &str, note: &str) -> bool {
        let Some(stays) = self.rooms.get_mut(room) else {
            return false;
        };
        let Some(idx) = position_of(stays, date) else {
            return false;
        };

        let old = stays.remove(idx);
        let mut parts = Vec::with_capacity(3);
        if old.start < date {
            parts.push(Stay {
                end: date,
                ..old.clone()
            });
        }
        parts.push(Stay::one_night(
            room.to_string(),
            date,
            guest.to_string(),
            note.to_string(),
        ));
        if next_day(date) < old.end {
            parts.push(Stay {
                start: next_day(date),
                ..old
            });
        }
        for (offset, part) in parts.into_iter().enumerate() {
            stays.insert(idx + offset, part);
        }
        merge_adjacent(stays);
        true
    }

    /// Remove exactly one booked night, splitting its stay if it sits in
    /// the middle. Returns false (no-op) when the night is not booked.
    pub fn cancel_day(&mut self, room: &str, date: NaiveDate) -> bool {
        let Some(stays) = self.rooms.get_mut(room) else {
            return false;
        };
        let Some(idx) = position_of(stays, date) else {
            return false;
        };

        let old = stays.remove(idx);
        let mut offset = 0;
        if old.start < date {
            stays.insert(
                idx,
                Stay {
                    end: date,
                    ..old.clone()
                },
            );
            offset = 1;
        }
        if next_day(date) < old.end {
            stays.insert(
                idx + offset,
                Stay {
                    start: next_day(date),
                    ..old
                },
            );
        }
        if stays.is_empty() {
            self.rooms.remove(room);
        }
        true
    }

    /// The stay covering `date` for `room`, if any.
    pub fn stay_at(&self, room: &str, date: NaiveDate) -> Option<&Stay> {
        let stays = self.rooms.get(room)?;
        let idx = stays.partition_point(|s| s.end <= date);
        stays.get(idx).filter(|s| s.contains(date))
    }

    pub fn stays(&self, room: &str) -> &[Stay] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All bookings expanded to day rows, in stable `(room, date)` order.
    /// This is the export and sync-wire form.
    pub fn day_rows(&self) -> Vec<Booking> {
        self.rooms
            .values()
            .flat_map(|stays| stays.iter().flat_map(Stay::day_rows))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Total booked nights across all rooms.
    pub fn night_count(&self) -> usize {
        self.rooms
            .values()
            .flat_map(|stays| stays.iter())
            .map(|s| (s.end - s.start).num_days() as usize)
            .sum()
    }
}

fn position_of(stays: &[Stay], date: NaiveDate) -> Option<usize> {
    let idx = stays.partition_point(|s| s.end <= date);
    stays.get(idx).filter(|s| s.contains(date)).map(|_| idx)
}

/// Fold neighboring stays with a shared boundary and equal guest/note.
fn merge_adjacent(stays: &mut Vec<Stay>) {
    let mut i = 0;
    while i + 1 < stays.len() {
        if stays[i].abuts(&stays[i + 1]) {
            stays[i].end = stays[i + 1].end;
            stays.remove(i + 1);
        } else {
            i += 1;
        }
    }
}
