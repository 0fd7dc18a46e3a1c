//! CSV export of the current snapshot.
//!
//! One line per booked night in stable `(room, date)` order, so repeated
//! exports of the same data diff cleanly.

use crate::booking::Booking;
use crate::store::BookingStore;

const HEADER: &str = "Room,Date,Guest,Notes";

/// Serialize every booking as CSV. Reads are never gated, so this takes
/// the store directly.
pub fn to_csv(store: &BookingStore) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in store.day_rows() {
        out.push_str(&csv_line(&row));
        out.push('\n');
    }
    out
}

fn csv_line(row: &Booking) -> String {
    format!(
        "{},{},{},{}",
        quote(&row.room),
        row.date.format("%Y-%m-%d"),
        quote(&row.guest),
        quote(&row.note)
    )
}

/// RFC 4180 quoting: wrap when needed, double embedded quotes.
fn quote(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
