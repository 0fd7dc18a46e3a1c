//! Pluggable persistence backends.
//!
//! The frontdesk talks to exactly one `SyncAdapter`, chosen once at
//! startup from configuration. Local-only and remote backends both fit
//! behind the same trait; remote ones additionally push change notices so
//! the caller can re-fetch and replace its snapshot wholesale.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::broadcast;

use crate::booking::Booking;
use crate::error::RoomCalResult;

/// A remote change happened; re-fetch and replace the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotice;

/// Persistence backend for the booking collection.
///
/// `fetch_all` is called on startup and after every change notice; the
/// result always replaces the local snapshot wholesale (last write wins at
/// the snapshot level). Writes are fire-and-report: a failed write is
/// surfaced to the caller but local optimistic state is not rolled back
/// and nothing is retried here.
#[async_trait]
pub trait SyncAdapter: Send + Sync {
    async fn fetch_all(&self) -> RoomCalResult<Vec<Booking>>;

    async fn upsert_many(&self, rows: &[Booking]) -> RoomCalResult<()>;

    async fn delete_one(&self, room: &str, date: NaiveDate) -> RoomCalResult<()>;

    /// Change notifications. Dropping the receiver unsubscribes. Backends
    /// without push (like the local file store) hand out a channel that
    /// never fires.
    fn subscribe(&self) -> broadcast::Receiver<ChangeNotice>;
}
