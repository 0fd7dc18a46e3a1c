//! The booking engine.
//!
//! One `Frontdesk` per running client, injected with a sync adapter and
//! an authorization policy. All state transitions run synchronously on
//! the caller's task; the only async edges are the adapter calls.
//!
//! Write path: mutations are applied to the in-memory store first
//! (optimistic), then forwarded to the adapter. An adapter failure is
//! returned to the caller but the optimistic state stays; the next
//! snapshot refresh reconciles, last write wins.

use chrono::NaiveDate;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::auth::AuthPolicy;
use crate::availability::Availability;
use crate::booking::Booking;
use crate::error::{RoomCalError, RoomCalResult};
use crate::resolver;
use crate::selector::{RangeCommit, RangeSelector, TapOutcome};
use crate::store::BookingStore;
use crate::sync::{ChangeNotice, SyncAdapter};

pub struct Frontdesk<A: SyncAdapter> {
    store: BookingStore,
    selector: RangeSelector,
    auth: AuthPolicy,
    adapter: A,
}

impl<A: SyncAdapter> Frontdesk<A> {
    pub fn new(adapter: A, auth: AuthPolicy) -> Self {
        Frontdesk {
            store: BookingStore::new(),
            selector: RangeSelector::new(),
            auth,
            adapter,
        }
    }

    /// Fetch a fresh snapshot and replace the store wholesale. Called on
    /// startup and whenever the adapter signals a change.
    pub async fn refresh(&mut self) -> RoomCalResult<()> {
        let rows = self.adapter.fetch_all().await?;
        self.store.replace_all(rows);
        Ok(())
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Remote change notifications. Call `refresh` on each notice; the
    /// incoming snapshot always supersedes local state.
    pub fn changes(&self) -> broadcast::Receiver<ChangeNotice> {
        self.adapter.subscribe()
    }

    pub fn availability(&self) -> Availability<'_> {
        Availability::new(&self.store)
    }

    pub fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    fn require_editor(&self, identity: Option<&str>) -> RoomCalResult<()> {
        if self.auth.is_authorized_editor(identity) {
            Ok(())
        } else {
            Err(RoomCalError::Unauthorized)
        }
    }

    /// A tap on the calendar grid. Gated: taps drive the mutation flow.
    pub fn tap(
        &mut self,
        identity: Option<&str>,
        room: &str,
        date: NaiveDate,
    ) -> RoomCalResult<TapOutcome> {
        self.require_editor(identity)?;
        self.selector.tap(&self.store, room, date)
    }

    /// Move the hover cursor of an in-progress selection.
    pub fn hover(&mut self, date: NaiveDate) {
        self.selector.hover(date);
    }

    /// Discard any in-progress selection.
    pub fn cancel_selection(&mut self) {
        self.selector.cancel();
    }

    /// Apply a committed selection once the guest details are known.
    /// Returns how many nights were actually added (booked days inside
    /// the range were skipped at commit time).
    pub async fn finalize(
        &mut self,
        identity: Option<&str>,
        commit: &RangeCommit,
        guest: &str,
        note: &str,
    ) -> RoomCalResult<usize> {
        self.require_editor(identity)?;
        let rows = commit.rows(guest, note);
        self.persist_rows(rows).await
    }

    /// Book `[start, end]` (inclusive nights) directly, without the tap
    /// flow. Same conflict handling: only free nights are added.
    pub async fn commit_range(
        &mut self,
        identity: Option<&str>,
        room: &str,
        start: NaiveDate,
        end: NaiveDate,
        guest: &str,
        note: &str,
    ) -> RoomCalResult<usize> {
        self.require_editor(identity)?;
        let rows = resolver::resolve(&self.store, room, start, end, guest, note)?;
        self.persist_rows(rows).await
    }

    async fn persist_rows(&mut self, rows: Vec<Booking>) -> RoomCalResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.store.apply(&rows);
        debug!(nights = rows.len(), room = %rows[0].room, "booked range");

        if let Err(e) = self.adapter.upsert_many(&rows).await {
            // Optimistic state stays; the caller decides what to tell the
            // user and the next refresh reconciles.
            warn!(error = %e, "adapter write failed, keeping local state");
            return Err(RoomCalError::Sync(e.to_string()));
        }
        Ok(rows.len())
    }

    /// Update guest/note of one booked night. No-op (Ok(false)) when the
    /// night is not booked.
    pub async fn edit_day(
        &mut self,
        identity: Option<&str>,
        room: &str,
        date: NaiveDate,
        guest: &str,
        note: &str,
    ) -> RoomCalResult<bool> {
        self.require_editor(identity)?;
        if !self.store.edit_day(room, date, guest, note) {
            return Ok(false);
        }
        let row = Booking {
            room: room.to_string(),
            date,
            guest: guest.to_string(),
            note: note.to_string(),
        };
        if let Err(e) = self.adapter.upsert_many(std::slice::from_ref(&row)).await {
            warn!(error = %e, "adapter write failed, keeping local state");
            return Err(RoomCalError::Sync(e.to_string()));
        }
        Ok(true)
    }

    /// Cancel one booked night. No-op (Ok(false)) when the night is not
    /// booked; the delete is still forwarded so a stale remote row goes
    /// away too.
    pub async fn cancel_day(
        &mut self,
        identity: Option<&str>,
        room: &str,
        date: NaiveDate,
    ) -> RoomCalResult<bool> {
        self.require_editor(identity)?;
        let removed = self.store.cancel_day(room, date);
        if let Err(e) = self.adapter.delete_one(room, date).await {
            warn!(error = %e, "adapter delete failed, keeping local state");
            return Err(RoomCalError::Sync(e.to_string()));
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::broadcast;

    use super::*;
    use crate::sync::ChangeNotice;

    const ADMIN: Option<&str> = Some("host@example.com");

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// In-memory adapter; optionally fails every write.
    struct MemoryAdapter {
        rows: Mutex<Vec<Booking>>,
        fail_writes: bool,
        notices: broadcast::Sender<ChangeNotice>,
    }

    impl MemoryAdapter {
        fn new(fail_writes: bool) -> Self {
            let (notices, _) = broadcast::channel(1);
            MemoryAdapter {
                rows: Mutex::new(Vec::new()),
                fail_writes,
                notices,
            }
        }

        fn stored(&self) -> Vec<Booking> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SyncAdapter for MemoryAdapter {
        async fn fetch_all(&self) -> RoomCalResult<Vec<Booking>> {
            Ok(self.stored())
        }

        async fn upsert_many(&self, rows: &[Booking]) -> RoomCalResult<()> {
            if self.fail_writes {
                return Err(RoomCalError::Sync("backend unavailable".into()));
            }
            let mut stored = self.rows.lock().unwrap();
            for row in rows {
                match stored.iter_mut().find(|b| b.key() == row.key()) {
                    Some(existing) => *existing = row.clone(),
                    None => stored.push(row.clone()),
                }
            }
            Ok(())
        }

        async fn delete_one(&self, room: &str, date: NaiveDate) -> RoomCalResult<()> {
            if self.fail_writes {
                return Err(RoomCalError::Sync("backend unavailable".into()));
            }
            self.rows.lock().unwrap().retain(|b| b.key() != (room, date));
            Ok(())
        }

        fn subscribe(&self) -> broadcast::Receiver<ChangeNotice> {
            self.notices.subscribe()
        }
    }

    fn desk(fail_writes: bool) -> Frontdesk<MemoryAdapter> {
        Frontdesk::new(
            MemoryAdapter::new(fail_writes),
            AuthPolicy::new(Some("host@example.com".into())),
        )
    }

    #[tokio::test]
    async fn commit_forwards_rows_to_the_adapter() {
        let mut desk = desk(false);
        let added = desk
            .commit_range(ADMIN, "Sauna", d("2024-06-01"), d("2024-06-03"), "Ada", "")
            .await
            .unwrap();

        assert_eq!(added, 3);
        assert!(desk.availability().is_booked("Sauna", d("2024-06-02")));
        assert_eq!(desk.adapter.stored().len(), 3);
    }

    #[tokio::test]
    async fn viewer_mutations_are_rejected_before_any_state_change() {
        let mut desk = desk(false);
        let err = desk
            .commit_range(
                Some("guest@example.com"),
                "Sauna",
                d("2024-06-01"),
                d("2024-06-01"),
                "Ada",
                "",
            )
            .await;

        assert!(matches!(err, Err(RoomCalError::Unauthorized)));
        assert!(desk.store().is_empty());
        assert!(desk.adapter.stored().is_empty());

        let err = desk.tap(None, "Sauna", d("2024-06-01"));
        assert!(matches!(err, Err(RoomCalError::Unauthorized)));
    }

    #[tokio::test]
    async fn failed_adapter_write_keeps_optimistic_state() {
        let mut desk = desk(true);
        let err = desk
            .commit_range(ADMIN, "Sauna", d("2024-06-01"), d("2024-06-01"), "Ada", "")
            .await;

        assert!(matches!(err, Err(RoomCalError::Sync(_))));
        // Local state survives the failure, no rollback.
        assert!(desk.availability().is_booked("Sauna", d("2024-06-01")));
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_wholesale() {
        let mut desk = desk(false);
        desk.commit_range(ADMIN, "Sauna", d("2024-06-01"), d("2024-06-01"), "Ada", "")
            .await
            .unwrap();

        // A remote snapshot with different contents supersedes local
        // state entirely.
        *desk.adapter.rows.lock().unwrap() = vec![Booking {
            room: "Cottage in the Garden".into(),
            date: d("2024-07-01"),
            guest: "Bo".into(),
            note: String::new(),
        }];
        desk.refresh().await.unwrap();

        assert!(!desk.availability().is_booked("Sauna", d("2024-06-01")));
        assert!(desk.availability().is_booked("Cottage in the Garden", d("2024-07-01")));
    }

    #[tokio::test]
    async fn tap_flow_commits_through_finalize() {
        let mut desk = desk(false);
        desk.refresh().await.unwrap();

        assert_eq!(
            desk.tap(ADMIN, "Sauna", d("2024-06-01")).unwrap(),
            TapOutcome::Anchored
        );
        desk.hover(d("2024-06-03"));
        let TapOutcome::Committed(commit) = desk.tap(ADMIN, "Sauna", d("2024-06-03")).unwrap()
        else {
            panic!("expected commit");
        };

        let added = desk.finalize(ADMIN, &commit, "Ada", "late arrival").await.unwrap();
        assert_eq!(added, 3);
        assert_eq!(
            desk.availability()
                .booking_at("Sauna", d("2024-06-02"))
                .unwrap()
                .note,
            "late arrival"
        );
    }

    #[tokio::test]
    async fn change_notice_then_refresh_picks_up_remote_rows() {
        let mut desk = desk(false);
        let mut changes = desk.changes();

        desk.adapter.rows.lock().unwrap().push(Booking {
            room: "Sauna".into(),
            date: d("2024-06-01"),
            guest: "Remote".into(),
            note: String::new(),
        });
        desk.adapter.notices.send(ChangeNotice).unwrap();

        changes.recv().await.unwrap();
        desk.refresh().await.unwrap();
        assert!(desk.availability().is_booked("Sauna", d("2024-06-01")));
    }

    #[tokio::test]
    async fn cancel_day_is_a_no_op_on_missing_keys() {
        let mut desk = desk(false);
        desk.commit_range(ADMIN, "Sauna", d("2024-06-01"), d("2024-06-01"), "Ada", "")
            .await
            .unwrap();

        assert!(desk.cancel_day(ADMIN, "Sauna", d("2024-06-01")).await.unwrap());
        assert!(!desk.availability().is_booked("Sauna", d("2024-06-01")));
        assert!(!desk.cancel_day(ADMIN, "Sauna", d("2024-06-01")).await.unwrap());
    }

    #[tokio::test]
    async fn edit_day_updates_details_locally_and_remotely() {
        let mut desk = desk(false);
        desk.commit_range(ADMIN, "Sauna", d("2024-06-01"), d("2024-06-01"), "Ada", "")
            .await
            .unwrap();

        assert!(
            desk.edit_day(ADMIN, "Sauna", d("2024-06-01"), "Ada", "paid cash")
                .await
                .unwrap()
        );
        assert_eq!(desk.adapter.stored()[0].note, "paid cash");
        assert!(
            !desk
                .edit_day(ADMIN, "Sauna", d("2024-06-09"), "x", "")
                .await
                .unwrap()
        );
    }
}
