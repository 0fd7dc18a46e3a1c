//! Local-file persistence backend.
//!
//! Day-keyed JSON under a fixed file name, the same shape the original
//! kept in browser local storage. Writes go through a temp file + rename
//! so a crash mid-write never leaves a torn store behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::broadcast;
use tracing::debug;

use crate::booking::Booking;
use crate::error::{RoomCalError, RoomCalResult};
use crate::sync::{ChangeNotice, SyncAdapter};

/// Fixed storage identifier; bump the suffix if the row shape ever
/// changes incompatibly.
pub const LOCAL_STORE_FILE: &str = "bookings_v1.json";

/// File-backed adapter. This is the fallback backend and the only one
/// shipped in-tree; it never emits change notices.
pub struct LocalStore {
    path: PathBuf,
    // Kept only so subscribe() can hand out receivers; nothing sends.
    notices: broadcast::Sender<ChangeNotice>,
}

impl LocalStore {
    /// Store rooted at `data_dir`, which is created on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let (notices, _) = broadcast::channel(1);
        LocalStore {
            path: data_dir.into().join(LOCAL_STORE_FILE),
            notices,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> RoomCalResult<Vec<Booking>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| RoomCalError::Serialization(e.to_string()))
    }

    fn write_rows(&self, rows: &[Booking]) -> RoomCalResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(rows)
            .map_err(|e| RoomCalError::Serialization(e.to_string()))?;

        // Write to temp file first, then atomic rename.
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;

        debug!(rows = rows.len(), path = %self.path.display(), "wrote local store");
        Ok(())
    }
}

#[async_trait]
impl SyncAdapter for LocalStore {
    async fn fetch_all(&self) -> RoomCalResult<Vec<Booking>> {
        self.read_rows()
    }

    async fn upsert_many(&self, rows: &[Booking]) -> RoomCalResult<()> {
        let mut stored = self.read_rows()?;
        for row in rows {
            match stored.iter_mut().find(|b| b.key() == row.key()) {
                Some(existing) => *existing = row.clone(),
                None => stored.push(row.clone()),
            }
        }
        stored.sort_by(|a, b| (&a.room, a.date).cmp(&(&b.room, b.date)));
        self.write_rows(&stored)
    }

    async fn delete_one(&self, room: &str, date: NaiveDate) -> RoomCalResult<()> {
        let mut stored = self.read_rows()?;
        stored.retain(|b| b.key() != (room, date));
        self.write_rows(&stored)
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeNotice> {
        self.notices.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn row(room: &str, date: &str, guest: &str, note: &str) -> Booking {
        Booking {
            room: room.into(),
            date: d(date),
            guest: guest.into(),
            note: note.into(),
        }
    }

    #[tokio::test]
    async fn round_trips_guest_and_note() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .upsert_many(&[row("Sauna", "2024-06-01", "Ada", "pays by card")])
            .await
            .unwrap();

        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].guest, "Ada");
        assert_eq!(rows[0].note, "pays by card");
    }

    #[tokio::test]
    async fn fetch_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("never-created"));
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_replaces_by_key_and_keeps_stable_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .upsert_many(&[
                row("Sauna", "2024-06-02", "Ada", ""),
                row("Cottage", "2024-06-01", "Bo", ""),
            ])
            .await
            .unwrap();
        store
            .upsert_many(&[row("Sauna", "2024-06-02", "Ada", "extra bed")])
            .await
            .unwrap();

        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].room, "Cottage");
        assert_eq!(rows[1].note, "extra bed");
    }

    #[tokio::test]
    async fn delete_is_a_no_op_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .upsert_many(&[row("Sauna", "2024-06-01", "Ada", "")])
            .await
            .unwrap();
        store.delete_one("Sauna", d("2024-06-09")).await.unwrap();
        store.delete_one("Sauna", d("2024-06-01")).await.unwrap();
        store.delete_one("Sauna", d("2024-06-01")).await.unwrap();

        assert!(store.fetch_all().await.unwrap().is_empty());
    }
}
