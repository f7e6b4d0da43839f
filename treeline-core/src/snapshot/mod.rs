//! Snapshot persistence
//!
//! A snapshot is the `{items, hierarchy, state, counter}` blob the editor
//! saves after each mutation batch and loads at startup. The core only
//! interprets `hierarchy` and `state`; `items` and `counter` ride along for
//! the item store and the allocator. Field names are camelCase on the wire,
//! matching snapshots written by earlier versions of the editor.
//!
//! Two persistence surfaces:
//!
//! - [`SnapshotStore`] - synchronous file load/save (missing file is not an
//!   error; saves go through a temp file and rename)
//! - [`SnapshotWriter`] - debounced asynchronous writer: schedule after
//!   every mutation batch, the worker coalesces bursts and writes once the
//!   edits go quiet, [`SnapshotWriter::flush`] forces the write on exit

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::hierarchy::HierarchyEntry;
use crate::models::{EntityId, Item};
use crate::state::EntityState;

/// Snapshot format version for compatibility checks.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Quiet period the debounced writer waits for before persisting.
pub const SNAPSHOT_DEBOUNCE: Duration = Duration::from_secs(2);

const fn default_format_version() -> u32 {
    SNAPSHOT_FORMAT_VERSION
}

/// Errors that can occur during snapshot persistence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// I/O error reading or writing the snapshot file.
    #[error("I/O error: {0}")]
    Io(String),

    /// The snapshot file exists but does not parse.
    #[error("failed to parse snapshot: {0}")]
    Parse(String),

    /// The snapshot could not be serialized.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(String),
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// The persisted editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Format version of the writing editor.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// When the snapshot was assembled.
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
    /// Item payloads, in hierarchy document order.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Placement entries.
    #[serde(default)]
    pub hierarchy: Vec<HierarchyEntry>,
    /// Per-entity UI state.
    #[serde(default)]
    pub state: HashMap<EntityId, EntityState>,
    /// Allocator progress.
    #[serde(default)]
    pub counter: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: Utc::now(),
            items: Vec::new(),
            hierarchy: Vec::new(),
            state: HashMap::new(),
            counter: 0,
        }
    }
}

/// Loads and saves snapshots at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default snapshot location under the user data directory.
    ///
    /// Returns `None` on platforms without a data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("treeline").join("snapshot.json"))
    }

    /// Returns the path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot, or `None` if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] for read failures other than a missing
    /// file, and [`SnapshotError::Parse`] for malformed content.
    pub fn load(&self) -> SnapshotResult<Option<Snapshot>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SnapshotError::Io(err.to_string())),
        };
        let snapshot =
            serde_json::from_str(&raw).map_err(|err| SnapshotError::Parse(err.to_string()))?;
        tracing::debug!(path = %self.path.display(), "snapshot loaded");
        Ok(Some(snapshot))
    }

    /// Saves a snapshot, creating parent directories as needed.
    ///
    /// The content is written to a sibling temp file first and renamed into
    /// place, so a crash mid-write never leaves a truncated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Serialize`] if the snapshot cannot be
    /// encoded and [`SnapshotError::Io`] for filesystem failures.
    pub fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let encoded = serde_json::to_string_pretty(snapshot)
            .map_err(|err| SnapshotError::Serialize(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| SnapshotError::Io(err.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded).map_err(|err| SnapshotError::Io(err.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|err| SnapshotError::Io(err.to_string()))?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

/// Debounced asynchronous snapshot writer.
///
/// Mutation batches call [`schedule`](Self::schedule) with a freshly
/// assembled snapshot; the worker task coalesces bursts and writes only
/// after [`SNAPSHOT_DEBOUNCE`] of quiet. Must be created inside a Tokio
/// runtime.
#[derive(Debug)]
pub struct SnapshotWriter {
    tx: watch::Sender<Option<Snapshot>>,
    store: SnapshotStore,
}

impl SnapshotWriter {
    /// Spawns the writer's worker task against the given store.
    #[must_use]
    pub fn spawn(store: SnapshotStore) -> Self {
        Self::spawn_with_debounce(store, SNAPSHOT_DEBOUNCE)
    }

    /// Spawns the worker with a custom quiet period.
    #[must_use]
    pub fn spawn_with_debounce(store: SnapshotStore, debounce: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        tokio::spawn(Self::debounce_worker(rx, store.clone(), debounce));
        Self { tx, store }
    }

    /// Hands the latest snapshot to the worker, replacing any pending one.
    pub fn schedule(&self, snapshot: Snapshot) {
        self.tx.send_replace(Some(snapshot));
    }

    /// Writes any pending snapshot immediately.
    ///
    /// Call before application exit; the debounce window would otherwise
    /// drop the last batch.
    ///
    /// # Errors
    ///
    /// Propagates [`SnapshotStore::save`] failures.
    pub fn flush(&self) -> SnapshotResult<()> {
        match self.tx.send_replace(None) {
            Some(snapshot) => self.store.save(&snapshot),
            None => Ok(()),
        }
    }

    /// Waits for schedule calls, absorbs bursts until the quiet period
    /// elapses, then persists the most recent snapshot.
    async fn debounce_worker(
        mut rx: watch::Receiver<Option<Snapshot>>,
        store: SnapshotStore,
        debounce: Duration,
    ) {
        loop {
            if rx.changed().await.is_err() {
                // Writer dropped, exit worker
                break;
            }
            loop {
                match tokio::time::timeout(debounce, rx.changed()).await {
                    // Another schedule arrived; restart the quiet window.
                    Ok(Ok(())) => {}
                    // Writer dropped mid-burst.
                    Ok(Err(_)) => return,
                    // Quiet period elapsed.
                    Err(_) => break,
                }
            }
            let pending = rx.borrow_and_update().clone();
            if let Some(snapshot) = pending
                && let Err(err) = store.save(&snapshot)
            {
                tracing::error!("failed to persist snapshot: {err}");
            }
        }
    }
}
