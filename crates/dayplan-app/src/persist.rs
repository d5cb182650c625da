//! Snapshot persistence seam and the background save queue.

use anyhow::Error;
use dayplan_core::Task;
use dayplan_store_json::JsonStore;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Minimal storage abstraction required by the task store.
pub trait SnapshotStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Load the whole task collection.
    ///
    /// # Errors
    /// Returns a store-specific error when the snapshot cannot be read.
    fn load(&self) -> Result<Vec<Task>, Self::Error>;

    /// Replace the whole task collection.
    ///
    /// # Errors
    /// Returns a store-specific error when the snapshot cannot be written.
    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error>;
}

impl SnapshotStore for JsonStore {
    type Error = dayplan_store_json::StoreError;

    fn load(&self) -> Result<Vec<Task>, Self::Error> {
        Self::load(self)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        Self::save(self, tasks)
    }
}

/// Load the stored tasks, falling back to an empty collection on failure.
///
/// Startup never aborts over a broken snapshot; the failure is logged and
/// the tracker starts with an empty list.
pub fn load_or_empty<S: SnapshotStore>(store: &S) -> Vec<Task> {
    match store.load() {
        Ok(tasks) => tasks,
        Err(err) => {
            let err: Error = err.into();
            warn!(error = %err, "Could not load tasks, starting empty");
            Vec::new()
        }
    }
}

/// Sender half of the save queue.
///
/// Every enqueued snapshot is written by the background writer in the order
/// it was queued.
#[derive(Debug, Clone)]
pub struct SaveHandle {
    tx: UnboundedSender<Vec<Task>>,
}

impl SaveHandle {
    /// Wrap a channel to the background writer.
    #[must_use]
    pub const fn new(tx: UnboundedSender<Vec<Task>>) -> Self {
        Self { tx }
    }

    /// Queue a snapshot for writing.
    ///
    /// When the writer is gone the snapshot is dropped with a warning; task
    /// operations keep working on the in-memory state.
    pub fn enqueue(&self, tasks: Vec<Task>) {
        if self.tx.send(tasks).is_err() {
            warn!("Save worker is gone, dropping snapshot");
        }
    }
}

/// Spawn the background writer draining the save queue.
///
/// The writer stops once every [`SaveHandle`] is dropped and the queue is
/// empty, so awaiting the returned handle flushes pending saves on
/// shutdown. A failed write is logged and dropped; the next snapshot holds
/// the full collection again, so nothing stays lost for longer than one
/// mutation.
pub fn spawn_writer<S>(store: S) -> (SaveHandle, JoinHandle<()>)
where
    S: SnapshotStore + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Task>>();
    let writer = tokio::spawn(async move {
        while let Some(tasks) = rx.recv().await {
            match store.save(&tasks) {
                Ok(()) => debug!(count = tasks.len(), "Wrote snapshot"),
                Err(err) => {
                    let err: Error = err.into();
                    warn!(error = %err, count = tasks.len(), "Could not write snapshot");
                }
            }
        }
    });
    (SaveHandle::new(tx), writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayplan_core::Priority;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
    use time::macros::datetime;

    #[derive(Clone, Default)]
    struct RecordingStore {
        inner: Arc<RecordingStoreInner>,
    }

    #[derive(Default)]
    struct RecordingStoreInner {
        saved: Mutex<Vec<Vec<Task>>>,
        fail_load: Mutex<bool>,
        fail_next_save: Mutex<bool>,
    }

    impl SnapshotStore for RecordingStore {
        type Error = std::io::Error;

        fn load(&self) -> Result<Vec<Task>, Self::Error> {
            if *guard(&self.inner.fail_load) {
                return Err(std::io::Error::other("disk on fire"));
            }
            Ok(Vec::new())
        }

        fn save(&self, tasks: &[Task]) -> Result<(), Self::Error> {
            let mut fail_next = guard(&self.inner.fail_next_save);
            if *fail_next {
                *fail_next = false;
                return Err(std::io::Error::other("disk full"));
            }
            drop(fail_next);
            guard(&self.inner.saved).push(tasks.to_vec());
            Ok(())
        }
    }

    fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn task(text: &str) -> Task {
        Task::new(text, datetime!(2026-03-14 09:00 UTC), Priority::Low)
    }

    #[tokio::test]
    async fn writer_preserves_the_enqueue_order() {
        let store = RecordingStore::default();
        let (saves, writer) = spawn_writer(store.clone());

        saves.enqueue(vec![task("first")]);
        saves.enqueue(vec![task("first"), task("second")]);
        drop(saves);
        writer.await.expect("writer must not panic");

        let saved = guard(&store.inner.saved).clone();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].len(), 1);
        assert_eq!(saved[1].len(), 2);
    }

    #[tokio::test]
    async fn failed_write_does_not_stop_the_writer() {
        let store = RecordingStore::default();
        *guard(&store.inner.fail_next_save) = true;
        let (saves, writer) = spawn_writer(store.clone());

        saves.enqueue(vec![task("lost")]);
        saves.enqueue(vec![task("kept")]);
        drop(saves);
        writer.await.expect("writer must not panic");

        let saved = guard(&store.inner.saved).clone();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0][0].text, "kept");
    }

    #[test]
    fn load_or_empty_swallows_store_errors() {
        let store = RecordingStore::default();
        *guard(&store.inner.fail_load) = true;

        assert!(load_or_empty(&store).is_empty());
    }

    #[test]
    fn enqueue_after_writer_shutdown_drops_the_snapshot() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        SaveHandle::new(tx).enqueue(vec![task("orphan")]);
    }
}
