//! Keyed async task manager.
//!
//! Tasks with the same key are mutually exclusive: spawning under a key
//! that is already running aborts the in-flight task first. This is the
//! request fence for overlapping network calls - rapid repeated
//! reverse-geocode requests or listing refreshes can never deliver out
//! of order, because only the newest task under a key is alive to send
//! its result.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use nightowl_core::Action;

/// Identifies a task for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Registry of running tasks by key. Completed tasks send their action
/// back through the runtime channel; cancelled tasks send nothing.
pub struct TaskManager {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any existing task with the same key.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Spawn with debounce: waits for `duration` before executing, and a
    /// re-spawn under the same key within that window resets the timer.
    pub fn debounce<F>(
        &mut self,
        key: impl Into<TaskKey>,
        duration: Duration,
        future: F,
    ) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort a task by key; no-op if nothing runs under it.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Abort everything; used on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightowl_core::Coordinate;

    #[tokio::test]
    async fn spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("gps", async { Action::GpsDidUpdate(Coordinate::new(12.9, 77.6)) });

        let action = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert!(matches!(action, Action::GpsDidUpdate(_)));
    }

    #[tokio::test]
    async fn spawn_fences_out_the_previous_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        // Slow geocode for the first click...
        tasks.spawn("geocode", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Action::GeocodeDidResolve {
                coordinate: Coordinate::new(12.9, 77.6),
                address: "Old Road".into(),
            }
        });
        // ...replaced immediately by the second click.
        tasks.spawn("geocode", async {
            Action::GeocodeDidResolve {
                coordinate: Coordinate::new(12.95, 77.65),
                address: "MG Road".into(),
            }
        });

        let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        match action {
            Action::GeocodeDidResolve { address, .. } => assert_eq!(address, "MG Road"),
            other => panic!("unexpected action {other:?}"),
        }
        // Nothing else arrives: the first task was aborted.
        let extra = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test]
    async fn debounce_resets_on_respawn() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("geocode", Duration::from_millis(50), async {
            Action::GeocodeDidError("first".into())
        });
        tokio::time::sleep(Duration::from_millis(30)).await;
        tasks.debounce("geocode", Duration::from_millis(50), async {
            Action::GeocodeDidError("second".into())
        });

        let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert!(matches!(action, Action::GeocodeDidError(msg) if msg == "second"));
    }

    #[tokio::test]
    async fn cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("listings", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Action::ListingsDidLoad(vec![])
        });
        assert!(tasks.is_running(&TaskKey::new("listings")));

        tasks.cancel(&TaskKey::new("listings"));
        assert!(!tasks.is_running(&TaskKey::new("listings")));

        let result = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }

    #[tokio::test]
    async fn cancel_all_empties_the_registry() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("a", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Action::Tick
        });
        tasks.spawn("b", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Action::Tick
        });
        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();
        assert!(tasks.is_empty());
    }
}
