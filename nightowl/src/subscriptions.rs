//! Long-lived action sources: timers and streams.
//!
//! Unlike one-shot tasks, subscriptions keep emitting until cancelled.
//! The position watch lives here: opened once per authenticated session,
//! released on logout and on shutdown. Handles abort on cancel and on
//! drop, so a watch cannot outlive the session that opened it.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};

use nightowl_core::Action;

/// Identifies a subscription for cancellation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubKey(String);

impl SubKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for SubKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SubKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

pub struct Subscriptions {
    handles: HashMap<SubKey, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Subscriptions {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Emit an action at fixed intervals. Replaces any subscription
    /// already registered under the key.
    pub fn interval<F>(
        &mut self,
        key: impl Into<SubKey>,
        duration: Duration,
        action_fn: F,
    ) -> &mut Self
    where
        F: Fn() -> Action + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(duration);
            // Skip the immediate first tick.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(action_fn()).is_err() {
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    /// Forward a stream's items as actions until the stream ends or the
    /// subscription is cancelled.
    pub fn stream<S>(&mut self, key: impl Into<SubKey>, stream: S) -> &mut Self
    where
        S: Stream<Item = Action> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::pin!(stream);
            while let Some(action) = stream.next().await {
                if tx.send(action).is_err() {
                    break;
                }
            }
        });

        self.handles.insert(key, handle);
        self
    }

    pub fn cancel(&mut self, key: &SubKey) {
        if let Some(handle) = self.handles.remove(key) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_active(&self, key: &SubKey) -> bool {
        self.handles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightowl_core::Coordinate;

    #[tokio::test]
    async fn interval_emits_repeatedly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        subs.interval("tick", Duration::from_millis(20), || Action::Tick);

        for _ in 0..2 {
            let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
                .await
                .expect("timeout")
                .expect("channel closed");
            assert!(matches!(action, Action::Tick));
        }
    }

    #[tokio::test]
    async fn stream_forwards_position_updates() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        let updates = tokio_stream::iter(vec![
            Action::GpsDidUpdate(Coordinate::new(12.9, 77.6)),
            Action::GpsDidError("permission denied".into()),
        ]);
        subs.stream("position", updates);

        let first = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert!(matches!(first, Action::GpsDidUpdate(_)));

        let second = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert!(matches!(second, Action::GpsDidError(_)));
    }

    #[tokio::test]
    async fn cancel_releases_the_watch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        subs.interval("position", Duration::from_millis(10), || {
            Action::GpsDidUpdate(Coordinate::new(0.0, 0.0))
        });
        assert!(subs.is_active(&SubKey::new("position")));

        let _ = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        subs.cancel(&SubKey::new("position"));
        assert!(!subs.is_active(&SubKey::new("position")));

        while rx.try_recv().is_ok() {}
        let result = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(result.is_err(), "no more updates after release");
    }

    #[tokio::test]
    async fn replacing_a_key_keeps_one_subscription() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        subs.interval("refresh", Duration::from_secs(10), || Action::ListingsFetch);
        subs.interval("refresh", Duration::from_secs(10), || Action::ListingsFetch);
        assert_eq!(subs.len(), 1);

        subs.cancel_all();
        assert!(subs.is_empty());
    }
}
