//! Stop signal shared by the listeners of the console.

use tokio::sync::broadcast;

/// Fans a single stop request out to every serving task.
///
/// Each listener subscribes before it starts accepting connections and
/// drains in-flight requests once the signal arrives. Dropping the last
/// clone also stops them.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every listener to stop. Returns how many were still running.
    pub fn trigger(&self) -> usize {
        let listeners = self.tx.send(()).unwrap_or(0);
        tracing::info!(listeners, "Shutdown requested");
        listeners
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
