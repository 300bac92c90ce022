//! Stop signal shared by the server and the binary.

use tokio::sync::broadcast;

/// One-shot stop signal. Every [`HttpServer::run`] holds a receiver and
/// drains its connections once [`Shutdown::trigger`] is called.
///
/// [`HttpServer::run`]: crate::http::HttpServer::run
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver to hand to [`HttpServer::run`](crate::http::HttpServer::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every receiver to stop. Calling it with no receivers is a no-op.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Receivers not yet dropped.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_trigger() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.subscribe();
        assert_eq!(shutdown.receiver_count(), 2);

        shutdown.trigger();
        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[test]
    fn trigger_without_subscribers_is_harmless() {
        Shutdown::new().trigger();
    }

    #[test]
    fn dropped_receivers_stop_counting() {
        let shutdown = Shutdown::default();
        let rx = shutdown.subscribe();
        let _kept = shutdown.clone().subscribe();
        drop(rx);
        assert_eq!(shutdown.receiver_count(), 1);
    }
}
