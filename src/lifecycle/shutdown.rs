//! Shutdown coordination for the server.

use tokio::sync::watch;

/// Where a server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet accepting.
    Idle,
    /// Accepting connections.
    Serving,
    /// Stop requested; waiting for in-flight requests.
    Draining,
    /// Listener released and all connections finished.
    Stopped,
}

/// Coordinator for graceful shutdown.
///
/// The accept loop and any number of `halt` callers observe the same phase
/// through a watch channel.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<Phase>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Phase::Idle);
        Self { tx }
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.tx.subscribe()
    }

    pub fn phase(&self) -> Phase {
        *self.tx.borrow()
    }

    /// Move from `Idle` to `Serving`. Returns false if the server is already
    /// serving or a stop was requested first.
    pub fn begin_serving(&self) -> bool {
        self.begin_serving_with(|| {})
    }

    /// Like [`Shutdown::begin_serving`], running `on_start` before any
    /// subscriber observes `Serving`. `on_start` does not run on failure.
    pub fn begin_serving_with(&self, on_start: impl FnOnce()) -> bool {
        self.tx.send_if_modified(|phase| match phase {
            Phase::Idle => {
                on_start();
                *phase = Phase::Serving;
                true
            }
            _ => false,
        })
    }

    /// Request a stop. A server that never started goes straight to `Stopped`.
    pub fn trigger(&self) {
        self.tx.send_if_modified(|phase| match phase {
            Phase::Idle => {
                *phase = Phase::Stopped;
                true
            }
            Phase::Serving => {
                *phase = Phase::Draining;
                true
            }
            Phase::Draining | Phase::Stopped => false,
        });
    }

    /// Mark the drain as complete.
    pub fn finish(&self) {
        self.tx.send_replace(Phase::Stopped);
    }

    /// Resolve once a stop has been requested.
    pub async fn requested(&self) {
        let mut rx = self.subscribe();
        let _ = rx
            .wait_for(|phase| matches!(phase, Phase::Draining | Phase::Stopped))
            .await;
    }

    /// Resolve once the server has fully stopped.
    pub async fn stopped(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(|phase| *phase == Phase::Stopped).await;
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
    use std::time::Duration;

    #[test]
    fn stop_before_start_is_terminal() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        assert_eq!(shutdown.phase(), Phase::Stopped);
        assert!(!shutdown.begin_serving());
    }

    #[test]
    fn start_hook_runs_only_on_success() {
        let shutdown = Shutdown::new();
        let mut runs = 0;
        assert!(shutdown.begin_serving_with(|| runs += 1));
        assert!(!shutdown.begin_serving_with(|| runs += 1));
        assert_eq!(runs, 1);
    }

    #[test]
    fn serving_then_trigger_drains() {
        let shutdown = Shutdown::new();
        assert!(shutdown.begin_serving());
        assert!(!shutdown.begin_serving());

        shutdown.trigger();
        assert_eq!(shutdown.phase(), Phase::Draining);
        shutdown.trigger();
        assert_eq!(shutdown.phase(), Phase::Draining);

        shutdown.finish();
        assert_eq!(shutdown.phase(), Phase::Stopped);
    }

    #[tokio::test]
    async fn waiters_observe_transitions() {
        let shutdown = std::sync::Arc::new(Shutdown::new());
        assert!(shutdown.begin_serving());

        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.stopped().await })
        };

        shutdown.trigger();
        shutdown.requested().await;
        assert!(!waiter.is_finished());

        shutdown.finish();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
    }
}
