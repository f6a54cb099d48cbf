//! Stop signal shared by the signal task and the serve loop.

use tokio::sync::broadcast;

/// Cloneable handle that tells a running [`EchoServer`](crate::http::EchoServer)
/// to stop accepting and drain.
#[derive(Clone)]
pub struct Shutdown(broadcast::Sender<()>);

impl Shutdown {
    pub fn new() -> Self {
        Self(broadcast::channel(1).0)
    }

    /// Receiver for [`EchoServer::run`](crate::http::EchoServer::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.0.subscribe()
    }

    /// Ask every subscribed server to stop. A no-op when none are running.
    pub fn trigger(&self) {
        let _ = self.0.send(());
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
    async fn trigger_reaches_clones() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown.clone().trigger();
        assert!(rx.recv().await.is_ok());
    }

    #[test]
    fn trigger_without_servers_is_harmless() {
        Shutdown::default().trigger();
    }
}
