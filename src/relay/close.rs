//! Idempotent close signal shared by the two relay directions
//!
//! Each relay task owns only its own halves of the client and destination
//! sockets. Closing a connection means flipping its handle; the task holding
//! the other halves observes the flip, stops reading and drops them.

use std::sync::Arc;
use tokio::sync::watch;

/// Close flag for one connection. Cloning shares the same flag.
#[derive(Debug, Clone)]
pub struct CloseHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CloseHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Mark the connection closed. Safe to call any number of times from any
    /// task; returns `true` only for the call that actually closed it.
    pub fn close(&self) -> bool {
        !self.tx.send_replace(true)
    }

    /// Resolve once the connection has been closed, immediately if it already is.
    pub async fn closed(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this cannot fail while we wait.
        let _ = rx.wait_for(|closed| *closed).await;
    }
}

impl Default for CloseHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn test_double_close_is_noop() {
        let handle = CloseHandle::new();
        let other = handle.clone();

        assert!(handle.close());
        assert!(!handle.close());
        assert!(!other.close());
    }

    #[tokio::test]
    async fn test_waiter_registered_before_close() {
        let handle = CloseHandle::new();
        let other = handle.clone();

        let waiter = tokio::spawn(async move { other.closed().await });
        tokio::task::yield_now().await;

        handle.close();
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake after close")
            .unwrap();
    }

    #[tokio::test]
    async fn test_waiter_registered_after_close() {
        let handle = CloseHandle::new();
        handle.close();

        timeout(Duration::from_secs(1), handle.closed())
            .await
            .expect("already-closed handle should resolve at once");
    }
}
