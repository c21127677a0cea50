//! Shutdown trigger for a running mock server.

use tokio::sync::oneshot;

/// One-shot stop signal owned by [`MockRequests`](crate::MockRequests).
///
/// The paired [`oneshot::Receiver`] goes to the server task. Triggering more
/// than once is a no-op, and dropping the trigger also stops the server.
#[derive(Debug)]
pub struct Shutdown {
    tx: Option<oneshot::Sender<()>>,
}

impl Shutdown {
    /// Create a trigger and the receiver the server waits on.
    pub fn channel() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Signal the server to stop. Returns false if already triggered.
    pub fn trigger(&mut self) -> bool {
        match self.tx.take() {
            Some(tx) => {
                // The server may already be gone; nothing left to stop then.
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.tx.is_none()
    }
}

/// Resolve once the trigger fires or is dropped.
pub async fn wait_for(rx: oneshot::Receiver<()>) {
    let _ = rx.await;
}
