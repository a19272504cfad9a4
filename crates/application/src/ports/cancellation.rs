//! Cancellation primitives

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Owner side of a cancellation signal.
///
/// Cloning shares the same signal; cancelling any clone cancels all
/// receivers.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    tx: Arc<watch::Sender<bool>>,
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancellationReceiver {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// Creates a token and its first receiver.
    #[must_use]
    pub fn new() -> (Self, CancellationReceiver) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, CancellationReceiver { rx })
    }

    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once [`Self::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Another receiver for the same signal.
    #[must_use]
    pub fn receiver(&self) -> CancellationReceiver {
        CancellationReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancellationReceiver {
    /// Returns true once cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes when cancellation is signalled.
    ///
    /// Never completes if every token is dropped without cancelling.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Runs `future` unless cancellation wins first.
    ///
    /// Returns `None` when cancelled, including when cancellation was
    /// already signalled before the call.
    pub async fn run<F: Future>(mut self, future: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            () = self.cancelled() => None,
            output = future => Some(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn run_completes_when_not_cancelled() {
        let (_token, receiver) = CancellationToken::new();
        assert_eq!(receiver.run(async { 42 }).await, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_pending_work() {
        let (token, receiver) = CancellationToken::new();
        let task = tokio::spawn(receiver.run(tokio::time::sleep(Duration::from_secs(60))));

        tokio::task::yield_now().await;
        token.cancel();

        assert_eq!(task.await.ok(), Some(None));
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn already_cancelled_skips_the_future() {
        let (token, _receiver) = CancellationToken::new();
        token.cancel();
        let late = token.receiver();
        assert!(late.is_cancelled());
        assert_eq!(late.run(async { 1 }).await, None);
    }
}
