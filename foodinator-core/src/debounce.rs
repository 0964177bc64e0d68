//! Commit-after-inactivity for text input such as grocery notes.
//!
//! Each [`Debouncer::push`] restarts the timer; only the latest value is
//! delivered once the input has been quiet for the configured delay.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delay used for grocery notes.
pub const NOTES_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its committed values arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    /// Schedule `value` for commit, superseding any value still waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means nobody wants the commit any more.
            let _ = tx.send(value);
        }));
    }

    /// Drop the waiting value, if any, without committing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_value_is_committed() {
        let (mut debouncer, mut rx) = Debouncer::new(NOTES_DEBOUNCE);

        debouncer.push("b".to_string());
        advance(Duration::from_millis(200)).await;
        debouncer.push("bu".to_string());
        advance(Duration::from_millis(200)).await;
        debouncer.push("buy".to_string());

        assert_eq!(rx.recv().await.as_deref(), Some("buy"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_committed_before_delay() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        debouncer.push(1);
        advance(Duration::from_millis(499)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());

        advance(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        debouncer.push(7);
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_commit_separately() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));

        debouncer.push("first");
        assert_eq!(rx.recv().await, Some("first"));

        debouncer.push("second");
        assert_eq!(rx.recv().await, Some("second"));
    }
}
