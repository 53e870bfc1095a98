//! Cancellable delayed delivery for autocomplete input
//!
//! Each `schedule` cancels the pending task before starting a new one, so a
//! superseded value is never delivered.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<CancellationToken>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its values are delivered to
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Deliver `value` after the quiet period unless superseded or cancelled
    ///
    /// Must be called inside a tokio runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let tx = self.tx.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // receiver gone means the kiosk is shutting down
                    let _ = tx.send(value);
                }
            }
        });

        self.pending = Some(token);
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
