//! Trailing-edge debounce timer.
//!
//! A [`Debouncer`] forwards a value to its channel only after no newer value
//! has been observed for the quiet period. Observing a value cancels the
//! pending timer, so rapid updates collapse into a single emission of the
//! last value.
//!
//! The timer is a spawned task; dropping the debouncer aborts it, so nothing
//! is emitted after the owner is gone.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Cancellable deferred emission of the most recently observed value.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    sender: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer that emits into `sender`.
    #[must_use]
    pub const fn new(quiet_period: Duration, sender: mpsc::UnboundedSender<T>) -> Self {
        Self {
            quiet_period,
            sender,
            pending: None,
        }
    }

    /// Records a new value and restarts the quiet period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn observe(&mut self, value: T) {
        self.cancel();

        let deadline = Instant::now() + self.quiet_period;
        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            if sender.send(value).is_err() {
                tracing::debug!("debounce receiver closed, dropping value");
            }
        }));
    }

    /// Cancels the pending emission, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a value is waiting for its quiet period to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
