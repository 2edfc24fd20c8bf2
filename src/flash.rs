//! Error flash timer.
//!
//! Schedules the delayed reset of the error marker as a tokio task. The
//! expired ticket is delivered over a channel back to the event loop, which
//! hands it to [`Calculator::expire_flash`](crate::controller::Calculator::expire_flash).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::controller::FlashTicket;

pub struct FlashTimer {
    delay: Duration,
    tx: mpsc::UnboundedSender<FlashTicket>,
    pending: Option<JoinHandle<()>>,
}

impl FlashTimer {
    /// Create a timer and the receiver that expired tickets arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<FlashTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = Self {
            delay,
            tx,
            pending: None,
        };
        (timer, rx)
    }

    /// Schedule `ticket` to expire after the flash delay.
    ///
    /// Replaces any earlier pending ticket. Must be called from within a
    /// tokio runtime.
    pub fn schedule(&mut self, ticket: FlashTicket) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        tracing::debug!(generation = ticket.generation(), ?delay, "scheduling flash reset");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone only when the session has shut down.
            let _ = tx.send(ticket);
        }));
    }

    /// Abort the pending reset, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                tracing::trace!("cancelling pending flash reset");
            }
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for FlashTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
