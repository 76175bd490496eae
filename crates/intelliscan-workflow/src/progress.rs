//! Synthetic upload progress
//!
//! The analysis latency is not observable chunk-by-chunk from the client, so
//! progress is simulated: a ticker adds a fixed step per interval up to a
//! hold ceiling, and the orchestrator forces 100 on completion. The simulator
//! owns its cancel handle; the ticker never outlives it.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Drives a percentage counter from 0 toward `hold_at`, then holds until
/// explicitly completed or cancelled.
///
/// Cancellation is idempotent: cancelling an already-cancelled simulator is a
/// no-op, never an error.
#[derive(Debug)]
pub struct ProgressSimulator {
    tick: Duration,
    step: u8,
    hold_at: u8,
    progress_tx: watch::Sender<u8>,
    ticker: Option<JoinHandle<()>>,
}

impl ProgressSimulator {
    pub fn new(tick: Duration, step: u8, hold_at: u8) -> Self {
        let (progress_tx, _) = watch::channel(0);
        Self {
            tick,
            step,
            hold_at,
            progress_tx,
            ticker: None,
        }
    }

    /// Current progress percentage in 0..=100.
    pub fn value(&self) -> u8 {
        *self.progress_tx.borrow()
    }

    /// Observe progress updates. Receivers see every change.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.progress_tx.subscribe()
    }

    /// Restart from 0 and begin ticking. Any previous ticker is cancelled.
    pub fn start(&mut self) {
        self.stop_ticker();
        self.progress_tx.send_replace(0);

        let tx = self.progress_tx.clone();
        let (tick, step, hold_at) = (self.tick, self.step, self.hold_at);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let next = tx.borrow().saturating_add(step).min(hold_at);
                tx.send_replace(next);
                if next >= hold_at {
                    break;
                }
            }
        }));
    }

    /// Stop ticking and force the counter to 100.
    pub fn complete(&mut self) {
        self.stop_ticker();
        self.progress_tx.send_replace(100);
    }

    /// Stop ticking and reset the counter to 0. Idempotent.
    pub fn cancel(&mut self) {
        self.stop_ticker();
        self.progress_tx.send_replace(0);
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
