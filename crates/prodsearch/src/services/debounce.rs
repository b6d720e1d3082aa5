//! Debouncer - Collapses bursts of calls into one delayed callback
//!
//! Each `Debouncer` owns a background task holding at most one pending
//! value. Every `call` replaces that value and restarts the quiet window;
//! when the window elapses without a new call the callback is spawned with
//! the latest value.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::sleep;

enum Command<T> {
    Dispatch(T),
    Cancel,
}

/// Handle to one debounced stream
///
/// Dropping the handle stops the stream and discards any pending value.
/// Must be created inside a tokio runtime.
pub struct Debouncer<T> {
    tx: UnboundedSender<Command<T>>,
    delay: Duration,
    worker: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debounced stream that runs `callback` once per quiet window
    pub fn new<F, Fut>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(rx, delay, callback));

        Self { tx, delay, worker }
    }

    /// Offer a new value; fire-and-forget
    ///
    /// The callback never runs synchronously, even with a zero delay.
    pub fn call(&self, value: T) {
        if self.tx.send(Command::Dispatch(value)).is_err() {
            tracing::warn!("Debouncer worker has stopped, dropping value");
        }
    }

    /// Drop the pending value without firing
    pub fn cancel(&self) {
        if self.tx.send(Command::Cancel).is_err() {
            tracing::warn!("Debouncer worker has stopped, nothing to cancel");
        }
    }
}

impl<T> Debouncer<T> {
    /// Quiet window length
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run_worker<T, F, Fut>(mut rx: UnboundedReceiver<Command<T>>, delay: Duration, callback: F)
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut pending: Option<T> = None;

    loop {
        match pending.take() {
            None => match rx.recv().await {
                Some(Command::Dispatch(value)) => pending = Some(value),
                Some(Command::Cancel) => {}
                None => return,
            },
            Some(value) => {
                tokio::select! {
                    biased;

                    command = rx.recv() => match command {
                        Some(Command::Dispatch(next)) => pending = Some(next),
                        Some(Command::Cancel) => tracing::trace!("Pending dispatch cancelled"),
                        None => return,
                    },
                    _ = sleep(delay) => {
                        // Spawned so a later call can never abort a running callback
                        tokio::spawn(callback(value));
                    }
                }
            }
        }
    }
}
