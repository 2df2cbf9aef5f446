//! Repeating position-poll task
//!
//! One ticker instance exists per controller; at most one poll task runs at
//! a time. Starting is idempotent: any previous task is aborted before the
//! replacement spawns, so two concurrent position streams never exist.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;

/// Handle to the repeating position-poll task.
pub struct PositionTicker {
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PositionTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: Mutex::new(None),
        }
    }

    /// Spawn the poll task, aborting any previous one first.
    ///
    /// `poll` fires once immediately and then at the configured interval,
    /// until it returns `false` or the ticker is stopped.
    pub async fn start<F, Fut>(&self, mut poll: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send,
    {
        let interval = self.interval;
        let mut task = self.task.lock().await;
        if let Some(old) = task.take() {
            old.abort();
        }
        *task = Some(tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            loop {
                ticker.tick().await;
                if !poll().await {
                    break;
                }
            }
        }));
    }

    /// Abort the poll task. Returns whether one was running.
    pub async fn stop(&self) -> bool {
        match self.task.lock().await.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for PositionTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}
