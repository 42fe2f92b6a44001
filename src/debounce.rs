//! Coalescing Trigger
//!
//! Collapses a burst of values into one handler call once no new value has
//! arrived for a quiet window. Scheduling lives here so the validators stay
//! plain synchronous functions.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet window used by the language server between edits
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Debounced handler running on its own tokio task
#[derive(Debug)]
pub struct CoalescingTrigger<T> {
    sender: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> CoalescingTrigger<T> {
    /// Spawn the trigger task. Must be called inside a tokio runtime.
    pub fn new<F, Fut>(window: Duration, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(mut latest) = receiver.recv().await {
                loop {
                    match tokio::time::timeout(window, receiver.recv()).await {
                        Ok(Some(next)) => latest = next,
                        // sender dropped, flush what we have
                        Ok(None) => break,
                        // quiet window elapsed
                        Err(_) => break,
                    }
                }
                handler(latest).await;
            }
        });

        Self { sender, task }
    }

    /// Record a new value and restart the quiet window
    pub fn fire(&self, value: T) {
        if self.sender.send(value).is_err() {
            log::debug!("coalescing trigger task has stopped, value dropped");
        }
    }

    /// Stop the trigger without running the handler for a pending value
    pub fn cancel(self) {
        self.task.abort();
    }
}
